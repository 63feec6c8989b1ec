//! Menu domain model

use super::common::{MenuId, RestaurantId};
use crate::error::{AppError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A restaurant's offered items for one calendar date
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Menu {
    pub id: MenuId,
    pub restaurant_id: RestaurantId,
    #[serde(rename = "date")]
    pub menu_date: NaiveDate,
    /// Either an object of item name to description, or a list of names
    #[sqlx(json)]
    pub items: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            id: MenuId(0),
            restaurant_id: RestaurantId(0),
            menu_date: Utc::now().date_naive(),
            items: serde_json::Value::Object(Default::default()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Input for creating a menu
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMenuInput {
    pub restaurant_id: RestaurantId,
    pub date: NaiveDate,
    pub items: serde_json::Value,
}

/// Input for updating a menu. The owning restaurant cannot change.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMenuInput {
    pub date: Option<NaiveDate>,
    pub items: Option<serde_json::Value>,
}

/// Menu items must be a JSON object or a list of item names.
pub fn check_menu_items(items: &serde_json::Value) -> Result<()> {
    match items {
        serde_json::Value::Object(_) => Ok(()),
        serde_json::Value::Array(names) if names.iter().all(|n| n.is_string()) => Ok(()),
        _ => Err(AppError::BadRequest(
            "items must be an object or a list of item names".to_string(),
        )),
    }
}
