//! Restaurant domain model

use super::common::{RestaurantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub owner_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Restaurant {
    fn default() -> Self {
        Self {
            id: RestaurantId(0),
            name: String::new(),
            address: String::new(),
            phone_number: String::new(),
            owner_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Input for creating a restaurant
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRestaurantInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1, max = 50))]
    pub phone_number: String,
    pub owner_id: Option<UserId>,
}

/// Input for updating a restaurant
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRestaurantInput {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub phone_number: Option<String>,
    pub owner_id: Option<UserId>,
}
