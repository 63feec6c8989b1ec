//! Employee profile domain model

use super::common::{EmployeeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Employee profile; an actor has at most one
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: EmployeeId,
    pub user_id: UserId,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            id: EmployeeId(0),
            user_id: UserId(0),
            department: String::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeInput {
    pub user_id: UserId,
    #[validate(length(min = 1, max = 255))]
    pub department: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeInput {
    #[validate(length(min = 1, max = 255))]
    pub department: Option<String>,
}
