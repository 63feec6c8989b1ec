//! Actor identity as supplied by the identity layer

use super::common::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Staff and superusers hold the Admin capability
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: UserId(0),
            username: String::new(),
            is_staff: false,
            is_superuser: false,
            created_at: Utc::now(),
        }
    }
}
