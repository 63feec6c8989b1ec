//! REST API shared utilities (response types, pagination, capability checks)

pub mod employee;
pub mod health;
pub mod menu;
pub mod metrics;
pub mod restaurant;
pub mod vote;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::policy::{self, CapabilitySet, PolicyInput};
use crate::state::HasServices;
use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum allowed per_page value for pagination
pub(crate) const MAX_PER_PAGE: i64 = 100;

/// JSON request body whose rejection is surfaced as a 400 once the handler
/// has authorized the caller.
pub(crate) type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

/// Resolve the caller's capabilities and check them against `input`.
///
/// Returns the resolved set so handlers can reuse it (e.g. the caller's
/// employee id) without a second lookup.
pub(crate) async fn authorize<S: HasServices>(
    state: &S,
    auth: &AuthUser,
    input: &PolicyInput,
) -> Result<CapabilitySet> {
    let caps = state.capability_service().resolve(auth.user_id).await?;
    if let Err(e) = policy::enforce(&caps, input) {
        tracing::debug!(
            user_id = %auth.user_id,
            action = ?input.action,
            scope = ?input.scope,
            "Request denied by policy"
        );
        return Err(e);
    }
    Ok(caps)
}

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: i64,
    #[serde(
        default = "default_per_page",
        deserialize_with = "deserialize_per_page",
        alias = "limit"
    )]
    pub per_page: i64,
}

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_per_page() -> i64 {
    20
}

/// Reject page values less than 1
pub(crate) fn deserialize_page<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "page must be a positive integer (>= 1)",
        ));
    }
    Ok(value)
}

/// Reject per_page values less than 1, clamp to MAX_PER_PAGE
pub(crate) fn deserialize_per_page<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    if value < 1 {
        return Err(serde::de::Error::custom(
            "per_page must be a positive integer (>= 1)",
        ));
    }
    Ok(value.min(MAX_PER_PAGE))
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = (total + per_page - 1) / per_page;
        Self {
            data,
            pagination: PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Message response (for delete, etc.)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
