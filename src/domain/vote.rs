//! Vote domain model and result aggregation

use super::common::{EmployeeId, MenuId, RestaurantId, VoteId};
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

pub const MIN_POINTS: i64 = 1;
pub const MAX_POINTS: i64 = 3;

/// An employee's weighted endorsement of one menu.
///
/// The pair (`employee_id`, `menu_id`) is unique across all votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vote {
    pub id: VoteId,
    pub employee_id: EmployeeId,
    pub menu_id: MenuId,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl Default for Vote {
    fn default() -> Self {
        Self {
            id: VoteId(0),
            employee_id: EmployeeId(0),
            menu_id: MenuId(0),
            points: 1,
            created_at: Utc::now(),
        }
    }
}

/// A validated vote ready to be stored for the calling employee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewVote {
    pub menu_id: MenuId,
    pub points: i32,
}

/// Vote joined with the restaurant owning its menu
#[derive(Debug, Clone, FromRow)]
pub struct VoteWithRestaurant {
    pub vote_id: VoteId,
    pub employee_id: EmployeeId,
    pub menu_id: MenuId,
    pub points: i32,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateVoteInput {
    #[validate(range(min = 1, max = 3))]
    pub points: i64,
}

/// Total points per restaurant name; restaurants without votes are absent.
pub type VoteResults = BTreeMap<String, i64>;

/// Reject points outside `MIN_POINTS..=MAX_POINTS`.
pub fn check_points(points: i64) -> Result<i32> {
    if (MIN_POINTS..=MAX_POINTS).contains(&points) {
        Ok(points as i32)
    } else {
        Err(AppError::BadRequest(format!(
            "points must be between {} and {}, got {}",
            MIN_POINTS, MAX_POINTS, points
        )))
    }
}

/// Sum points per restaurant name.
pub fn tally(votes: &[VoteWithRestaurant]) -> VoteResults {
    let mut results = VoteResults::new();
    for vote in votes {
        *results.entry(vote.restaurant_name.clone()).or_insert(0) += i64::from(vote.points);
    }
    results
}
