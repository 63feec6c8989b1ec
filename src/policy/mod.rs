//! Centralized authorization policy for HTTP handlers.
//!
//! Handlers resolve a [`CapabilitySet`] once per request and pass it with a
//! [`PolicyInput`] to [`enforce`]. A failed check is always `Forbidden` and
//! happens before any side effect.

use crate::domain::{EmployeeId, RestaurantId};
use crate::error::AppError;

pub type PolicyResult<T> = std::result::Result<T, AppError>;

/// Capabilities held by the calling actor.
///
/// The facts are independent: an actor may own restaurants and be an
/// employee at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    pub admin: bool,
    pub owned_restaurants: Vec<RestaurantId>,
    pub employee: Option<EmployeeId>,
}

impl CapabilitySet {
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn is_restaurant_owner(&self) -> bool {
        !self.owned_restaurants.is_empty()
    }

    pub fn owns(&self, restaurant_id: RestaurantId) -> bool {
        self.owned_restaurants.contains(&restaurant_id)
    }

    /// The caller's employee id, or `Forbidden`
    pub fn require_employee(&self) -> PolicyResult<EmployeeId> {
        self.employee
            .ok_or_else(|| AppError::Forbidden("Employee profile required".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyAction {
    VoteSubmit,
    /// Update or delete an existing vote
    VoteModify,
    /// Create, update or delete a menu
    MenuWrite,
    ResultsRead,
    RestaurantWrite,
    EmployeeManage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceScope {
    Global,
    /// A vote cast by the given employee
    Vote(EmployeeId),
    /// A menu belonging to the given restaurant
    Restaurant(RestaurantId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyInput {
    pub action: PolicyAction,
    pub scope: ResourceScope,
}

impl PolicyInput {
    pub fn global(action: PolicyAction) -> Self {
        Self {
            action,
            scope: ResourceScope::Global,
        }
    }
}

pub fn enforce(caps: &CapabilitySet, input: &PolicyInput) -> PolicyResult<()> {
    match input.action {
        PolicyAction::VoteSubmit => caps.require_employee().map(|_| ()),
        PolicyAction::VoteModify => {
            let owner = match input.scope {
                ResourceScope::Vote(employee_id) => employee_id,
                _ => return Err(scope_mismatch(input)),
            };
            let caller = caps.require_employee()?;
            if caller == owner {
                Ok(())
            } else {
                Err(AppError::Forbidden(
                    "Only the employee who cast a vote may change it".to_string(),
                ))
            }
        }
        PolicyAction::MenuWrite => {
            let restaurant_id = match input.scope {
                ResourceScope::Restaurant(restaurant_id) => restaurant_id,
                _ => return Err(scope_mismatch(input)),
            };
            if caps.owns(restaurant_id) {
                Ok(())
            } else {
                Err(AppError::Forbidden(
                    "Only the restaurant owner may manage its menus".to_string(),
                ))
            }
        }
        PolicyAction::ResultsRead | PolicyAction::RestaurantWrite | PolicyAction::EmployeeManage => {
            if caps.is_admin() {
                Ok(())
            } else {
                Err(AppError::Forbidden("Admin access required".to_string()))
            }
        }
    }
}

fn scope_mismatch(input: &PolicyInput) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "Policy action {:?} does not apply to scope {:?}",
        input.action,
        input.scope
    ))
}
