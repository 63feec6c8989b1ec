//! Capability resolution for the calling actor

use crate::domain::UserId;
use crate::error::{AppError, Result};
use crate::policy::CapabilitySet;
use crate::repository::{EmployeeRepository, RestaurantRepository, UserRepository};
use std::sync::Arc;

pub struct CapabilityService<U, R, E>
where
    U: UserRepository,
    R: RestaurantRepository,
    E: EmployeeRepository,
{
    user_repo: Arc<U>,
    restaurant_repo: Arc<R>,
    employee_repo: Arc<E>,
}

impl<U, R, E> CapabilityService<U, R, E>
where
    U: UserRepository,
    R: RestaurantRepository,
    E: EmployeeRepository,
{
    pub fn new(user_repo: Arc<U>, restaurant_repo: Arc<R>, employee_repo: Arc<E>) -> Self {
        Self {
            user_repo,
            restaurant_repo,
            employee_repo,
        }
    }

    /// Resolve every capability the actor holds.
    ///
    /// A token for a user that no longer exists is treated as
    /// unauthenticated.
    pub async fn resolve(&self, user_id: UserId) -> Result<CapabilitySet> {
        let (user, owned_restaurants, employee) = tokio::try_join!(
            self.user_repo.find_by_id(user_id),
            self.restaurant_repo.find_ids_by_owner(user_id),
            self.employee_repo.find_by_user(user_id),
        )?;

        let user = user.ok_or_else(|| AppError::Unauthorized("Unknown user".to_string()))?;

        let caps = CapabilitySet {
            admin: user.is_admin(),
            owned_restaurants,
            employee: employee.map(|e| e.id),
        };
        tracing::debug!(user_id = %user_id, ?caps, "Resolved capabilities");
        Ok(caps)
    }
}
