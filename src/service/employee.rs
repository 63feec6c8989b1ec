//! Employee profile management

use crate::domain::{CreateEmployeeInput, Employee, EmployeeId, UpdateEmployeeInput};
use crate::error::{AppError, Result};
use crate::repository::{EmployeeRepository, UserRepository};
use std::sync::Arc;
use validator::Validate;

pub struct EmployeeService<E: EmployeeRepository, U: UserRepository> {
    repo: Arc<E>,
    user_repo: Arc<U>,
}

impl<E: EmployeeRepository, U: UserRepository> EmployeeService<E, U> {
    pub fn new(repo: Arc<E>, user_repo: Arc<U>) -> Self {
        Self { repo, user_repo }
    }

    /// Attach an employee profile to an existing user.
    pub async fn create(&self, input: CreateEmployeeInput) -> Result<Employee> {
        input.validate()?;

        if self.user_repo.find_by_id(input.user_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                input.user_id
            )));
        }
        if self.repo.find_by_user(input.user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "User already has an employee profile".to_string(),
            ));
        }

        let employee = self.repo.create(&input).await?;
        tracing::info!(employee_id = %employee.id, user_id = %employee.user_id, "Employee created");
        Ok(employee)
    }

    pub async fn get(&self, id: EmployeeId) -> Result<Employee> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<Employee>, i64)> {
        let offset = (page - 1) * per_page;
        let employees = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((employees, total))
    }

    pub async fn update(&self, id: EmployeeId, input: UpdateEmployeeInput) -> Result<Employee> {
        input.validate()?;
        let _ = self.get(id).await?;
        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: EmployeeId) -> Result<()> {
        let _ = self.get(id).await?;
        self.repo.delete(id).await
    }
}
