//! Employee profile repository

use crate::domain::{CreateEmployeeInput, Employee, EmployeeId, UpdateEmployeeInput, UserId};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Fails with `Conflict` when the user already has a profile
    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee>;
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>>;
    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Employee>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Employee>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, id: EmployeeId, input: &UpdateEmployeeInput) -> Result<Employee>;
    /// Delete a profile; its votes cascade in storage
    async fn delete(&self, id: EmployeeId) -> Result<()>;
}

pub struct EmployeeRepositoryImpl {
    pool: MySqlPool,
}

impl EmployeeRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeRepositoryImpl {
    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (user_id, department, created_at)
            VALUES (?, ?, NOW())
            "#,
        )
        .bind(input.user_id)
        .bind(&input.department)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_constraint(e, "User already has an employee profile", "User not found")
        })?;

        let id = EmployeeId(result.last_insert_id() as i64);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create employee")))
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, user_id, department, created_at FROM employees WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, user_id, department, created_at FROM employees WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, user_id, department, created_at
            FROM employees
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, id: EmployeeId, input: &UpdateEmployeeInput) -> Result<Employee> {
        if let Some(department) = &input.department {
            sqlx::query("UPDATE employees SET department = ? WHERE id = ?")
                .bind(department)
                .bind(id)
                .execute(&self.pool)
                .await?;
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))
    }

    async fn delete(&self, id: EmployeeId) -> Result<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Employee {} not found", id)));
        }

        Ok(())
    }
}
