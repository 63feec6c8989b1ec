//! Menu repository

use crate::domain::{CreateMenuInput, Menu, MenuId, UpdateMenuInput};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Fails with `Conflict` when the restaurant already has a menu that day
    async fn create(&self, input: &CreateMenuInput) -> Result<Menu>;
    async fn find_by_id(&self, id: MenuId) -> Result<Option<Menu>>;
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Menu>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Menu>>;
    async fn count(&self) -> Result<i64>;
    async fn update(&self, id: MenuId, input: &UpdateMenuInput) -> Result<Menu>;
    async fn delete(&self, id: MenuId) -> Result<()>;
}

pub struct MenuRepositoryImpl {
    pool: MySqlPool,
}

impl MenuRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const DUPLICATE_MENU: &str = "Restaurant already has a menu for this date";

#[async_trait]
impl MenuRepository for MenuRepositoryImpl {
    async fn create(&self, input: &CreateMenuInput) -> Result<Menu> {
        let result = sqlx::query(
            r#"
            INSERT INTO menus (restaurant_id, menu_date, items, created_at, updated_at)
            VALUES (?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(input.restaurant_id)
        .bind(input.date)
        .bind(sqlx::types::Json(&input.items))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, DUPLICATE_MENU, "Restaurant not found"))?;

        let id = MenuId(result.last_insert_id() as i64);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create menu")))
    }

    async fn find_by_id(&self, id: MenuId) -> Result<Option<Menu>> {
        let menu = sqlx::query_as::<_, Menu>(
            r#"
            SELECT id, restaurant_id, menu_date, items, created_at, updated_at
            FROM menus
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(menu)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Menu>> {
        let menus = sqlx::query_as::<_, Menu>(
            r#"
            SELECT id, restaurant_id, menu_date, items, created_at, updated_at
            FROM menus
            WHERE menu_date = ?
            ORDER BY id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(menus)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Menu>> {
        let menus = sqlx::query_as::<_, Menu>(
            r#"
            SELECT id, restaurant_id, menu_date, items, created_at, updated_at
            FROM menus
            ORDER BY menu_date DESC, id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(menus)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menus")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn update(&self, id: MenuId, input: &UpdateMenuInput) -> Result<Menu> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu {} not found", id)))?;

        let date = input.date.unwrap_or(existing.menu_date);
        let items = input.items.as_ref().unwrap_or(&existing.items);

        sqlx::query(
            r#"
            UPDATE menus
            SET menu_date = ?, items = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(date)
        .bind(sqlx::types::Json(items))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, DUPLICATE_MENU, "Restaurant not found"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu {} not found", id)))
    }

    async fn delete(&self, id: MenuId) -> Result<()> {
        let result = sqlx::query("DELETE FROM menus WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Menu {} not found", id)));
        }

        Ok(())
    }
}
