//! Restaurant repository

use crate::domain::{
    CreateRestaurantInput, Restaurant, RestaurantId, UpdateRestaurantInput, UserId,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn create(&self, input: &CreateRestaurantInput) -> Result<Restaurant>;
    async fn find_by_id(&self, id: RestaurantId) -> Result<Option<Restaurant>>;
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Restaurant>>;
    async fn count(&self) -> Result<i64>;
    /// Restaurants referencing `owner_id` as their owner
    async fn find_ids_by_owner(&self, owner_id: UserId) -> Result<Vec<RestaurantId>>;
    async fn update(&self, id: RestaurantId, input: &UpdateRestaurantInput) -> Result<Restaurant>;
    /// Delete a restaurant; menus and their votes cascade in storage
    async fn delete(&self, id: RestaurantId) -> Result<()>;
}

pub struct RestaurantRepositoryImpl {
    pool: MySqlPool,
}

impl RestaurantRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantRepository for RestaurantRepositoryImpl {
    async fn create(&self, input: &CreateRestaurantInput) -> Result<Restaurant> {
        let result = sqlx::query(
            r#"
            INSERT INTO restaurants (name, address, phone_number, owner_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&input.name)
        .bind(&input.address)
        .bind(&input.phone_number)
        .bind(input.owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Restaurant already exists", "Owner not found"))?;

        let id = RestaurantId(result.last_insert_id() as i64);
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create restaurant")))
    }

    async fn find_by_id(&self, id: RestaurantId) -> Result<Option<Restaurant>> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, name, address, phone_number, owner_id, created_at, updated_at
            FROM restaurants
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(restaurant)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Restaurant>> {
        let restaurants = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT id, name, address, phone_number, owner_id, created_at, updated_at
            FROM restaurants
            ORDER BY name ASC, id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(restaurants)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM restaurants")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn find_ids_by_owner(&self, owner_id: UserId) -> Result<Vec<RestaurantId>> {
        let rows: Vec<(RestaurantId,)> =
            sqlx::query_as("SELECT id FROM restaurants WHERE owner_id = ? ORDER BY id")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn update(&self, id: RestaurantId, input: &UpdateRestaurantInput) -> Result<Restaurant> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

        let name = input.name.as_ref().unwrap_or(&existing.name);
        let address = input.address.as_ref().unwrap_or(&existing.address);
        let phone_number = input.phone_number.as_ref().unwrap_or(&existing.phone_number);
        let owner_id = input.owner_id.or(existing.owner_id);

        sqlx::query(
            r#"
            UPDATE restaurants
            SET name = ?, address = ?, phone_number = ?, owner_id = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone_number)
        .bind(owner_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Restaurant already exists", "Owner not found"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))
    }

    async fn delete(&self, id: RestaurantId) -> Result<()> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Restaurant {} not found", id)));
        }

        Ok(())
    }
}
