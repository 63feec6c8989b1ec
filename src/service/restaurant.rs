//! Restaurant business logic

use crate::domain::{CreateRestaurantInput, Restaurant, RestaurantId, UpdateRestaurantInput};
use crate::error::{AppError, Result};
use crate::repository::RestaurantRepository;
use std::sync::Arc;
use validator::Validate;

pub struct RestaurantService<R: RestaurantRepository> {
    repo: Arc<R>,
}

impl<R: RestaurantRepository> RestaurantService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateRestaurantInput) -> Result<Restaurant> {
        input.validate()?;
        let restaurant = self.repo.create(&input).await?;
        tracing::info!(restaurant_id = %restaurant.id, "Restaurant created");
        Ok(restaurant)
    }

    pub async fn get(&self, id: RestaurantId) -> Result<Restaurant> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<Restaurant>, i64)> {
        let offset = (page - 1) * per_page;
        let restaurants = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((restaurants, total))
    }

    pub async fn update(&self, id: RestaurantId, input: UpdateRestaurantInput) -> Result<Restaurant> {
        input.validate()?;
        let _ = self.get(id).await?;
        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: RestaurantId) -> Result<()> {
        let _ = self.get(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(restaurant_id = %id, "Restaurant deleted");
        Ok(())
    }
}
