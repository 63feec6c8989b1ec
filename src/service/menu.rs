//! Menu business logic

use crate::domain::{check_menu_items, CreateMenuInput, Menu, MenuId, UpdateMenuInput};
use crate::error::{AppError, Result};
use crate::repository::{MenuRepository, RestaurantRepository};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

pub struct MenuService<M: MenuRepository, R: RestaurantRepository> {
    repo: Arc<M>,
    restaurant_repo: Arc<R>,
}

impl<M: MenuRepository, R: RestaurantRepository> MenuService<M, R> {
    pub fn new(repo: Arc<M>, restaurant_repo: Arc<R>) -> Self {
        Self {
            repo,
            restaurant_repo,
        }
    }

    pub async fn create(&self, input: CreateMenuInput) -> Result<Menu> {
        check_menu_items(&input.items)?;
        if self
            .restaurant_repo
            .find_by_id(input.restaurant_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Restaurant {} not found",
                input.restaurant_id
            )));
        }

        let menu = self.repo.create(&input).await?;
        tracing::info!(
            menu_id = %menu.id,
            restaurant_id = %menu.restaurant_id,
            date = %menu.menu_date,
            "Menu created"
        );
        Ok(menu)
    }

    pub async fn get(&self, id: MenuId) -> Result<Menu> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<Menu>, i64)> {
        let offset = (page - 1) * per_page;
        let menus = self.repo.list(offset, per_page).await?;
        let total = self.repo.count().await?;
        Ok((menus, total))
    }

    pub async fn for_date(&self, date: NaiveDate) -> Result<Vec<Menu>> {
        self.repo.find_by_date(date).await
    }

    /// Menus dated on the current UTC day
    pub async fn today(&self) -> Result<Vec<Menu>> {
        self.for_date(Utc::now().date_naive()).await
    }

    pub async fn update(&self, id: MenuId, input: UpdateMenuInput) -> Result<Menu> {
        if let Some(items) = &input.items {
            check_menu_items(items)?;
        }
        let _ = self.get(id).await?;
        self.repo.update(id, &input).await
    }

    pub async fn delete(&self, id: MenuId) -> Result<()> {
        let _ = self.get(id).await?;
        self.repo.delete(id).await
    }
}
