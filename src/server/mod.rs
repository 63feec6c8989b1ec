//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::ObservabilityLayer;
use crate::openapi::ApiDoc;
use crate::repository::{
    employee::EmployeeRepositoryImpl, menu::MenuRepositoryImpl,
    restaurant::RestaurantRepositoryImpl, user::UserRepositoryImpl, vote::VoteRepositoryImpl,
};
use crate::service::{
    CapabilityService, EmployeeService, MenuService, RestaurantService, VoteService,
};
use crate::state::HasServices;
use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub jwt_manager: JwtManager,
    pub capability_service: Arc<
        CapabilityService<UserRepositoryImpl, RestaurantRepositoryImpl, EmployeeRepositoryImpl>,
    >,
    pub restaurant_service: Arc<RestaurantService<RestaurantRepositoryImpl>>,
    pub menu_service: Arc<MenuService<MenuRepositoryImpl, RestaurantRepositoryImpl>>,
    pub employee_service: Arc<EmployeeService<EmployeeRepositoryImpl, UserRepositoryImpl>>,
    pub vote_service: Arc<VoteService<VoteRepositoryImpl, MenuRepositoryImpl>>,
    pub prometheus_handle: Option<PrometheusHandle>,
}

impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type RestaurantRepo = RestaurantRepositoryImpl;
    type MenuRepo = MenuRepositoryImpl;
    type EmployeeRepo = EmployeeRepositoryImpl;
    type VoteRepo = VoteRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    fn capability_service(
        &self,
    ) -> &CapabilityService<Self::UserRepo, Self::RestaurantRepo, Self::EmployeeRepo> {
        &self.capability_service
    }

    fn restaurant_service(&self) -> &RestaurantService<Self::RestaurantRepo> {
        &self.restaurant_service
    }

    fn menu_service(&self) -> &MenuService<Self::MenuRepo, Self::RestaurantRepo> {
        &self.menu_service
    }

    fn employee_service(&self) -> &EmployeeService<Self::EmployeeRepo, Self::UserRepo> {
        &self.employee_service
    }

    fn vote_service(&self) -> &VoteService<Self::VoteRepo, Self::MenuRepo> {
        &self.vote_service
    }

    fn prometheus_handle(&self) -> Option<&PrometheusHandle> {
        self.prometheus_handle.as_ref()
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

/// Run the HTTP server until it is shut down
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");

    let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
    let restaurant_repo = Arc::new(RestaurantRepositoryImpl::new(db_pool.clone()));
    let menu_repo = Arc::new(MenuRepositoryImpl::new(db_pool.clone()));
    let employee_repo = Arc::new(EmployeeRepositoryImpl::new(db_pool.clone()));
    let vote_repo = Arc::new(VoteRepositoryImpl::new(db_pool.clone()));

    let jwt_manager = JwtManager::new(config.jwt.clone());

    let capability_service = Arc::new(CapabilityService::new(
        user_repo.clone(),
        restaurant_repo.clone(),
        employee_repo.clone(),
    ));
    let restaurant_service = Arc::new(RestaurantService::new(restaurant_repo.clone()));
    let menu_service = Arc::new(MenuService::new(menu_repo.clone(), restaurant_repo));
    let employee_service = Arc::new(EmployeeService::new(employee_repo, user_repo));
    let vote_service = Arc::new(VoteService::new(
        vote_repo,
        menu_repo,
        config.voting.max_batch_size,
    ));

    let http_addr = config.http_addr();

    let state = AppState {
        config: Arc::new(config),
        db_pool,
        jwt_manager,
        capability_service,
        restaurant_service,
        menu_service,
        employee_service,
        vote_service,
        prometheus_handle,
    };

    let app = build_router(state);

    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", http_addr))?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router with generic state type
///
/// Generic over the state so the production `AppState` and the in-memory
/// test state share every route.
pub fn build_router<S: HasServices>(state: S) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // System endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/metrics", get(api::metrics::metrics_handler::<S>))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::build()) }),
        )
        // Vote endpoints
        .route(
            "/api/votes",
            get(api::vote::list::<S>).post(api::vote::submit::<S>),
        )
        .route(
            "/api/votes/results/today",
            get(api::vote::results_today::<S>),
        )
        .route("/api/votes/results", get(api::vote::results_for_date::<S>))
        .route(
            "/api/votes/{id}",
            get(api::vote::get::<S>)
                .put(api::vote::update::<S>)
                .delete(api::vote::delete::<S>),
        )
        // Menu endpoints
        .route(
            "/api/menus",
            get(api::menu::list::<S>).post(api::menu::create::<S>),
        )
        .route("/api/menus/today", get(api::menu::today::<S>))
        .route(
            "/api/menus/{id}",
            get(api::menu::get::<S>)
                .put(api::menu::update::<S>)
                .delete(api::menu::delete::<S>),
        )
        // Restaurant endpoints
        .route(
            "/api/restaurants",
            get(api::restaurant::list::<S>).post(api::restaurant::create::<S>),
        )
        .route(
            "/api/restaurants/{id}",
            get(api::restaurant::get::<S>)
                .put(api::restaurant::update::<S>)
                .delete(api::restaurant::delete::<S>),
        )
        // Employee endpoints
        .route(
            "/api/employees",
            get(api::employee::list::<S>).post(api::employee::create::<S>),
        )
        .route(
            "/api/employees/{id}",
            get(api::employee::get::<S>)
                .put(api::employee::update::<S>)
                .delete(api::employee::delete::<S>),
        )
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
