//! Restaurant API handlers

use crate::api::{
    authorize, JsonBody, MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse,
};
use crate::domain::{CreateRestaurantInput, Restaurant, RestaurantId, UpdateRestaurantInput};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::policy::{PolicyAction, PolicyInput};
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

#[utoipa::path(
    get,
    path = "/api/restaurants",
    tag = "Restaurants",
    responses(
        (status = 200, description = "Paginated restaurants"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (restaurants, total) = state
        .restaurant_service()
        .list(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        restaurants,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

#[utoipa::path(
    get,
    path = "/api/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant", body = Restaurant),
        (status = 404, description = "Not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Path(id): Path<RestaurantId>,
) -> Result<impl IntoResponse> {
    let restaurant = state.restaurant_service().get(id).await?;
    Ok(Json(SuccessResponse::new(restaurant)))
}

#[utoipa::path(
    post,
    path = "/api/restaurants",
    tag = "Restaurants",
    request_body = CreateRestaurantInput,
    responses(
        (status = 201, description = "Created", body = Restaurant),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    payload: JsonBody<CreateRestaurantInput>,
) -> Result<impl IntoResponse> {
    authorize(&state, &auth, &PolicyInput::global(PolicyAction::RestaurantWrite)).await?;
    let Json(input) = payload?;
    let restaurant = state.restaurant_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(restaurant))))
}

#[utoipa::path(
    put,
    path = "/api/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = i64, Path, description = "Restaurant id")),
    request_body = UpdateRestaurantInput,
    responses(
        (status = 200, description = "Updated", body = Restaurant),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<RestaurantId>,
    payload: JsonBody<UpdateRestaurantInput>,
) -> Result<impl IntoResponse> {
    authorize(&state, &auth, &PolicyInput::global(PolicyAction::RestaurantWrite)).await?;
    let Json(input) = payload?;
    let restaurant = state.restaurant_service().update(id, input).await?;
    Ok(Json(SuccessResponse::new(restaurant)))
}

#[utoipa::path(
    delete,
    path = "/api/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<RestaurantId>,
) -> Result<impl IntoResponse> {
    authorize(&state, &auth, &PolicyInput::global(PolicyAction::RestaurantWrite)).await?;
    state.restaurant_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Restaurant deleted successfully")))
}
