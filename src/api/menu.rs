//! Menu API handlers
//!
//! Reads are open to any authenticated caller. Writes are limited to the
//! owner of the restaurant the menu belongs to.

use crate::api::{
    authorize, JsonBody, MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse,
};
use crate::domain::{CreateMenuInput, Menu, MenuId, RestaurantId, UpdateMenuInput};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::policy::{PolicyAction, PolicyInput, ResourceScope};
use crate::state::HasServices;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

fn write_scope(restaurant_id: RestaurantId) -> PolicyInput {
    PolicyInput {
        action: PolicyAction::MenuWrite,
        scope: ResourceScope::Restaurant(restaurant_id),
    }
}

#[utoipa::path(
    get,
    path = "/api/menus",
    tag = "Menus",
    responses(
        (status = 200, description = "Paginated menus")
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (menus, total) = state
        .menu_service()
        .list(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        menus,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

/// Menus dated today (UTC)
#[utoipa::path(
    get,
    path = "/api/menus/today",
    tag = "Menus",
    responses(
        (status = 200, description = "Today's menus", body = [Menu])
    )
)]
pub async fn today<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
) -> Result<impl IntoResponse> {
    let menus = state.menu_service().today().await?;
    Ok(Json(SuccessResponse::new(menus)))
}

#[utoipa::path(
    get,
    path = "/api/menus/{id}",
    tag = "Menus",
    params(("id" = i64, Path, description = "Menu id")),
    responses(
        (status = 200, description = "Menu", body = Menu),
        (status = 404, description = "Not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Path(id): Path<MenuId>,
) -> Result<impl IntoResponse> {
    let menu = state.menu_service().get(id).await?;
    Ok(Json(SuccessResponse::new(menu)))
}

#[utoipa::path(
    post,
    path = "/api/menus",
    tag = "Menus",
    request_body = CreateMenuInput,
    responses(
        (status = 201, description = "Created", body = Menu),
        (status = 403, description = "Caller does not own the restaurant"),
        (status = 409, description = "Restaurant already has a menu for this date")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    payload: JsonBody<CreateMenuInput>,
) -> Result<impl IntoResponse> {
    let Json(input) = payload?;
    authorize(&state, &auth, &write_scope(input.restaurant_id)).await?;
    let menu = state.menu_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(menu))))
}

#[utoipa::path(
    put,
    path = "/api/menus/{id}",
    tag = "Menus",
    params(("id" = i64, Path, description = "Menu id")),
    request_body = UpdateMenuInput,
    responses(
        (status = 200, description = "Updated", body = Menu),
        (status = 403, description = "Caller does not own the restaurant"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<MenuId>,
    payload: JsonBody<UpdateMenuInput>,
) -> Result<impl IntoResponse> {
    let existing = state.menu_service().get(id).await?;
    authorize(&state, &auth, &write_scope(existing.restaurant_id)).await?;
    let Json(input) = payload?;
    let menu = state.menu_service().update(id, input).await?;
    Ok(Json(SuccessResponse::new(menu)))
}

#[utoipa::path(
    delete,
    path = "/api/menus/{id}",
    tag = "Menus",
    params(("id" = i64, Path, description = "Menu id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Caller does not own the restaurant"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<MenuId>,
) -> Result<impl IntoResponse> {
    let existing = state.menu_service().get(id).await?;
    authorize(&state, &auth, &write_scope(existing.restaurant_id)).await?;
    state.menu_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Menu deleted successfully")))
}
