//! Employee API handlers. Every operation is admin-only.

use crate::api::{
    authorize, JsonBody, MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse,
};
use crate::domain::{CreateEmployeeInput, Employee, EmployeeId, UpdateEmployeeInput};
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

fn manage() -> PolicyInput {
    PolicyInput::global(PolicyAction::EmployeeManage)
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "Paginated employees"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    authorize(&state, &auth, &manage()).await?;
    let (employees, total) = state
        .employee_service()
        .list(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        employees,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee", body = Employee),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<EmployeeId>,
) -> Result<impl IntoResponse> {
    authorize(&state, &auth, &manage()).await?;
    let employee = state.employee_service().get(id).await?;
    Ok(Json(SuccessResponse::new(employee)))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeeInput,
    responses(
        (status = 201, description = "Created", body = Employee),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User already has an employee profile")
    )
)]
pub async fn create<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    payload: JsonBody<CreateEmployeeInput>,
) -> Result<impl IntoResponse> {
    authorize(&state, &auth, &manage()).await?;
    let Json(input) = payload?;
    let employee = state.employee_service().create(input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(employee))))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = UpdateEmployeeInput,
    responses(
        (status = 200, description = "Updated", body = Employee),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<EmployeeId>,
    payload: JsonBody<UpdateEmployeeInput>,
) -> Result<impl IntoResponse> {
    authorize(&state, &auth, &manage()).await?;
    let Json(input) = payload?;
    let employee = state.employee_service().update(id, input).await?;
    Ok(Json(SuccessResponse::new(employee)))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<EmployeeId>,
) -> Result<impl IntoResponse> {
    authorize(&state, &auth, &manage()).await?;
    state.employee_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Employee deleted successfully")))
}
