//! Vote API handlers

use crate::api::{
    authorize, JsonBody, MessageResponse, PaginatedResponse, PaginationQuery, SuccessResponse,
};
use crate::domain::{
    decode_submission, parse_build_version, BatchVotePayload, UpdateVoteInput, Vote, VoteId,
    VoteResults, VoteSubmission, BUILD_VERSION_HEADER,
};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::policy::{PolicyAction, PolicyInput, ResourceScope};
use crate::state::HasServices;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResultsQuery {
    /// Menu date, `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Submit one legacy vote or a batch of weighted votes.
///
/// The body shape is chosen by the `Build-Version` header: below 2 the
/// body is `{"menu_id"}` and the vote is worth one point, otherwise it is
/// `{"votes": [{"menu_id", "points"}]}`.
#[utoipa::path(
    post,
    path = "/api/votes",
    tag = "Votes",
    params(
        ("Build-Version" = i64, Header, description = "Client build version")
    ),
    request_body(
        content = BatchVotePayload,
        description = "Batch body (version >= 2); legacy clients send LegacyVotePayload"
    ),
    responses(
        (status = 201, description = "Vote(s) recorded", body = [Vote]),
        (status = 400, description = "Missing version signal or malformed body"),
        (status = 403, description = "Caller is not an employee"),
        (status = 404, description = "Menu not found"),
        (status = 409, description = "Employee already voted for this menu")
    )
)]
pub async fn submit<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let caps = authorize(&state, &auth, &PolicyInput::global(PolicyAction::VoteSubmit)).await?;
    let employee_id = caps.require_employee()?;

    let version = parse_build_version(
        headers
            .get(BUILD_VERSION_HEADER)
            .map(|value| value.as_bytes()),
    )?;
    let submission = decode_submission(version, &body)?;

    let mut votes = state.vote_service().submit(employee_id, &submission).await?;

    let response = match submission {
        VoteSubmission::Legacy(_) => match votes.pop() {
            Some(vote) => (StatusCode::CREATED, Json(SuccessResponse::new(vote))).into_response(),
            None => StatusCode::CREATED.into_response(),
        },
        VoteSubmission::Batch(_) => {
            (StatusCode::CREATED, Json(SuccessResponse::new(votes))).into_response()
        }
    };
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/api/votes",
    tag = "Votes",
    responses(
        (status = 200, description = "Paginated votes")
    )
)]
pub async fn list<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Query(pagination): Query<PaginationQuery>,
) -> Result<impl IntoResponse> {
    let (votes, total) = state
        .vote_service()
        .list(pagination.page, pagination.per_page)
        .await?;

    Ok(Json(PaginatedResponse::new(
        votes,
        pagination.page,
        pagination.per_page,
        total,
    )))
}

#[utoipa::path(
    get,
    path = "/api/votes/{id}",
    tag = "Votes",
    params(("id" = i64, Path, description = "Vote id")),
    responses(
        (status = 200, description = "Vote", body = Vote),
        (status = 404, description = "Not found")
    )
)]
pub async fn get<S: HasServices>(
    State(state): State<S>,
    _auth: AuthUser,
    Path(id): Path<VoteId>,
) -> Result<impl IntoResponse> {
    let vote = state.vote_service().get(id).await?;
    Ok(Json(SuccessResponse::new(vote)))
}

#[utoipa::path(
    put,
    path = "/api/votes/{id}",
    tag = "Votes",
    params(("id" = i64, Path, description = "Vote id")),
    request_body = UpdateVoteInput,
    responses(
        (status = 200, description = "Updated", body = Vote),
        (status = 400, description = "Malformed body or points out of range"),
        (status = 403, description = "Caller did not cast this vote"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<VoteId>,
    payload: JsonBody<UpdateVoteInput>,
) -> Result<impl IntoResponse> {
    let existing = state.vote_service().get(id).await?;
    authorize(&state, &auth, &modify_scope(&existing)).await?;
    let Json(input) = payload?;
    let vote = state.vote_service().update_points(id, input).await?;
    Ok(Json(SuccessResponse::new(vote)))
}

#[utoipa::path(
    delete,
    path = "/api/votes/{id}",
    tag = "Votes",
    params(("id" = i64, Path, description = "Vote id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Caller did not cast this vote"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Path(id): Path<VoteId>,
) -> Result<impl IntoResponse> {
    let existing = state.vote_service().get(id).await?;
    authorize(&state, &auth, &modify_scope(&existing)).await?;
    state.vote_service().delete(id).await?;
    Ok(Json(MessageResponse::new("Vote deleted successfully")))
}

/// Points per restaurant for today's menus (UTC)
#[utoipa::path(
    get,
    path = "/api/votes/results/today",
    tag = "Votes",
    responses(
        (status = 200, description = "Restaurant name to total points", body = std::collections::BTreeMap<String, i64>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn results_today<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
) -> Result<Json<VoteResults>> {
    authorize(&state, &auth, &PolicyInput::global(PolicyAction::ResultsRead)).await?;
    let results = state.vote_service().results_for_today().await?;
    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/votes/results",
    tag = "Votes",
    params(ResultsQuery),
    responses(
        (status = 200, description = "Restaurant name to total points", body = std::collections::BTreeMap<String, i64>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn results_for_date<S: HasServices>(
    State(state): State<S>,
    auth: AuthUser,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<VoteResults>> {
    authorize(&state, &auth, &PolicyInput::global(PolicyAction::ResultsRead)).await?;
    let results = state.vote_service().results_for_date(query.date).await?;
    Ok(Json(results))
}

fn modify_scope(vote: &Vote) -> PolicyInput {
    PolicyInput {
        action: PolicyAction::VoteModify,
        scope: ResourceScope::Vote(vote.employee_id),
    }
}
