//! Vote API HTTP Handler Tests

use super::{
    build_test_router, delete_json_with_auth, get_json_with_auth, post_vote, put_json_with_auth,
    TestAppState,
};
use crate::api::{create_test_menu, create_test_restaurant, create_test_token, today};
use axum::http::StatusCode;
use lunchvote_core::api::{MessageResponse, PaginatedResponse, SuccessResponse};
use lunchvote_core::domain::{EmployeeId, MenuId, Vote, VoteId};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::BTreeMap;

const EMPLOYEE_USER: i64 = 10;
const EMPLOYEE: i64 = 100;
const ADMIN_USER: i64 = 1;

/// Two restaurants with a menu each for today (menus 1 and 2) and one employee
async fn setup() -> TestAppState {
    let state = TestAppState::new();
    state.add_user(ADMIN_USER, true).await;
    state.add_employee(EMPLOYEE_USER, EMPLOYEE).await;

    state
        .restaurant_repo
        .add_restaurant(create_test_restaurant(1, "R1", None))
        .await;
    state
        .restaurant_repo
        .add_restaurant(create_test_restaurant(2, "R2", None))
        .await;
    state.menu_repo.add_menu(create_test_menu(1, 1, today())).await;
    state.menu_repo.add_menu(create_test_menu(2, 2, today())).await;
    state
}

fn employee_token() -> String {
    create_test_token(EMPLOYEE_USER)
}

// ============================================================================
// Submission: version routing
// ============================================================================

#[tokio::test]
async fn test_legacy_submission_stores_one_point() {
    let state = setup().await;
    state.menu_repo.add_menu(create_test_menu(7, 1, today())).await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<Vote>>) = post_vote(
        &app,
        Some("1"),
        r#"{"menu_id": 7}"#,
        Some(&employee_token()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let vote = body.unwrap().data;
    assert_eq!(vote.menu_id, MenuId(7));
    assert_eq!(vote.points, 1);
    assert_eq!(vote.employee_id, EmployeeId(EMPLOYEE));
    assert_eq!(state.vote_repo.all().await.len(), 1);
}

#[tokio::test]
async fn test_legacy_submission_ignores_points_field() {
    let state = setup().await;
    let app = build_test_router(state.clone());

    let (status, _): (StatusCode, Option<Value>) = post_vote(
        &app,
        Some("0"),
        r#"{"menu_id": 1, "points": 3}"#,
        Some(&employee_token()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(state.vote_repo.all().await[0].points, 1);
}

#[tokio::test]
async fn test_batch_submission_keeps_caller_points() {
    let state = setup().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<Vec<Vote>>>) = post_vote(
        &app,
        Some("2"),
        r#"{"votes": [{"menu_id": 2, "points": 3}, {"menu_id": 1, "points": 2}]}"#,
        Some(&employee_token()),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let votes = body.unwrap().data;
    assert_eq!(
        votes.iter().map(|v| (v.menu_id, v.points)).collect::<Vec<_>>(),
        vec![(MenuId(2), 3), (MenuId(1), 2)]
    );
}

#[tokio::test]
async fn test_missing_version_signal_is_bad_request() {
    let state = setup().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) =
        post_vote(&app, None, r#"{"menu_id": 1}"#, Some(&employee_token())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "version signal required");
    assert!(state.vote_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_non_integer_version_signal_is_bad_request() {
    let state = setup().await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) =
        post_vote(&app, Some("two"), r#"{"menu_id": 1}"#, Some(&employee_token())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["message"], "version signal must be an integer");
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_request() {
    let state = setup().await;
    let app = build_test_router(state.clone());
    let token = employee_token();

    for (version, body) in [
        ("1", r#"{}"#),
        ("1", r#"{"menu_id": "seven"}"#),
        ("2", r#"{"menu_id": 1}"#),
        ("2", r#"{"votes": {"menu_id": 1}}"#),
        ("2", r#"{"votes": []}"#),
        ("2", r#"{"votes": [{"menu_id": 1, "points": "high"}]}"#),
        ("2", "not json"),
    ] {
        let (status, _): (StatusCode, Option<Value>) =
            post_vote(&app, Some(version), body, Some(&token)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "v{} {}", version, body);
    }
    assert!(state.vote_repo.all().await.is_empty());
}

// ============================================================================
// Submission: validation
// ============================================================================

#[tokio::test]
async fn test_out_of_range_points_rejected() {
    let state = setup().await;
    let app = build_test_router(state.clone());

    for points in [0, 4] {
        let body = format!(r#"{{"votes": [{{"menu_id": 1, "points": {}}}]}}"#, points);
        let (status, _): (StatusCode, Option<Value>) =
            post_vote(&app, Some("2"), &body, Some(&employee_token())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "points {}", points);
    }
    assert!(state.vote_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_unknown_menu_is_not_found() {
    let state = setup().await;
    let app = build_test_router(state.clone());

    let (status, _): (StatusCode, Option<Value>) = post_vote(
        &app,
        Some("2"),
        r#"{"votes": [{"menu_id": 999, "points": 2}]}"#,
        Some(&employee_token()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_repeat_vote_is_conflict() {
    let state = setup().await;
    let app = build_test_router(state.clone());
    let body = r#"{"votes": [{"menu_id": 1, "points": 2}]}"#;

    let (first, _): (StatusCode, Option<Value>) =
        post_vote(&app, Some("2"), body, Some(&employee_token())).await;
    let (second, error): (StatusCode, Option<Value>) =
        post_vote(&app, Some("2"), body, Some(&employee_token())).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(error.unwrap()["error"], "conflict");

    let votes = state.vote_repo.all().await;
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].points, 2);
}

#[tokio::test]
async fn test_batch_is_all_or_nothing() {
    let state = setup().await;
    let app = build_test_router(state.clone());
    let token = employee_token();

    let (status, _): (StatusCode, Option<Value>) = post_vote(
        &app,
        Some("2"),
        r#"{"votes": [{"menu_id": 1, "points": 2}]}"#,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _): (StatusCode, Option<Value>) = post_vote(
        &app,
        Some("2"),
        r#"{"votes": [{"menu_id": 2, "points": 1}, {"menu_id": 1, "points": 3}]}"#,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let votes = state.vote_repo.all().await;
    assert_eq!(votes.len(), 1);
    assert!(votes.iter().all(|v| v.menu_id != MenuId(2)));
}

#[tokio::test]
async fn test_same_menu_twice_in_batch_is_conflict() {
    let state = setup().await;
    let app = build_test_router(state.clone());

    let (status, _): (StatusCode, Option<Value>) = post_vote(
        &app,
        Some("2"),
        r#"{"votes": [{"menu_id": 1, "points": 1}, {"menu_id": 1, "points": 2}]}"#,
        Some(&employee_token()),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(state.vote_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_concurrent_submissions_store_exactly_one_vote() {
    let state = setup().await;
    let app = build_test_router(state.clone());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let (status, _): (StatusCode, Option<Value>) = post_vote(
                &app,
                Some("2"),
                r#"{"votes": [{"menu_id": 1, "points": 3}]}"#,
                Some(&employee_token()),
            )
            .await;
            status
        }));
    }

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(state.vote_repo.all().await.len(), 1);
}

// ============================================================================
// Submission: authorization
// ============================================================================

#[tokio::test]
async fn test_submit_without_token_is_unauthorized() {
    let state = setup().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        post_vote(&app, Some("1"), r#"{"menu_id": 1}"#, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_submit_with_invalid_token_is_unauthorized() {
    let state = setup().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        post_vote(&app, Some("1"), r#"{"menu_id": 1}"#, Some("not-a-jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_employee_cannot_vote() {
    let state = setup().await;
    let app = build_test_router(state.clone());

    let (status, _): (StatusCode, Option<Value>) = post_vote(
        &app,
        Some("1"),
        r#"{"menu_id": 1}"#,
        Some(&create_test_token(ADMIN_USER)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(state.vote_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_forbidden_checked_before_version_signal() {
    let state = setup().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = post_vote(
        &app,
        None,
        "garbage",
        Some(&create_test_token(ADMIN_USER)),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_for_unknown_user_is_unauthorized() {
    let state = setup().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = post_vote(
        &app,
        Some("1"),
        r#"{"menu_id": 1}"#,
        Some(&create_test_token(4242)),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Results
// ============================================================================

#[tokio::test]
async fn test_results_today_sums_points_per_restaurant() {
    let state = setup().await;
    state.add_employee(11, 101).await;
    state.add_employee(12, 102).await;
    // R1 gets 2 + 1, R2 gets 3
    state.menu_repo.add_menu(create_test_menu(3, 1, today().pred_opt().unwrap())).await;
    for (id, employee, menu, points) in [(1, 100, 1, 2), (2, 101, 1, 1), (3, 102, 2, 3), (4, 100, 3, 3)] {
        state
            .vote_repo
            .add_vote(Vote {
                id: VoteId(id),
                employee_id: EmployeeId(employee),
                menu_id: MenuId(menu),
                points,
                ..Default::default()
            })
            .await;
    }
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<BTreeMap<String, i64>>) = get_json_with_auth(
        &app,
        "/api/votes/results/today",
        &create_test_token(ADMIN_USER),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let expected: BTreeMap<String, i64> =
        [("R1".to_string(), 3), ("R2".to_string(), 3)].into_iter().collect();
    assert_eq!(body.unwrap(), expected);
}

#[tokio::test]
async fn test_results_omit_restaurants_without_votes() {
    let state = setup().await;
    state
        .vote_repo
        .add_vote(Vote {
            id: VoteId(1),
            employee_id: EmployeeId(EMPLOYEE),
            menu_id: MenuId(2),
            points: 2,
            ..Default::default()
        })
        .await;
    let app = build_test_router(state);

    let (status, body): (StatusCode, Option<Value>) = get_json_with_auth(
        &app,
        "/api/votes/results/today",
        &create_test_token(ADMIN_USER),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({"R2": 2}));
}

#[tokio::test]
async fn test_results_for_explicit_date() {
    let state = setup().await;
    let yesterday = today().pred_opt().unwrap();
    state.menu_repo.add_menu(create_test_menu(5, 2, yesterday)).await;
    state
        .vote_repo
        .add_vote(Vote {
            id: VoteId(1),
            employee_id: EmployeeId(EMPLOYEE),
            menu_id: MenuId(5),
            points: 3,
            ..Default::default()
        })
        .await;
    let app = build_test_router(state);
    let token = create_test_token(ADMIN_USER);

    let (status, body): (StatusCode, Option<Value>) = get_json_with_auth(
        &app,
        &format!("/api/votes/results?date={}", yesterday),
        &token,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({"R2": 3}));

    let (status, body): (StatusCode, Option<Value>) =
        get_json_with_auth(&app, "/api/votes/results/today", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap(), json!({}));
}

#[tokio::test]
async fn test_non_admin_cannot_read_results() {
    let state = setup().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        get_json_with_auth(&app, "/api/votes/results/today", &employee_token()).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ============================================================================
// Vote management
// ============================================================================

async fn setup_with_vote() -> TestAppState {
    let state = setup().await;
    state.add_employee(11, 101).await;
    state
        .vote_repo
        .add_vote(Vote {
            id: VoteId(1),
            employee_id: EmployeeId(EMPLOYEE),
            menu_id: MenuId(1),
            points: 1,
            ..Default::default()
        })
        .await;
    state
}

#[tokio::test]
async fn test_list_and_get_votes() {
    let state = setup_with_vote().await;
    let app = build_test_router(state);
    let token = create_test_token(11);

    let (status, body): (StatusCode, Option<PaginatedResponse<Vote>>) =
        get_json_with_auth(&app, "/api/votes", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().pagination.total, 1);

    let (status, body): (StatusCode, Option<SuccessResponse<Vote>>) =
        get_json_with_auth(&app, "/api/votes/1", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.menu_id, MenuId(1));
}

#[tokio::test]
async fn test_owner_can_change_points() {
    let state = setup_with_vote().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<SuccessResponse<Vote>>) = put_json_with_auth(
        &app,
        "/api/votes/1",
        &json!({"points": 3}),
        &employee_token(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap().data.points, 3);
}

#[tokio::test]
async fn test_update_rejects_out_of_range_points() {
    let state = setup_with_vote().await;
    let app = build_test_router(state.clone());

    let (status, _): (StatusCode, Option<Value>) = put_json_with_auth(
        &app,
        "/api/votes/1",
        &json!({"points": 0}),
        &employee_token(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(state.vote_repo.all().await[0].points, 1);
}

#[tokio::test]
async fn test_update_with_mistyped_points_is_bad_request() {
    let state = setup_with_vote().await;
    let app = build_test_router(state.clone());

    let (status, body): (StatusCode, Option<Value>) = put_json_with_auth(
        &app,
        "/api/votes/1",
        &json!({"points": "2"}),
        &employee_token(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.unwrap()["error"], "bad_request");
    assert_eq!(state.vote_repo.all().await[0].points, 1);
}

#[tokio::test]
async fn test_ownership_checked_before_update_body() {
    let state = setup_with_vote().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) = put_json_with_auth(
        &app,
        "/api/votes/1",
        &json!({"points": "2"}),
        &create_test_token(11),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_other_employee_cannot_modify_vote() {
    let state = setup_with_vote().await;
    let app = build_test_router(state.clone());
    let other = create_test_token(11);

    let (status, _): (StatusCode, Option<Value>) =
        put_json_with_auth(&app, "/api/votes/1", &json!({"points": 3}), &other).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json_with_auth(&app, "/api/votes/1", &other).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(state.vote_repo.all().await.len(), 1);
}

#[tokio::test]
async fn test_owner_can_delete_vote_and_vote_again() {
    let state = setup_with_vote().await;
    let app = build_test_router(state.clone());
    let token = employee_token();

    let (status, body): (StatusCode, Option<MessageResponse>) =
        delete_json_with_auth(&app, "/api/votes/1", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap().message.contains("deleted"));

    let (status, _): (StatusCode, Option<Value>) =
        post_vote(&app, Some("1"), r#"{"menu_id": 1}"#, Some(&token)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_modify_missing_vote_is_not_found() {
    let state = setup().await;
    let app = build_test_router(state);

    let (status, _): (StatusCode, Option<Value>) =
        delete_json_with_auth(&app, "/api/votes/77", &employee_token()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
