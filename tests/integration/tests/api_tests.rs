//! API Integration Tests
//!
//! Each test spawns its own server with in-memory storage, so no external
//! services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, locked_config, prediction_body, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    for path in ["/health", "/health/live"] {
        let response = server.get(path).await.expect("Request failed");
        let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body["status"], "healthy");
    }
}

#[tokio::test]
async fn test_health_ready_with_memory_storage() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["storage"], "healthy");
    assert_eq!(body["checks"]["change_bus"], "disabled");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/auth/me").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_sign_in_open_event() {
    let server = TestServer::start().await.expect("Failed to start server");
    let email = unique_email();

    let auth = sign_in(&server, &email).await.unwrap();

    assert_eq!(auth.user.email, email);
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
    assert!(!auth.user.session_id.is_empty());
}

#[tokio::test]
async fn test_sign_in_rejects_bad_email() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/v1/auth/sign-in", &SignInRequest::new("not-an-email"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_locked_event_requires_passcode() {
    let server = TestServer::start_with_config(locked_config("stork-2024").unwrap())
        .await
        .expect("Failed to start server");
    let email = unique_email();

    let response = server
        .post("/api/v1/auth/sign-in", &SignInRequest::new(&email))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/sign-in",
            &SignInRequest::with_passcode(&email, "wrong"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/sign-in",
            &SignInRequest::with_passcode(&email, "stork-2024"),
        )
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.email, email);
}

#[tokio::test]
async fn test_protected_routes_need_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    for path in ["/api/v1/auth/me", "/api/v1/names", "/api/v1/predictions"] {
        let response = server.get(path).await.unwrap();
        let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
        assert_eq!(body.error.code, "MISSING_AUTH");
    }

    let response = server
        .get_auth("/api/v1/auth/me", "not-a-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_me_and_sign_out() {
    let server = TestServer::start().await.expect("Failed to start server");
    let email = unique_email();
    let auth = sign_in(&server, &email).await.unwrap();

    let response = server
        .get_auth("/api/v1/auth/me", &auth.access_token)
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, email);
    assert_eq!(me.session_id, auth.user.session_id);

    let response = server
        .post_empty_auth("/api/v1/auth/sign-out", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Every token issued for the session stops working
    let response = server
        .get_auth("/api/v1/auth/me", &auth.access_token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "SESSION_REVOKED");

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({"refresh_token": auth.refresh_token}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    let server = TestServer::start().await.expect("Failed to start server");
    let email = unique_email();
    let auth = sign_in(&server, &email).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({"refresh_token": auth.refresh_token}),
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.email, email);
    assert_eq!(refreshed.user.session_id, auth.user.session_id);

    // An access token is not a refresh token
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({"refresh_token": auth.access_token}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Name Tests
// ============================================================================

#[tokio::test]
async fn test_suggest_name() {
    let server = TestServer::start().await.expect("Failed to start server");
    let email = unique_email();
    let auth = sign_in(&server, &email).await.unwrap();

    let response = server
        .post_auth("/api/v1/names", &auth.access_token, &NameRequest::girl("Ana-Maria"))
        .await
        .unwrap();
    let name: NameResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(name.key, "ANA_MARIA-g");
    assert_eq!(name.display_name, "Ana-Maria");
    assert!(name.is_girl);
    assert!(!name.is_boy);
    assert_eq!(name.submitter_email, email);
    assert_eq!(name.hint.as_deref(), Some("(g)"));
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let server = TestServer::start().await.expect("Failed to start server");
    let amy = sign_in(&server, &unique_email()).await.unwrap();
    let bob = sign_in(&server, &unique_email()).await.unwrap();

    let response = server
        .post_auth("/api/v1/names", &amy.access_token, &NameRequest::boy("Theo"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Case and punctuation collapse into the same key
    let response = server
        .post_auth("/api/v1/names", &bob.access_token, &NameRequest::boy("theo"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "NAME_EXISTS");
    assert_eq!(body.error.message, "Name already exists!");

    // A different category is a different name
    let response = server
        .post_auth("/api/v1/names", &bob.access_token, &NameRequest::girl("Theo"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_empty_name_rejected_but_blanks_are_a_name() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();

    let response = server
        .post_auth("/api/v1/names", &auth.access_token, &NameRequest::girl(""))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");

    let response = server
        .post_auth("/api/v1/names", &auth.access_token, &NameRequest::girl("  "))
        .await
        .unwrap();
    let name: NameResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(name.key, "__-g");
    assert_eq!(name.display_name, "  ");
}

#[tokio::test]
async fn test_likes_only_count_for_matching_category() {
    let server = TestServer::start().await.expect("Failed to start server");
    let amy = sign_in(&server, &unique_email()).await.unwrap();
    let bob = sign_in(&server, &unique_email()).await.unwrap();

    let response = server
        .post_auth("/api/v1/names", &amy.access_token, &NameRequest::either("Jordan"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    for token in [&amy.access_token, &bob.access_token] {
        let response = server
            .post_auth("/api/v1/names/likes", token, &NameRequest::either("Jordan"))
            .await
            .unwrap();
        let vote: VoteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(vote.name_key, "JORDAN-bg");
        assert!(!vote.id.is_empty());
    }

    // Liked with only the boy flag: stored under JORDAN-b, counted nowhere
    let response = server
        .post_auth("/api/v1/names/likes", &bob.access_token, &NameRequest::boy("Jordan"))
        .await
        .unwrap();
    let stray: VoteResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(stray.name_key, "JORDAN-b");

    let response = server
        .get_auth("/api/v1/names", &amy.access_token)
        .await
        .unwrap();
    let board: NameBoard = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(board.rows.len(), 1);
    assert_eq!(board.row("JORDAN-bg").map(|row| row.likes), Some(2));
    assert_eq!(
        board.row("JORDAN-bg").and_then(|row| row.hint.as_deref()),
        Some("(b/g)")
    );
}

#[tokio::test]
async fn test_board_sort_and_filter() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();
    let token = &auth.access_token;

    for request in [
        NameRequest::girl("Zoe"),
        NameRequest::boy("adam"),
        NameRequest::either("Max"),
    ] {
        let response = server.post_auth("/api/v1/names", token, &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
    let response = server
        .post_auth("/api/v1/names/likes", token, &NameRequest::girl("Zoe"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth("/api/v1/names?sort=alpha", token)
        .await
        .unwrap();
    let board: NameBoard = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(board.sort, "alpha");
    assert_eq!(board.visible_names(), vec!["adam", "Max", "Zoe"]);

    let response = server
        .get_auth("/api/v1/names?sort=alpha&reverse=true", token)
        .await
        .unwrap();
    let board: NameBoard = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(board.reverse);
    assert_eq!(board.visible_names(), vec!["Zoe", "Max", "adam"]);

    let response = server
        .get_auth("/api/v1/names?sort=likes", token)
        .await
        .unwrap();
    let board: NameBoard = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(board.visible_names(), vec!["Zoe", "adam", "Max"]);

    // Hidden rows stay in the payload but are flagged
    let response = server
        .get_auth("/api/v1/names?sort=alpha&girls=false", token)
        .await
        .unwrap();
    let board: NameBoard = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!board.show_girls);
    assert!(board.show_boys);
    assert_eq!(board.rows.len(), 3);
    assert_eq!(board.visible_count, 2);
    assert_eq!(board.visible_names(), vec!["adam", "Max"]);
}

#[tokio::test]
async fn test_bad_board_query() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();

    let response = server
        .get_auth("/api/v1/names?sort=loudest", &auth.access_token)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

// ============================================================================
// Prediction Tests
// ============================================================================

#[tokio::test]
async fn test_my_prediction_defaults() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();

    let response = server
        .get_auth("/api/v1/predictions/@me", &auth.access_token)
        .await
        .unwrap();
    let mine: MyPrediction = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(mine.saved.is_none());
    assert_eq!(mine.draft.sex, "girl");
    assert_eq!(mine.draft.weight, Weight { lbs: 0, oz: 0 });
    assert_eq!(mine.draft.delivery_date, "2024-11-06");
    assert_eq!(mine.draft.eye_colour, "");
}

#[tokio::test]
async fn test_update_prediction() {
    let server = TestServer::start().await.expect("Failed to start server");
    let email = unique_email();
    let auth = sign_in(&server, &email).await.unwrap();
    let body = prediction_body("boy", 7, 4, "2024-11-20", "blue");

    let response = server
        .put_auth("/api/v1/predictions/@me", &auth.access_token, &body)
        .await
        .unwrap();
    let first: PredictionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.owner_email, email);
    assert_eq!(first.sex, "boy");
    assert_eq!(first.weight, Weight { lbs: 7, oz: 4 });
    assert_eq!(first.weight_label, "7 lbs 4 oz");
    assert_eq!(first.delivery_date, "2024-11-20");
    assert_eq!(first.eye_colour, "blue");

    // Same content again still moves the timestamp forward
    let response = server
        .put_auth("/api/v1/predictions/@me", &auth.access_token, &body)
        .await
        .unwrap();
    let second: PredictionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(second.last_modified_at > first.last_modified_at);

    let response = server
        .get_auth("/api/v1/predictions/@me", &auth.access_token)
        .await
        .unwrap();
    let mine: MyPrediction = assert_json(response, StatusCode::OK).await.unwrap();
    let saved = mine.saved.expect("saved prediction");
    assert_eq!(saved.last_modified_at, second.last_modified_at);
    assert_eq!(mine.draft.eye_colour, "blue");
}

#[tokio::test]
async fn test_update_prediction_validation() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();

    let long_colour = "g".repeat(51);
    let response = server
        .put_auth(
            "/api/v1/predictions/@me",
            &auth.access_token,
            &prediction_body("girl", 6, 2, "2024-11-01", &long_colour),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put_auth(
            "/api/v1/predictions/@me",
            &auth.access_token,
            &prediction_body("dragon", 6, 2, "2024-11-01", "brown"),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_edit_single_field() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();
    let token = &auth.access_token;

    let response = server
        .put_auth(
            "/api/v1/predictions/@me",
            token,
            &prediction_body("boy", 8, 1, "2024-10-30", "brown"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .patch_auth(
            "/api/v1/predictions/@me",
            token,
            &json!({"field": "eye_colour", "value": "hazel"}),
        )
        .await
        .unwrap();
    let edited: PredictionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.eye_colour, "hazel");
    // other fields carried over from the stored record
    assert_eq!(edited.sex, "boy");
    assert_eq!(edited.weight, Weight { lbs: 8, oz: 1 });
    assert_eq!(edited.delivery_date, "2024-10-30");

    let response = server
        .patch_auth(
            "/api/v1/predictions/@me",
            token,
            &json!({"field": "ounces", "value": 12}),
        )
        .await
        .unwrap();
    let edited: PredictionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.weight, Weight { lbs: 8, oz: 12 });

    let response = server
        .patch_auth(
            "/api/v1/predictions/@me",
            token,
            &json!({"field": "hair", "value": "red"}),
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_prediction_board() {
    let server = TestServer::start().await.expect("Failed to start server");
    let zed = sign_in(&server, "zed@example.com").await.unwrap();
    let amy = sign_in(&server, "amy@example.com").await.unwrap();

    for (token, sex) in [(&zed.access_token, "boy"), (&amy.access_token, "girl")] {
        let response = server
            .put_auth(
                "/api/v1/predictions/@me",
                token,
                &prediction_body(sex, 7, 0, "2024-11-10", "grey"),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .get_auth("/api/v1/predictions", &zed.access_token)
        .await
        .unwrap();
    let board: PredictionBoard = assert_json(response, StatusCode::OK).await.unwrap();

    let owners: Vec<&str> = board
        .predictions
        .iter()
        .map(|p| p.owner_email.as_str())
        .collect();
    assert_eq!(owners, vec!["amy@example.com", "zed@example.com"]);
    let mine = board.mine.expect("own prediction");
    assert_eq!(mine.owner_email, "zed@example.com");
    assert_eq!(board.draft.sex, "boy");
}
