//! Live websocket screen tests
//!
//! Run with: cargo test -p integration-tests --test live_tests

use integration_tests::{assert_status, fixtures::*, prediction_body, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn visible_names(names_data: &Value) -> Vec<String> {
    names_data["board"]["rows"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter(|row| row["visible"] == true)
                .filter_map(|row| row["display_name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

fn likes_of(names_data: &Value, key: &str) -> Option<u64> {
    names_data["board"]["rows"]
        .as_array()?
        .iter()
        .find(|row| row["key"] == key)?["likes"]
        .as_u64()
}

#[tokio::test]
async fn test_live_names_rejects_bad_token() {
    let server = TestServer::start().await.expect("Failed to start server");

    assert!(server.live("/api/v1/live/names", "garbage").await.is_err());
}

#[tokio::test]
async fn test_live_names_ready_then_board() {
    let server = TestServer::start().await.expect("Failed to start server");
    let email = unique_email();
    let auth = sign_in(&server, &email).await.unwrap();

    let mut socket = server
        .live("/api/v1/live/names", &auth.access_token)
        .await
        .unwrap();

    let ready = socket.next_frame().await.unwrap();
    assert_eq!(ready["type"], "READY");
    assert_eq!(ready["data"]["email"], email.as_str());
    assert_eq!(ready["data"]["screen"], "names");

    let names = socket.next_frame().await.unwrap();
    assert_eq!(names["type"], "NAMES");
    assert_eq!(names["data"]["board"]["rows"], json!([]));
    assert_eq!(names["data"]["transitions"], json!([]));
}

#[tokio::test]
async fn test_live_names_pushes_writes_from_anyone() {
    let server = TestServer::start().await.expect("Failed to start server");
    let amy = sign_in(&server, &unique_email()).await.unwrap();
    let bob = sign_in(&server, &unique_email()).await.unwrap();

    let mut socket = server
        .live("/api/v1/live/names?sort=alpha", &amy.access_token)
        .await
        .unwrap();
    socket.next_of_type("NAMES").await.unwrap();

    // Written over HTTP by someone else
    let response = server
        .post_auth("/api/v1/names", &bob.access_token, &NameRequest::girl("Iris"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let frame = socket
        .names_until(|data| visible_names(data) == vec!["Iris"])
        .await
        .unwrap();
    assert_eq!(frame["data"]["board"]["sort"], "alpha");
    assert_eq!(
        frame["data"]["transitions"],
        json!([{"kind": "entered", "key": "IRIS-g", "at": 0}])
    );

    // Written over the socket
    socket
        .send(json!({"type": "ADD_NAME", "data": {"name": "Hugo", "boy": true}}))
        .await
        .unwrap();
    socket
        .names_until(|data| visible_names(data) == vec!["Hugo", "Iris"])
        .await
        .unwrap();

    socket
        .send(json!({"type": "LIKE_NAME", "data": {"name": "Iris", "girl": true}}))
        .await
        .unwrap();
    socket
        .names_until(|data| likes_of(data, "IRIS-g") == Some(1))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_live_names_duplicate_is_an_error_frame() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();

    let response = server
        .post_auth("/api/v1/names", &auth.access_token, &NameRequest::boy("Otto"))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let mut socket = server
        .live("/api/v1/live/names", &auth.access_token)
        .await
        .unwrap();
    socket.next_of_type("NAMES").await.unwrap();

    socket
        .send(json!({"type": "ADD_NAME", "data": {"name": "OTTO", "boy": true}}))
        .await
        .unwrap();
    let error = socket.next_of_type("ERROR").await.unwrap();
    assert_eq!(error["data"]["code"], "NAME_EXISTS");
    assert_eq!(error["data"]["message"], "Name already exists!");

    socket
        .send(json!({"type": "ADD_NAME", "data": {"name": "", "girl": true}}))
        .await
        .unwrap();
    let error = socket.next_of_type("ERROR").await.unwrap();
    assert_eq!(error["data"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_live_names_set_view_and_ping() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();
    let token = &auth.access_token;

    for request in [NameRequest::girl("Bea"), NameRequest::boy("Cal")] {
        let response = server.post_auth("/api/v1/names", token, &request).await.unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let mut socket = server
        .live("/api/v1/live/names?sort=alpha", token)
        .await
        .unwrap();
    let first = socket.next_of_type("NAMES").await.unwrap();
    assert_eq!(visible_names(&first["data"]), vec!["Bea", "Cal"]);

    socket
        .send(json!({"type": "SET_VIEW", "data": {"reverse": true}}))
        .await
        .unwrap();
    let reversed = socket.next_of_type("NAMES").await.unwrap();
    assert_eq!(reversed["data"]["board"]["sort"], "alpha");
    assert_eq!(visible_names(&reversed["data"]), vec!["Cal", "Bea"]);
    let moved: Vec<&Value> = reversed["data"]["transitions"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["kind"] == "moved")
        .collect();
    assert_eq!(moved.len(), 2);

    socket
        .send(json!({"type": "SET_VIEW", "data": {"boys": false}}))
        .await
        .unwrap();
    let filtered = socket.next_of_type("NAMES").await.unwrap();
    assert_eq!(visible_names(&filtered["data"]), vec!["Bea"]);
    assert_eq!(
        filtered["data"]["transitions"],
        json!([
            {"kind": "moved", "key": "BEA-g", "from": 1, "to": 0},
            {"kind": "exited", "key": "CAL-b", "from": 0},
        ])
    );

    socket.send(json!({"type": "PING"})).await.unwrap();
    socket.next_of_type("PONG").await.unwrap();

    socket.send(json!({"type": "SHOUT"})).await.unwrap();
    let error = socket.next_of_type("ERROR").await.unwrap();
    assert_eq!(error["data"]["code"], "INVALID_FRAME");
}

#[tokio::test]
async fn test_live_predictions_edit() {
    let server = TestServer::start().await.expect("Failed to start server");
    let email = unique_email();
    let auth = sign_in(&server, &email).await.unwrap();
    let token = &auth.access_token;

    let response = server
        .put_auth(
            "/api/v1/predictions/@me",
            token,
            &prediction_body("boy", 7, 7, "2024-11-02", "blue"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let mut socket = server
        .live("/api/v1/live/predictions", token)
        .await
        .unwrap();
    let ready = socket.next_of_type("READY").await.unwrap();
    assert_eq!(ready["data"]["screen"], "predictions");

    let board = socket.next_of_type("PREDICTIONS").await.unwrap();
    assert_eq!(board["data"]["mine"]["eye_colour"], "blue");

    socket
        .send(json!({"type": "EDIT", "data": {"field": "eye_colour", "value": "green"}}))
        .await
        .unwrap();

    let board = loop {
        let frame = socket.next_of_type("PREDICTIONS").await.unwrap();
        if frame["data"]["mine"]["eye_colour"] == "green" {
            break frame;
        }
    };
    let mine = &board["data"]["mine"];
    assert_eq!(mine["sex"], "boy");
    assert_eq!(mine["weight"], json!({"lbs": 7, "oz": 7}));
    assert_eq!(mine["delivery_date"], "2024-11-02");

    socket
        .send(json!({"type": "LIKE_NAME", "data": {"name": "Iris", "girl": true}}))
        .await
        .unwrap();
    let error = socket.next_of_type("ERROR").await.unwrap();
    assert_eq!(error["data"]["code"], "UNSUPPORTED_FRAME");

    let response = server
        .get_auth("/api/v1/predictions/@me", token)
        .await
        .unwrap();
    let mine: MyPrediction = integration_tests::assert_json(response, StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(mine.saved.map(|p| p.eye_colour).as_deref(), Some("green"));
}

#[tokio::test]
async fn test_live_edit_overwrites_a_remote_write_with_session_state() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();
    let token = &auth.access_token;

    let response = server
        .put_auth(
            "/api/v1/predictions/@me",
            token,
            &prediction_body("boy", 7, 7, "2024-11-02", "blue"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let mut socket = server
        .live("/api/v1/live/predictions", token)
        .await
        .unwrap();
    let board = socket.next_of_type("PREDICTIONS").await.unwrap();
    assert_eq!(board["data"]["mine"]["sex"], "boy");

    // A different record saved over HTTP while the socket is open
    let response = server
        .put_auth(
            "/api/v1/predictions/@me",
            token,
            &prediction_body("girl", 6, 2, "2024-12-01", "grey"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    loop {
        let frame = socket.next_of_type("PREDICTIONS").await.unwrap();
        if frame["data"]["mine"]["sex"] == "girl" {
            break;
        }
    }

    socket
        .send(json!({"type": "EDIT", "data": {"field": "eye_colour", "value": "green"}}))
        .await
        .unwrap();
    loop {
        let frame = socket.next_of_type("PREDICTIONS").await.unwrap();
        if frame["data"]["mine"]["eye_colour"] == "green" {
            break;
        }
    }

    let response = server
        .get_auth("/api/v1/predictions/@me", token)
        .await
        .unwrap();
    let mine: MyPrediction = integration_tests::assert_json(response, StatusCode::OK)
        .await
        .unwrap();
    let saved = mine.saved.expect("prediction saved");
    assert_eq!(saved.eye_colour, "green");
    assert_eq!(saved.sex, "boy");
    assert_eq!(saved.weight, Weight { lbs: 7, oz: 7 });
    assert_eq!(saved.delivery_date, "2024-11-02");
}

#[tokio::test]
async fn test_live_socket_stops_after_sign_out() {
    let server = TestServer::start().await.expect("Failed to start server");
    let auth = sign_in(&server, &unique_email()).await.unwrap();

    let mut socket = server
        .live("/api/v1/live/names", &auth.access_token)
        .await
        .unwrap();
    socket.next_of_type("NAMES").await.unwrap();

    let response = server
        .post_empty_auth("/api/v1/auth/sign-out", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    socket.send(json!({"type": "PING"})).await.unwrap();
    let error = socket.next_of_type("ERROR").await.unwrap();
    assert_eq!(error["data"]["code"], "SESSION_REVOKED");
}
