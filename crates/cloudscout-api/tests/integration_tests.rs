//! # Integration Tests for cloudscout-api
//!
//! Drives a small Axum router built the way the service's handlers use this
//! crate: bodies go through `extract_player`, lookups and logins raise
//! `ApiError`s, and every failure leaves the handler through `?`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use cloudscout_api::{extract_json, extract_player, ApiError, AppState, HandlerError};
use cloudscout_core::StatCatalog;

const ADMIN_TOKEN: &str = "Bearer scout-admin";

#[derive(Clone)]
struct TestApp {
    state: AppState,
    players: Arc<Mutex<HashMap<String, Value>>>,
    users: Arc<HashMap<String, String>>,
}

async fn create_player(
    State(app): State<TestApp>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), HandlerError> {
    let player = extract_player(&app.state, body)?;
    let pid = player.record["pid"].as_str().unwrap_or_default().to_string();

    let mut players = app.players.lock().unwrap();
    if players.contains_key(&pid) {
        return Err(ApiError::duplicate_key().with_extra("pid", pid).into());
    }
    players.insert(pid.clone(), player.record);
    Ok((StatusCode::CREATED, Json(json!({ "pid": pid }))))
}

async fn get_player(
    State(app): State<TestApp>,
    Path(pid): Path<String>,
) -> Result<Json<Value>, ApiError> {
    app.players
        .lock()
        .unwrap()
        .get(&pid)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::resource_not_found)
}

async fn login(
    State(app): State<TestApp>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let body = extract_json(body)?;
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match app.users.get(email) {
        Some(expected) if expected == password => Ok(Json(json!({ "token": "t" }))),
        _ => Err(ApiError::invalid_login()),
    }
}

async fn reset_password(
    State(app): State<TestApp>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let body = extract_json(body)?;
    let email = body["email"].as_str().unwrap_or_default();
    if app.users.contains_key(email) {
        Ok(StatusCode::ACCEPTED)
    } else {
        Err(ApiError::user_not_registered())
    }
}

async fn admin(headers: HeaderMap) -> Result<StatusCode, ApiError> {
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        None => Err(ApiError::authorization()),
        Some(ADMIN_TOKEN) => Ok(StatusCode::NO_CONTENT),
        Some(_) => Err(ApiError::authorization_with(
            StatusCode::FORBIDDEN,
            "Admin access required",
        )),
    }
}

fn test_app() -> Router {
    let app = TestApp {
        state: AppState::new(StatCatalog::builtin()).unwrap(),
        players: Arc::new(Mutex::new(HashMap::new())),
        users: Arc::new(HashMap::from([(
            "coach@example.edu".to_string(),
            "hunter2".to_string(),
        )])),
    };
    Router::new()
        .route("/players", post(create_player))
        .route("/players/{pid}", get(get_player))
        .route("/login", post(login))
        .route("/password-reset", post(reset_password))
        .route("/admin", get(admin))
        .with_state(app)
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper: read response status and JSON body.
async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn football_record(pid: &str) -> Value {
    let catalog = StatCatalog::builtin();
    let stats: serde_json::Map<String, Value> = catalog
        .groups(cloudscout_core::Sport::Football)
        .iter()
        .map(|g| {
            let fields = g.fields().iter().map(|f| (f.clone(), json!(0))).collect();
            (g.name().to_string(), Value::Object(fields))
        })
        .collect();
    json!({
        "pid": pid,
        "meta": {
            "class": 3,
            "conference": "Mountain West",
            "date": 1_725_000_000,
            "division": 1,
            "first": "Riley",
            "last": "Park",
            "position": "QB",
            "sport": "football",
            "year": "2024-2025"
        },
        "stats": stats
    })
}

// -- Player creation -----------------------------------------------------------

#[tokio::test]
async fn test_create_valid_player() {
    let request = json_request("POST", "/players", &football_record("88"));
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"pid": "88"}));
}

#[tokio::test]
async fn test_missing_pid_is_400_with_validator_detail() {
    let mut record = football_record("88");
    record.as_object_mut().unwrap().remove("pid");
    let (status, body) = send(test_app(), json_request("POST", "/players", &record)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"msg": "'pid' is a required property"}));
}

#[tokio::test]
async fn test_basketball_record_without_pid_is_400() {
    let record = json!({"meta": {"sport": "basketball"}, "stats": {}});
    let (status, body) = send(test_app(), json_request("POST", "/players", &record)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"msg": "'pid' is a required property"}));
}

#[tokio::test]
async fn test_unknown_field_is_400() {
    let mut record = football_record("88");
    record["meta"]["nickname"] = json!("Rocket");
    let (status, body) = send(test_app(), json_request("POST", "/players", &record)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/players")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["msg"].is_string());
}

#[tokio::test]
async fn test_duplicate_player_is_409_with_pid() {
    let app = test_app();
    let record = football_record("88");
    let (status, _) = send(app.clone(), json_request("POST", "/players", &record)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, json_request("POST", "/players", &record)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["pid"], json!("88"));
    assert!(body["msg"].as_str().unwrap().contains("duplicate entries"));
}

// -- Lookup --------------------------------------------------------------------

#[tokio::test]
async fn test_missing_player_is_404() {
    let request = Request::builder().uri("/players/404404").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"msg": "Resource does not exist in the database"}));
}

#[tokio::test]
async fn test_stored_player_round_trips() {
    let app = test_app();
    let record = football_record("7");
    send(app.clone(), json_request("POST", "/players", &record)).await;
    let request = Request::builder().uri("/players/7").body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, record);
}

// -- Login ---------------------------------------------------------------------

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let wrong_email = json!({"email": "nobody@example.edu", "password": "hunter2"});
    let wrong_password = json!({"email": "coach@example.edu", "password": "nope"});

    let a = send(test_app(), json_request("POST", "/login", &wrong_email)).await;
    let b = send(test_app(), json_request("POST", "/login", &wrong_password)).await;

    assert_eq!(a.0, StatusCode::UNAUTHORIZED);
    assert_eq!(a.1, json!({"msg": "Incorrect username or password"}));
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_login_success() {
    let creds = json!({"email": "coach@example.edu", "password": "hunter2"});
    let (status, _) = send(test_app(), json_request("POST", "/login", &creds)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unregistered_email_is_404() {
    let body = json!({"email": "nobody@example.edu"});
    let (status, body) = send(test_app(), json_request("POST", "/password-reset", &body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"msg": "Email not registered"}));
}

// -- Authorization -------------------------------------------------------------

#[tokio::test]
async fn test_missing_authorization_is_default_401() {
    let request = Request::builder().uri("/admin").body(Body::empty()).unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"msg": "Unauthorized"}));
}

#[tokio::test]
async fn test_authorization_override() {
    let request = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, "Bearer someone-else")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"msg": "Admin access required"}));
}

#[tokio::test]
async fn test_admin_token_accepted() {
    let request = Request::builder()
        .uri("/admin")
        .header(header::AUTHORIZATION, ADMIN_TOKEN)
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
