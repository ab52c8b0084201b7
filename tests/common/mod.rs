#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use tournaments_api::config::{Config, Environment};
use tournaments_api::state::AppState;

/// In-memory `SQLite` database with migrations applied.
pub async fn test_db() -> DatabaseConnection {
    let db = tournaments_api::db::connect("sqlite::memory:")
        .await
        .unwrap_or_default();
    Migrator::up(&db, None).await.unwrap_or_default();
    db
}

pub fn test_config(environment: Environment) -> Config {
    Config {
        database_url: String::new(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment,
        log_level: "warn".to_string(),
        frontend_url: "http://localhost:5181".to_string(),
    }
}

/// Build the app router backed by a fresh database.
pub async fn test_app() -> Router {
    app_with(test_db().await, Environment::Development)
}

pub fn app_with(db: DatabaseConnection, environment: Environment) -> Router {
    let state = AppState {
        db,
        config: test_config(environment),
    };
    tournaments_api::routes::router().with_state(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, body_str)
}

fn request(method: &str, uri: &str, body: Option<&serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap_or_default(),
        None => builder.body(Body::empty()).unwrap_or_default(),
    }
}

/// Test helper: send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, request("GET", uri, None)).await
}

pub async fn post(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, request("POST", uri, None)).await
}

pub async fn post_json(app: &Router, uri: &str, body: &serde_json::Value) -> (StatusCode, String) {
    send(app, request("POST", uri, Some(body))).await
}

pub async fn put_json(app: &Router, uri: &str, body: &serde_json::Value) -> (StatusCode, String) {
    send(app, request("PUT", uri, Some(body))).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, request("DELETE", uri, None)).await
}

pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap_or_default()
}

/// Create a tournament through the API and assert it was accepted.
pub async fn create_tournament(app: &Router, name: &str, parent: Option<&str>) {
    let (status, body) = post_json(
        app,
        "/api/tournaments",
        &serde_json::json!({ "name": name, "parentTournamentName": parent }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create tournament {name} failed: {body}");
}

pub async fn create_player(app: &Router, gamertag: &str) {
    let (status, body) = post_json(
        app,
        "/api/players",
        &serde_json::json!({ "gamertag": gamertag, "name": "Test Player", "age": 21 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create player {gamertag} failed: {body}");
}

pub async fn register(app: &Router, tournament: &str, gamertag: &str) -> (StatusCode, String) {
    post(app, &format!("/api/tournaments/{tournament}/players/{gamertag}")).await
}
