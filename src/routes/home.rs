use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::hateoas::Link;
use crate::state::AppState;

#[derive(Serialize)]
struct ApiRoot {
    links: Vec<Link>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(redirect_to_api_root))
        .route("/api", get(api_root))
}

/// `GET /`
async fn redirect_to_api_root() -> Redirect {
    Redirect::permanent("/api")
}

/// `GET /api` — entry point listing every resource and operation.
async fn api_root() -> Json<ApiRoot> {
    let links = vec![
        Link::get("/api/players", "players"),
        Link::new("/api/players", "create-player", "POST"),
        Link::get("/api/players/{gamertag}", "get-player"),
        Link::new("/api/players/{gamertag}", "update-player", "PUT"),
        Link::new("/api/players/{gamertag}", "delete-player", "DELETE"),
        Link::get("/api/players/{gamertag}/tournaments", "player-tournaments"),
        Link::get("/api/tournaments", "tournaments"),
        Link::new("/api/tournaments", "create-tournament", "POST"),
        Link::get("/api/tournaments/{name}", "get-tournament"),
        Link::new("/api/tournaments/{name}", "update-tournament", "PUT"),
        Link::new("/api/tournaments/{name}", "delete-tournament", "DELETE"),
        Link::get("/api/tournaments/{name}/players", "registered-players"),
        Link::new(
            "/api/tournaments/{name}/players/{gamertag}",
            "register-player",
            "POST",
        ),
        Link::get("/api/registrations", "registrations"),
        Link::get("/api/registrations/{id}", "get-registration"),
        Link::new("/api/registrations/{id}", "delete-registration", "DELETE"),
        Link::get("/health", "api-status"),
    ];

    Json(ApiRoot { links })
}
