use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde::Serialize;

use crate::entities::{player, registration, tournament};
use crate::error::AppError;
use crate::services::cascade;
use crate::state::AppState;

/// Helpers for end-to-end test suites: `/api/testutility/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reset", post(reset_database))
        .route("/status", get(database_status))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatabaseStatus {
    players: u64,
    tournaments: u64,
    registrations: u64,
    is_empty: bool,
}

/// `POST /api/testutility/reset`
async fn reset_database(State(state): State<AppState>) -> Result<Json<&'static str>, AppError> {
    if !state.config.is_development() {
        return Err(AppError::BadRequest(
            "This operation is only allowed in development environment".to_string(),
        ));
    }

    cascade::clear_all(&state.db).await?;
    Ok(Json("Database reset completed successfully"))
}

/// `GET /api/testutility/status`
async fn database_status(State(state): State<AppState>) -> Result<Json<DatabaseStatus>, AppError> {
    let players = player::Entity::find().count(&state.db).await?;
    let tournaments = tournament::Entity::find().count(&state.db).await?;
    let registrations = registration::Entity::find().count(&state.db).await?;

    Ok(Json(DatabaseStatus {
        players,
        tournaments,
        registrations,
        is_empty: players == 0 && tournaments == 0 && registrations == 0,
    }))
}
