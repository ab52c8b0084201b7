use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Deserialize;

use crate::entities::tournament;
use crate::error::AppError;
use crate::hateoas::{self, Resource, TournamentData};
use crate::services::{cascade, lookup, tournaments};
use crate::state::AppState;

/// Build the tournament route group: `/api/tournaments/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tournaments).post(create_tournament))
        .route(
            "/{name}",
            get(get_tournament)
                .put(update_tournament)
                .delete(delete_tournament),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TournamentRequest {
    name: String,
    #[serde(default)]
    parent_tournament_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IncludeQuery {
    include: Option<String>,
}

/// `POST /api/tournaments`
async fn create_tournament(
    State(state): State<AppState>,
    Json(body): Json<TournamentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = tournaments::create(&state.db, &body.name, body.parent_tournament_name).await?;
    let location = format!("/api/tournaments/{}", created.name);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(hateoas::tournament_resource(created, Vec::new())),
    ))
}

/// `GET /api/tournaments`
async fn list_tournaments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource<TournamentData>>>, AppError> {
    let tournaments = tournament::Entity::find()
        .order_by_asc(tournament::Column::Name)
        .all(&state.db)
        .await?;

    Ok(Json(
        tournaments
            .into_iter()
            .map(|t| hateoas::tournament_resource(t, Vec::new()))
            .collect(),
    ))
}

/// `GET /api/tournaments/{name}[?include=sub-tournaments]`
async fn get_tournament(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<IncludeQuery>,
) -> Result<Json<Resource<TournamentData>>, AppError> {
    let tournament = lookup::find_tournament(&state.db, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tournament '{name}' not found.")))?;

    let sub_tournaments = if query.include.as_deref() == Some("sub-tournaments") {
        lookup::sub_tournaments(&state.db, &name).await?
    } else {
        Vec::new()
    };

    Ok(Json(hateoas::tournament_resource(tournament, sub_tournaments)))
}

/// `PUT /api/tournaments/{name}`
async fn update_tournament(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<TournamentRequest>,
) -> Result<StatusCode, AppError> {
    if name != body.name {
        return Err(AppError::BadRequest(
            "Tournament name in URL must match the request body.".to_string(),
        ));
    }

    tournaments::update(&state.db, &name, body.parent_tournament_name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/tournaments/{name}` — removes the whole subtree and its registrations.
async fn delete_tournament(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    cascade::delete_tournament(&state.db, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}
