use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;

use crate::entities::{player, registration, tournament};
use crate::error::AppError;
use crate::hateoas::{self, Link, Resource, TournamentData};
use crate::services::{lookup, players};
use crate::state::AppState;

/// Build the player route group: `/api/players/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route(
            "/{gamertag}",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route("/{gamertag}/tournaments", get(tournaments_for_player))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRequest {
    gamertag: String,
    name: String,
    #[serde(default = "default_age")]
    age: i32,
}

const fn default_age() -> i32 {
    players::MIN_AGE
}

/// `POST /api/players`
async fn create_player(
    State(state): State<AppState>,
    Json(body): Json<PlayerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = players::create(&state.db, &body.gamertag, &body.name, body.age).await?;
    let location = format!("/api/players/{}", created.gamertag);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(hateoas::player_resource(created)),
    ))
}

/// `GET /api/players`
async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource<player::Model>>>, AppError> {
    let players = player::Entity::find()
        .order_by_asc(player::Column::Gamertag)
        .all(&state.db)
        .await?;

    tracing::debug!(count = players.len(), "Listing players");
    Ok(Json(
        players.into_iter().map(hateoas::player_resource).collect(),
    ))
}

/// `GET /api/players/{gamertag}`
async fn get_player(
    State(state): State<AppState>,
    Path(gamertag): Path<String>,
) -> Result<Json<Resource<player::Model>>, AppError> {
    let player = lookup::find_player(&state.db, &gamertag)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Player '{gamertag}' not found.")))?;

    Ok(Json(hateoas::player_resource(player)))
}

/// `PUT /api/players/{gamertag}`
async fn update_player(
    State(state): State<AppState>,
    Path(gamertag): Path<String>,
    Json(body): Json<PlayerRequest>,
) -> Result<StatusCode, AppError> {
    if gamertag != body.gamertag {
        return Err(AppError::BadRequest(
            "Gamertag in URL must match request body.".to_string(),
        ));
    }

    players::update(&state.db, &gamertag, &body.name, body.age).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/players/{gamertag}`
async fn delete_player(
    State(state): State<AppState>,
    Path(gamertag): Path<String>,
) -> Result<StatusCode, AppError> {
    players::delete(&state.db, &gamertag).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/players/{gamertag}/tournaments`
async fn tournaments_for_player(
    State(state): State<AppState>,
    Path(gamertag): Path<String>,
) -> Result<Json<Vec<Resource<TournamentData>>>, AppError> {
    if lookup::find_player(&state.db, &gamertag).await?.is_none() {
        return Err(AppError::NotFound(format!("Player '{gamertag}' not found.")));
    }

    let rows = registration::Entity::find()
        .filter(registration::Column::PlayerGamertag.eq(&gamertag))
        .order_by_asc(registration::Column::Id)
        .find_also_related(tournament::Entity)
        .all(&state.db)
        .await?;

    let resources = rows
        .into_iter()
        .filter_map(|(_, tournament)| tournament)
        .map(|tournament| {
            let unregister = Link::new(
                format!("/api/registrations/{}/{gamertag}", tournament.name),
                "unregister",
                "DELETE",
            );
            let mut resource = hateoas::tournament_resource(tournament, Vec::new());
            resource.links.push(unregister);
            resource
        })
        .collect();

    Ok(Json(resources))
}
