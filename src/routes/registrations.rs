use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use crate::entities::{player, registration};
use crate::error::AppError;
use crate::hateoas::{self, Link, Resource};
use crate::services::{cascade, lookup, registrations};
use crate::state::AppState;

/// Registration routes that live under `/api/tournaments/{name}/players`.
pub fn tournament_router() -> Router<AppState> {
    Router::new()
        .route("/{name}/players", get(players_in_tournament))
        .route(
            "/{name}/players/{gamertag}",
            get(get_registration_by_key).post(register_player),
        )
}

/// Build the registration route group: `/api/registrations/...`
///
/// The first segment is named `{id}` on both routes so they share one path
/// parameter; on the two-segment route it carries the tournament name.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_registrations))
        .route(
            "/{id}",
            get(get_registration).delete(delete_registration_by_id),
        )
        .route("/{id}/{gamertag}", delete(delete_registration_by_key))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TournamentSummary {
    name: String,
    parent_tournament_name: Option<String>,
}

#[derive(Serialize)]
struct RegisteredPlayer {
    player: player::Model,
    links: Vec<Link>,
}

#[derive(Serialize)]
struct PlayersInTournament {
    tournament: TournamentSummary,
    players: Vec<RegisteredPlayer>,
    links: Vec<Link>,
}

/// `POST /api/tournaments/{name}/players/{gamertag}`
async fn register_player(
    State(state): State<AppState>,
    Path((name, gamertag)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let created = registrations::register(&state.db, &name, &gamertag).await?;
    let location = format!("/api/tournaments/{name}/players/{gamertag}");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(hateoas::registration_resource(created)),
    ))
}

/// `GET /api/tournaments/{name}/players/{gamertag}`
async fn get_registration_by_key(
    State(state): State<AppState>,
    Path((name, gamertag)): Path<(String, String)>,
) -> Result<Json<Resource<registration::Model>>, AppError> {
    let registration = lookup::find_registration(&state.db, &name, &gamertag)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Player '{gamertag}' is not registered in tournament '{name}'."
            ))
        })?;

    Ok(Json(hateoas::registration_resource(registration)))
}

/// `GET /api/tournaments/{name}/players` — an empty list is still a 200.
async fn players_in_tournament(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayersInTournament>, AppError> {
    let tournament = lookup::find_tournament(&state.db, &name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tournament '{name}' not found.")))?;

    let rows = registration::Entity::find()
        .filter(registration::Column::TournamentName.eq(&name))
        .order_by_asc(registration::Column::Id)
        .find_also_related(player::Entity)
        .all(&state.db)
        .await?;

    let players = rows
        .into_iter()
        .filter_map(|(_, player)| player)
        .map(|player| {
            let href = format!("/api/players/{}", player.gamertag);
            let links = vec![
                Link::get(&href, "self"),
                Link::new(&href, "update", "PUT"),
                Link::new(
                    format!("/api/registrations/{name}/{}", player.gamertag),
                    "delete",
                    "DELETE",
                ),
            ];
            RegisteredPlayer { player, links }
        })
        .collect();

    let links = hateoas::tournament_links(&tournament.name, None);

    Ok(Json(PlayersInTournament {
        tournament: TournamentSummary {
            name: tournament.name,
            parent_tournament_name: tournament.parent_tournament_name,
        },
        players,
        links,
    }))
}

/// `GET /api/registrations`
async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource<registration::Model>>>, AppError> {
    let registrations = registration::Entity::find()
        .order_by_asc(registration::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(
        registrations
            .into_iter()
            .map(hateoas::registration_resource)
            .collect(),
    ))
}

/// `GET /api/registrations/{id}`
async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Resource<registration::Model>>, AppError> {
    let registration = registration::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Registration {id} not found.")))?;

    Ok(Json(hateoas::registration_resource(registration)))
}

/// `DELETE /api/registrations/{id}`
async fn delete_registration_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    cascade::remove_registration_by_id(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/registrations/{tournament_name}/{gamertag}`
async fn delete_registration_by_key(
    State(state): State<AppState>,
    Path((tournament_name, gamertag)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    cascade::remove_registration(&state.db, &tournament_name, &gamertag).await?;
    Ok(StatusCode::NO_CONTENT)
}
