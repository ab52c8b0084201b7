use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ConnectionTrait};

use crate::entities::registration;
use crate::error::AppError;
use crate::services::lookup;

/// Register `gamertag` in `tournament_name`.
///
/// Checks run in a fixed order and stop at the first failure, so each
/// failure class maps to exactly one error:
///
/// 1. both identifiers present, else `BadRequest`
/// 2. tournament exists, else `NotFound`
/// 3. player exists, else `NotFound`
/// 4. not already registered, else `Conflict`
/// 5. registered in the parent tournament (if any), else `BadRequest`
///
/// A concurrent duplicate that slips past step 4 is rejected by the unique
/// index and also reported as `Conflict`.
pub async fn register<C: ConnectionTrait>(
    db: &C,
    tournament_name: &str,
    gamertag: &str,
) -> Result<registration::Model, AppError> {
    if tournament_name.trim().is_empty() || gamertag.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Tournament name and player gamertag are required.".to_string(),
        ));
    }

    let tournament = lookup::find_tournament(db, tournament_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tournament '{tournament_name}' not found.")))?;

    if lookup::find_player(db, gamertag).await?.is_none() {
        return Err(AppError::NotFound(format!("Player '{gamertag}' not found.")));
    }

    let duplicate = || {
        format!("Player '{gamertag}' is already registered in tournament '{tournament_name}'.")
    };

    if lookup::registration_exists(db, tournament_name, gamertag).await? {
        return Err(AppError::Conflict(duplicate()));
    }

    if let Some(parent) = tournament.parent_tournament_name.as_deref()
        && !lookup::registration_exists(db, parent, gamertag).await?
    {
        return Err(AppError::BadRequest(format!(
            "Player must be registered in parent tournament '{parent}' first."
        )));
    }

    let created = registration::ActiveModel {
        id: NotSet,
        tournament_name: Set(tournament_name.to_owned()),
        player_gamertag: Set(gamertag.to_owned()),
    }
    .insert(db)
    .await
    .map_err(|e| AppError::from_db(e, duplicate()))?;

    tracing::info!(
        id = created.id,
        tournament = %created.tournament_name,
        gamertag = %created.player_gamertag,
        "Player registered"
    );

    Ok(created)
}
