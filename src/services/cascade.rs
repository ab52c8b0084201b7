use std::collections::HashSet;

use anyhow::Context;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, TransactionTrait,
};

use crate::entities::{player, registration, tournament};
use crate::error::AppError;
use crate::services::lookup;

/// Rows removed by a cascading operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub tournaments: u64,
    pub registrations: u64,
}

/// Name of `root` plus the names of every tournament below it, at any depth.
///
/// Breadth-first: the root comes first and every tournament is listed before
/// its own sub-tournaments. A name is never visited twice, so a malformed
/// parent chain cannot make the walk loop.
pub async fn collect_descendant_names<C: ConnectionTrait>(
    db: &C,
    root: &str,
) -> Result<Vec<String>, DbErr> {
    let mut names = vec![root.to_owned()];
    let mut seen: HashSet<String> = HashSet::from([root.to_owned()]);
    let mut cursor = 0;

    while cursor < names.len() {
        let children = lookup::child_names(db, &names[cursor]).await?;
        for child in children {
            if seen.insert(child.clone()) {
                names.push(child);
            }
        }
        cursor += 1;
    }

    Ok(names)
}

/// Delete every registration in `tournament_names`, optionally only those of
/// one player.
pub async fn delete_registrations_in<C: ConnectionTrait>(
    db: &C,
    tournament_names: &[String],
    gamertag: Option<&str>,
) -> Result<u64, DbErr> {
    if tournament_names.is_empty() {
        return Ok(0);
    }

    let mut query = registration::Entity::delete_many().filter(
        registration::Column::TournamentName.is_in(tournament_names.iter().map(String::as_str)),
    );
    if let Some(gamertag) = gamertag {
        query = query.filter(registration::Column::PlayerGamertag.eq(gamertag));
    }

    Ok(query.exec(db).await?.rows_affected)
}

/// Delete a tournament, all of its sub-tournaments at every depth, and every
/// registration in that subtree, as one transaction.
///
/// # Errors
///
/// `NotFound` if the tournament does not exist. Any storage failure after
/// the transaction has begun rolls the whole cascade back and is reported
/// as `Internal`.
pub async fn delete_tournament<D: TransactionTrait>(
    db: &D,
    name: &str,
) -> Result<CascadeSummary, AppError> {
    let txn = db.begin().await?;

    if lookup::find_tournament(&txn, name).await?.is_none() {
        return Err(AppError::NotFound(format!("Tournament '{name}' not found.")));
    }

    let subtree = collect_descendant_names(&txn, name).await?;
    let summary = delete_subtree(&txn, &subtree)
        .await
        .with_context(|| format!("Failed to delete tournament '{name}'"))?;

    txn.commit()
        .await
        .with_context(|| format!("Failed to delete tournament '{name}'"))?;

    tracing::info!(
        tournament = %name,
        tournaments = summary.tournaments,
        registrations = summary.registrations,
        "Tournament subtree deleted"
    );

    Ok(summary)
}

async fn delete_subtree<C: ConnectionTrait>(
    db: &C,
    subtree: &[String],
) -> Result<CascadeSummary, DbErr> {
    let registrations = delete_registrations_in(db, subtree, None).await?;

    // Deepest tournaments go first so no parent row is removed while a child still points at it.
    let mut tournaments = 0;
    for name in subtree.iter().rev() {
        tournaments += tournament::Entity::delete_by_id(name.clone())
            .exec(db)
            .await?
            .rows_affected;
    }

    Ok(CascadeSummary {
        tournaments,
        registrations,
    })
}

/// Remove a player's registration in a tournament and in every tournament
/// below it. Registrations higher up the tree or in unrelated tournaments
/// are left alone.
///
/// # Errors
///
/// `NotFound` if the player is not registered in `tournament_name`.
pub async fn remove_registration<D: TransactionTrait>(
    db: &D,
    tournament_name: &str,
    gamertag: &str,
) -> Result<u64, AppError> {
    let txn = db.begin().await?;

    let primary = lookup::find_registration(&txn, tournament_name, gamertag)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Player '{gamertag}' is not registered in tournament '{tournament_name}'."
            ))
        })?;

    let removed = remove_with_descendants(&txn, primary).await?;
    txn.commit().await?;
    Ok(removed)
}

/// Same cascade as [`remove_registration`], starting from the surrogate id.
pub async fn remove_registration_by_id<D: TransactionTrait>(
    db: &D,
    id: i32,
) -> Result<u64, AppError> {
    let txn = db.begin().await?;

    let primary = registration::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Registration {id} not found.")))?;

    let removed = remove_with_descendants(&txn, primary).await?;
    txn.commit().await?;
    Ok(removed)
}

async fn remove_with_descendants<C: ConnectionTrait>(
    db: &C,
    primary: registration::Model,
) -> Result<u64, AppError> {
    let subtree = collect_descendant_names(db, &primary.tournament_name).await?;
    let below = &subtree[1..];

    let cascaded = delete_registrations_in(db, below, Some(&primary.player_gamertag)).await?;

    tracing::info!(
        tournament = %primary.tournament_name,
        gamertag = %primary.player_gamertag,
        cascaded,
        "Registration removed"
    );

    primary.delete(db).await?;
    Ok(cascaded + 1)
}

/// Remove every registration, tournament and player in one transaction.
pub async fn clear_all<D: TransactionTrait>(db: &D) -> Result<(), AppError> {
    let txn = db.begin().await?;
    registration::Entity::delete_many().exec(&txn).await?;
    tournament::Entity::update_many()
        .col_expr(
            tournament::Column::ParentTournamentName,
            Expr::value(Option::<String>::None),
        )
        .exec(&txn)
        .await?;
    tournament::Entity::delete_many().exec(&txn).await?;
    player::Entity::delete_many().exec(&txn).await?;
    txn.commit().await?;
    tracing::info!("All players, tournaments and registrations removed");
    Ok(())
}
