use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ConnectionTrait};

use crate::entities::tournament;
use crate::error::{AppError, HierarchyViolation};
use crate::services::{hierarchy, lookup};

/// Create a tournament, optionally under an existing parent.
///
/// # Errors
///
/// `BadRequest` for a blank name, `Conflict` for a taken name (including a
/// concurrent insert that wins the race), `InvalidHierarchy` when the parent
/// is unknown or already at the maximum depth.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    name: &str,
    parent: Option<String>,
) -> Result<tournament::Model, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Tournament name is required.".to_string()));
    }

    let duplicate = || format!("Tournament '{name}' already exists.");

    if lookup::find_tournament(db, name).await?.is_some() {
        return Err(AppError::Conflict(duplicate()));
    }

    let parent = hierarchy::normalize_parent(parent);
    if parent.as_deref() == Some(name) {
        return Err(HierarchyViolation::SelfParent.into());
    }
    hierarchy::check_create(db, parent.as_deref())
        .await
        .inspect_err(|e| tracing::warn!(tournament = %name, ?parent, "Rejected tournament: {e:?}"))?;

    let created = tournament::ActiveModel {
        name: Set(name.to_owned()),
        parent_tournament_name: Set(parent),
    }
    .insert(db)
    .await
    .map_err(|e| AppError::from_db(e, duplicate()))?;

    tracing::info!(
        tournament = %created.name,
        parent = ?created.parent_tournament_name,
        "Tournament created"
    );
    Ok(created)
}

/// Move an existing tournament under a new parent (or make it a root).
pub async fn update<C: ConnectionTrait>(
    db: &C,
    name: &str,
    parent: Option<String>,
) -> Result<tournament::Model, AppError> {
    let existing = lookup::find_tournament(db, name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tournament '{name}' not found.")))?;

    let parent = hierarchy::normalize_parent(parent);
    hierarchy::check_reparent(db, &existing, parent.as_deref())
        .await
        .inspect_err(|e| tracing::warn!(tournament = %name, ?parent, "Rejected reparent: {e:?}"))?;

    if existing.parent_tournament_name == parent {
        return Ok(existing);
    }

    let mut active: tournament::ActiveModel = existing.into();
    active.parent_tournament_name = Set(parent);
    let updated = active.update(db).await?;

    tracing::info!(
        tournament = %updated.name,
        parent = ?updated.parent_tournament_name,
        "Tournament reparented"
    );
    Ok(updated)
}
