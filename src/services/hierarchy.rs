use std::collections::HashSet;

use sea_orm::ConnectionTrait;

use crate::entities::tournament;
use crate::error::{AppError, HierarchyViolation};
use crate::services::{cascade, lookup};

/// Deepest allowed tournament level; a root tournament is level 1.
pub const MAX_NESTING_DEPTH: u32 = 5;

/// Treat a missing or blank parent name as "no parent".
#[must_use]
pub fn normalize_parent(parent: Option<String>) -> Option<String> {
    parent.filter(|p| !p.trim().is_empty())
}

/// Nesting depth of `tournament`: 1 for a root, parent's depth + 1 otherwise.
///
/// The parent chain is walked by name. A parent name that does not resolve
/// ends the chain, and a name seen twice stops the walk instead of looping.
pub async fn compute_depth<C: ConnectionTrait>(
    db: &C,
    tournament: &tournament::Model,
) -> Result<u32, AppError> {
    let mut depth = 1;
    let mut seen = HashSet::from([tournament.name.clone()]);
    let mut next = tournament.parent_tournament_name.clone();

    while let Some(parent_name) = next {
        if !seen.insert(parent_name.clone()) {
            tracing::warn!(tournament = %tournament.name, %parent_name, "cycle in parent chain");
            break;
        }
        let Some(parent) = lookup::find_tournament(db, &parent_name).await? else {
            break;
        };
        depth += 1;
        next = parent.parent_tournament_name;
    }

    Ok(depth)
}

/// Number of levels in the subtree rooted at `name` (a leaf has height 1).
pub async fn subtree_height<C: ConnectionTrait>(db: &C, name: &str) -> Result<u32, AppError> {
    let mut height = 1;
    let mut seen = HashSet::from([name.to_owned()]);
    let mut level = vec![name.to_owned()];

    loop {
        let mut next_level = Vec::new();
        for parent in &level {
            for child in lookup::child_names(db, parent).await? {
                if seen.insert(child.clone()) {
                    next_level.push(child);
                }
            }
        }
        if next_level.is_empty() {
            return Ok(height);
        }
        height += 1;
        level = next_level;
    }
}

/// Check that a new tournament may be created under `parent_name`.
///
/// # Errors
///
/// `UnknownParent` if the parent does not exist, `NestingTooDeep` if the
/// parent already sits at [`MAX_NESTING_DEPTH`].
pub async fn check_create<C: ConnectionTrait>(
    db: &C,
    parent_name: Option<&str>,
) -> Result<(), AppError> {
    let Some(parent_name) = parent_name else {
        return Ok(());
    };

    let parent = lookup::find_tournament(db, parent_name)
        .await?
        .ok_or_else(|| HierarchyViolation::UnknownParent {
            parent: parent_name.to_owned(),
        })?;

    if compute_depth(db, &parent).await? >= MAX_NESTING_DEPTH {
        return Err(HierarchyViolation::NestingTooDeep.into());
    }

    Ok(())
}

/// Check that `existing` may be moved under `new_parent`.
///
/// Nothing is checked when the parent does not change. The whole subtree
/// moves with the tournament, so its height counts against the depth limit.
pub async fn check_reparent<C: ConnectionTrait>(
    db: &C,
    existing: &tournament::Model,
    new_parent: Option<&str>,
) -> Result<(), AppError> {
    if existing.parent_tournament_name.as_deref() == new_parent {
        return Ok(());
    }
    let Some(parent_name) = new_parent else {
        return Ok(());
    };

    if parent_name == existing.name {
        return Err(HierarchyViolation::SelfParent.into());
    }

    let parent = lookup::find_tournament(db, parent_name)
        .await?
        .ok_or_else(|| HierarchyViolation::UnknownParent {
            parent: parent_name.to_owned(),
        })?;

    if cascade::collect_descendant_names(db, &existing.name)
        .await?
        .iter()
        .any(|name| name == parent_name)
    {
        return Err(HierarchyViolation::Cycle {
            parent: parent_name.to_owned(),
        }
        .into());
    }

    let parent_depth = compute_depth(db, &parent).await?;
    let height = subtree_height(db, &existing.name).await?;
    if parent_depth + height > MAX_NESTING_DEPTH {
        return Err(HierarchyViolation::NestingTooDeep.into());
    }

    Ok(())
}
