use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    TransactionTrait,
};

use crate::entities::{player, registration};
use crate::error::AppError;
use crate::services::lookup;

pub const MIN_AGE: i32 = 1;
pub const MAX_AGE: i32 = 200;

/// Validate the user-editable fields of a player.
pub fn validate(gamertag: &str, name: &str, age: i32) -> Result<(), String> {
    if gamertag.trim().is_empty() {
        return Err("Gamertag is required.".to_string());
    }
    if name.trim().is_empty() {
        return Err("Name is required.".to_string());
    }
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(format!("Age must be between {MIN_AGE} and {MAX_AGE}."));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    gamertag: &str,
    name: &str,
    age: i32,
) -> Result<player::Model, AppError> {
    validate(gamertag, name, age).map_err(AppError::BadRequest)?;

    let duplicate = || format!("Player with gamertag '{gamertag}' already exists.");

    if lookup::find_player(db, gamertag).await?.is_some() {
        return Err(AppError::Conflict(duplicate()));
    }

    let created = player::ActiveModel {
        gamertag: Set(gamertag.to_owned()),
        name: Set(name.to_owned()),
        age: Set(age),
    }
    .insert(db)
    .await
    .map_err(|e| AppError::from_db(e, duplicate()))?;

    tracing::info!(gamertag = %created.gamertag, "Player created");
    Ok(created)
}

/// Update name and age. The gamertag is the identity and never changes.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    gamertag: &str,
    name: &str,
    age: i32,
) -> Result<player::Model, AppError> {
    validate(gamertag, name, age).map_err(AppError::BadRequest)?;

    let existing = lookup::find_player(db, gamertag)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Player '{gamertag}' not found.")))?;

    let mut active: player::ActiveModel = existing.into();
    active.name = Set(name.to_owned());
    active.age = Set(age);
    Ok(active.update(db).await?)
}

/// Delete a player together with all of their registrations.
pub async fn delete<D: TransactionTrait>(db: &D, gamertag: &str) -> Result<u64, AppError> {
    let txn = db.begin().await?;

    let existing = lookup::find_player(&txn, gamertag)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Player '{gamertag}' not found.")))?;

    let removed = registration::Entity::delete_many()
        .filter(registration::Column::PlayerGamertag.eq(gamertag))
        .exec(&txn)
        .await?
        .rows_affected;
    existing.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(%gamertag, registrations = removed, "Player deleted");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_age_bounds() {
        assert!(validate("s1mple", "Oleksandr", MIN_AGE).is_ok());
        assert!(validate("s1mple", "Oleksandr", MAX_AGE).is_ok());
    }

    #[test]
    fn rejects_out_of_range_age() {
        assert!(validate("s1mple", "Oleksandr", 0).is_err());
        assert!(validate("s1mple", "Oleksandr", 201).is_err());
    }

    #[test]
    fn rejects_blank_fields() {
        assert!(validate("", "Oleksandr", 20).is_err());
        assert!(validate("s1mple", "   ", 20).is_err());
    }
}
