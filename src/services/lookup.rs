use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::entities::{player, registration, tournament};

pub async fn find_tournament<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<tournament::Model>, DbErr> {
    tournament::Entity::find_by_id(name.to_owned()).one(db).await
}

pub async fn find_player<C: ConnectionTrait>(
    db: &C,
    gamertag: &str,
) -> Result<Option<player::Model>, DbErr> {
    player::Entity::find_by_id(gamertag.to_owned()).one(db).await
}

/// Look up a registration by its natural key.
pub async fn find_registration<C: ConnectionTrait>(
    db: &C,
    tournament_name: &str,
    gamertag: &str,
) -> Result<Option<registration::Model>, DbErr> {
    registration::Entity::find()
        .filter(registration::Column::TournamentName.eq(tournament_name))
        .filter(registration::Column::PlayerGamertag.eq(gamertag))
        .one(db)
        .await
}

pub async fn registration_exists<C: ConnectionTrait>(
    db: &C,
    tournament_name: &str,
    gamertag: &str,
) -> Result<bool, DbErr> {
    Ok(find_registration(db, tournament_name, gamertag)
        .await?
        .is_some())
}

/// Names of the direct sub-tournaments of `parent_name`.
pub async fn child_names<C: ConnectionTrait>(db: &C, parent_name: &str) -> Result<Vec<String>, DbErr> {
    tournament::Entity::find()
        .select_only()
        .column(tournament::Column::Name)
        .filter(tournament::Column::ParentTournamentName.eq(parent_name))
        .order_by_asc(tournament::Column::Name)
        .into_tuple::<String>()
        .all(db)
        .await
}

pub async fn sub_tournaments<C: ConnectionTrait>(
    db: &C,
    parent_name: &str,
) -> Result<Vec<tournament::Model>, DbErr> {
    tournament::Entity::find()
        .filter(tournament::Column::ParentTournamentName.eq(parent_name))
        .order_by_asc(tournament::Column::Name)
        .all(db)
        .await
}
