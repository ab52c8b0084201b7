use sea_orm_migration::prelude::*;

/// Creates the `registration` table linking players to tournaments.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Registration {
    Table,
    Id,
    TournamentName,
    PlayerGamertag,
}

#[derive(DeriveIden)]
enum Tournament {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum Player {
    Table,
    Gamertag,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registration::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Registration::TournamentName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Registration::PlayerGamertag)
                            .string_len(100)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_tournament_name")
                            .from(Registration::Table, Registration::TournamentName)
                            .to(Tournament::Table, Tournament::Name)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registration_player_gamertag")
                            .from(Registration::Table, Registration::PlayerGamertag)
                            .to(Player::Table, Player::Gamertag)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Race losers on concurrent registration hit this and surface as a conflict.
        manager
            .create_index(
                Index::create()
                    .name("idx_registration_tournament_player")
                    .table(Registration::Table)
                    .col(Registration::TournamentName)
                    .col(Registration::PlayerGamertag)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registration::Table).to_owned())
            .await
    }
}
