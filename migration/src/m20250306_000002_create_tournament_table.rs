use sea_orm_migration::prelude::*;

/// Creates the self-referencing `tournament` table.
///
/// The parent foreign key has no `ON DELETE` action. Subtrees are removed
/// child-first inside one transaction.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Tournament {
    Table,
    Name,
    ParentTournamentName,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tournament::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tournament::Name)
                            .string_len(200)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tournament::ParentTournamentName)
                            .string_len(200)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_parent_tournament_name")
                            .from(Tournament::Table, Tournament::ParentTournamentName)
                            .to(Tournament::Table, Tournament::Name)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tournament_parent_tournament_name")
                    .table(Tournament::Table)
                    .col(Tournament::ParentTournamentName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tournament::Table).to_owned())
            .await
    }
}
