//! Indexes backing the dashboard queries: events by time and the per-account
//! activity lookups.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Notes {
    Table,
    AccountId,
}

#[derive(Iden)]
enum Events {
    Table,
    EventTime,
    AccountId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx-events-event_time")
                    .table(Events::Table)
                    .col(Events::EventTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-events-account_id")
                    .table(Events::Table)
                    .col(Events::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-notes-account_id")
                    .table(Notes::Table)
                    .col(Notes::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx-notes-account_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx-events-account_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx-events-event_time").to_owned())
            .await?;
        Ok(())
    }
}
