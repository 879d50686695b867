//! The module contains the `Event` record and its database entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A scheduled interaction, optionally tied to an account.
///
/// `account_name` is filled by [`Engine::list_events`](crate::Engine::list_events)
/// from the linked account; it is `None` for unlinked events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub details: String,
    pub event_time: DateTime<Utc>,
    pub account_id: Option<i64>,
    pub account_name: Option<String>,
    pub creator: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub details: String,
    pub event_time: DateTime<Utc>,
    pub account_id: Option<i64>,
    pub creator: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub details: Option<String>,
    pub event_time: DateTimeUtc,
    pub account_id: Option<i64>,
    pub creator: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Event {
    pub(crate) fn from_parts(model: Model, account_name: Option<String>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            details: model.details.unwrap_or_default(),
            event_time: model.event_time,
            account_id: model.account_id,
            account_name,
            creator: model.creator,
            created_at: model.created_at,
        }
    }
}
