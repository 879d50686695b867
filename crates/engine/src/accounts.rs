//! The module contains the `Account` record and its database entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A customer account.
///
/// Optional contact fields are empty strings when unset; the database keeps
/// them as NULL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub decision_maker: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
}

/// Input for [`Engine::create_account`](crate::Engine::create_account).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub decision_maker: String,
    pub creator: String,
    /// Defaults to the insertion time.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewAccount {
    pub fn named(name: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creator: creator.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub decision_maker: Option<String>,
    pub creator: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::notes::Entity")]
    Notes,
    #[sea_orm(has_many = "super::events::Entity")]
    Events,
}

impl Related<super::notes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notes.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            phone: model.phone.unwrap_or_default(),
            address: model.address.unwrap_or_default(),
            email: model.email.unwrap_or_default(),
            decision_maker: model.decision_maker.unwrap_or_default(),
            creator: model.creator,
            created_at: model.created_at,
        }
    }
}
