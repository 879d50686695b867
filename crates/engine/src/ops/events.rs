use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, Event, NewEvent, ResultEngine, accounts, events,
    util::{normalize_required, optional_text},
};

use super::{Engine, with_tx};

impl Engine {
    /// Store an event, optionally linked to an account.
    pub async fn create_event(&self, input: NewEvent) -> ResultEngine<Event> {
        let title = normalize_required(&input.title, "event title")?;
        let created_at = input.created_at.unwrap_or_else(Utc::now);
        with_tx!(self, |db_tx| {
            let account_name = match input.account_id {
                Some(id) => Some(
                    accounts::Entity::find_by_id(id)
                        .one(&db_tx)
                        .await?
                        .ok_or_else(|| EngineError::KeyNotFound(format!("account #{id}")))?
                        .name,
                ),
                None => None,
            };

            let model = events::ActiveModel {
                id: ActiveValue::NotSet,
                title: ActiveValue::Set(title),
                details: ActiveValue::Set(optional_text(&input.details)),
                event_time: ActiveValue::Set(input.event_time),
                account_id: ActiveValue::Set(input.account_id),
                creator: ActiveValue::Set(input.creator.trim().to_string()),
                created_at: ActiveValue::Set(created_at),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(
                event_id = model.id,
                event_time = %model.event_time,
                account_id = ?model.account_id,
                "event created"
            );
            Ok(Event::from_parts(model, account_name))
        })
    }

    /// Every event, soonest first, with the linked account's name.
    ///
    /// Events sharing a timestamp come back in insertion (id) order.
    pub async fn list_events(&self) -> ResultEngine<Vec<Event>> {
        let rows = events::Entity::find()
            .find_also_related(accounts::Entity)
            .order_by_asc(events::Column::EventTime)
            .order_by_asc(events::Column::Id)
            .all(&self.database)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(event, account)| Event::from_parts(event, account.map(|a| a.name)))
            .collect())
    }
}
