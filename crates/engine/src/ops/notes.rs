use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{EngineError, NewNote, Note, ResultEngine, accounts, notes, util::normalize_required};

use super::{Engine, with_tx};

impl Engine {
    /// Store a note, optionally linked to an account.
    pub async fn create_note(&self, input: NewNote) -> ResultEngine<Note> {
        let content = normalize_required(&input.content, "note content")?;
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

            let model = notes::ActiveModel {
                id: ActiveValue::NotSet,
                content: ActiveValue::Set(content),
                account_id: ActiveValue::Set(input.account_id),
                creator: ActiveValue::Set(input.creator.trim().to_string()),
                created_at: ActiveValue::Set(created_at),
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(note_id = model.id, account_id = ?model.account_id, "note created");
            Ok(Note::from_parts(model, account_name))
        })
    }
}
