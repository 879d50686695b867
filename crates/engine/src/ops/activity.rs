use sea_orm::{QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    Activity, ResultEngine, accounts,
    activity::{effective_limit, merge_activity},
    events, notes,
};

use super::Engine;

impl Engine {
    /// Accounts, notes and events merged newest first.
    ///
    /// Each table contributes at most `limit` of its newest rows before the
    /// merge. A `limit` of zero falls back to
    /// [`DEFAULT_ACTIVITY_LIMIT`](crate::DEFAULT_ACTIVITY_LIMIT).
    pub async fn list_activity(&self, limit: u64) -> ResultEngine<Vec<Activity>> {
        self.collect_activity(None, limit).await
    }

    /// The feed scoped to one account: the account itself plus its notes and
    /// events.
    pub async fn list_account_activity(
        &self,
        account_id: i64,
        limit: u64,
    ) -> ResultEngine<Vec<Activity>> {
        self.collect_activity(Some(account_id), limit).await
    }

    async fn collect_activity(
        &self,
        account_id: Option<i64>,
        limit: u64,
    ) -> ResultEngine<Vec<Activity>> {
        let limit = effective_limit(limit);

        let mut account_rows = accounts::Entity::find()
            .order_by_desc(accounts::Column::CreatedAt)
            .order_by_asc(accounts::Column::Id)
            .limit(limit);
        let mut note_rows = notes::Entity::find()
            .order_by_desc(notes::Column::CreatedAt)
            .order_by_asc(notes::Column::Id)
            .limit(limit);
        let mut event_rows = events::Entity::find()
            .order_by_desc(events::Column::CreatedAt)
            .order_by_asc(events::Column::Id)
            .limit(limit);
        if let Some(id) = account_id {
            account_rows = account_rows.filter(accounts::Column::Id.eq(id));
            note_rows = note_rows.filter(notes::Column::AccountId.eq(id));
            event_rows = event_rows.filter(events::Column::AccountId.eq(id));
        }

        let mut entries: Vec<Activity> = account_rows
            .all(&self.database)
            .await?
            .iter()
            .map(Activity::from)
            .collect();
        entries.extend(note_rows.all(&self.database).await?.iter().map(Activity::from));
        entries.extend(event_rows.all(&self.database).await?.iter().map(Activity::from));
        Ok(merge_activity(entries, limit))
    }
}
