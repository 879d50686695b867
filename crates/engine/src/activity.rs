//! The merged activity feed.
//!
//! Accounts, notes and events are summarized into [`Activity`] entries and
//! merged newest first. Titles and details are never absent: an empty string
//! stands in for missing text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    ACTIVITY_TEXT_WIDTH, DEFAULT_ACTIVITY_LIMIT, accounts, events, notes,
    util::truncate_chars,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Account,
    Note,
    Event,
}

impl ActivityKind {
    /// Capitalized label used by the feed renderer.
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Account => "Account",
            ActivityKind::Note => "Note",
            ActivityKind::Event => "Event",
        }
    }
}

/// One feed entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    pub id: i64,
    pub title: String,
    pub detail: String,
    pub created_at: DateTime<Utc>,
}

impl From<&accounts::Model> for Activity {
    fn from(model: &accounts::Model) -> Self {
        Self {
            kind: ActivityKind::Account,
            id: model.id,
            title: model.name.clone(),
            detail: model.phone.clone().unwrap_or_default(),
            created_at: model.created_at,
        }
    }
}

impl From<&notes::Model> for Activity {
    fn from(model: &notes::Model) -> Self {
        Self {
            kind: ActivityKind::Note,
            id: model.id,
            title: truncate_chars(&model.content, ACTIVITY_TEXT_WIDTH),
            detail: String::new(),
            created_at: model.created_at,
        }
    }
}

impl From<&events::Model> for Activity {
    fn from(model: &events::Model) -> Self {
        Self {
            kind: ActivityKind::Event,
            id: model.id,
            title: model.title.clone(),
            detail: truncate_chars(
                model.details.as_deref().unwrap_or_default(),
                ACTIVITY_TEXT_WIDTH,
            ),
            created_at: model.created_at,
        }
    }
}

/// Resolve a caller-supplied limit; zero means the default.
pub(crate) fn effective_limit(limit: u64) -> u64 {
    if limit == 0 {
        DEFAULT_ACTIVITY_LIMIT
    } else {
        limit
    }
}

/// Order entries newest first and keep at most `limit` of them.
///
/// The sort is stable, so entries sharing a timestamp keep the order in which
/// they were collected.
pub(crate) fn merge_activity(mut entries: Vec<Activity>, limit: u64) -> Vec<Activity> {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries.truncate(usize::try_from(effective_limit(limit)).unwrap_or(usize::MAX));
    entries
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(kind: ActivityKind, id: i64, secs: i64) -> Activity {
        Activity {
            kind,
            id,
            title: format!("{} {id}", kind.label()),
            detail: String::new(),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn merge_orders_newest_first() {
        let merged = merge_activity(
            vec![
                entry(ActivityKind::Account, 1, 10),
                entry(ActivityKind::Note, 1, 30),
                entry(ActivityKind::Event, 1, 20),
            ],
            10,
        );

        let kinds: Vec<_> = merged.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Note, ActivityKind::Event, ActivityKind::Account]
        );
    }

    #[test]
    fn merge_honors_limit_and_default() {
        let entries: Vec<_> = (0..30)
            .map(|i| entry(ActivityKind::Note, i, i))
            .collect();

        assert_eq!(merge_activity(entries.clone(), 3).len(), 3);
        assert_eq!(
            merge_activity(entries, 0).len(),
            DEFAULT_ACTIVITY_LIMIT as usize
        );
    }

    #[test]
    fn equal_timestamps_keep_collection_order() {
        let merged = merge_activity(
            vec![
                entry(ActivityKind::Account, 1, 5),
                entry(ActivityKind::Note, 2, 5),
            ],
            5,
        );
        assert_eq!(merged[0].kind, ActivityKind::Account);
        assert_eq!(merged[1].kind, ActivityKind::Note);
    }

    #[test]
    fn note_title_is_truncated() {
        let model = notes::Model {
            id: 1,
            content: "x".repeat(120),
            account_id: None,
            creator: "sam".to_string(),
            created_at: Utc.timestamp_opt(0, 0).unwrap(),
        };
        let activity = Activity::from(&model);
        assert_eq!(activity.title.chars().count(), ACTIVITY_TEXT_WIDTH);
        assert_eq!(activity.detail, "");
    }
}
