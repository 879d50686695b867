//! Formatting of activity feeds and event lines.

use chrono_tz::Tz;
use engine::{Activity, ActivityKind, Event};

/// Entries requested for the dashboard and account feeds.
pub const FEED_LIMIT: u64 = 50;

/// `[Note] Follow up — Mar 01 09:00`
pub fn activity_line(activity: &Activity, zone: Tz) -> String {
    let stamp = activity.created_at.with_timezone(&zone).format("%b %d %H:%M");
    format!(
        "[{}] {} — {stamp}",
        activity.kind.label(),
        activity.title
    )
}

/// `Mon Mar 03 09:00 — Demo (Acme) • bring slides • by sam`
pub fn event_line(event: &Event, zone: Tz) -> String {
    let mut line = event
        .event_time
        .with_timezone(&zone)
        .format("%a %b %d %H:%M")
        .to_string();
    line.push_str(" — ");
    line.push_str(&event.title);
    if let Some(account) = &event.account_name {
        line.push_str(&format!(" ({account})"));
    }
    if !event.details.is_empty() {
        line.push_str(" • ");
        line.push_str(&event.details);
    }
    line.push_str(" • by ");
    line.push_str(&event.creator);
    line
}

/// Dashboard colour role per kind.
pub fn kind_role(kind: ActivityKind) -> crate::ui::Role {
    use crate::ui::Role;
    match kind {
        ActivityKind::Account => Role::Accent,
        ActivityKind::Note => Role::Success,
        ActivityKind::Event => Role::Warning,
    }
}
