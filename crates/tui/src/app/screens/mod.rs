//! One [`Screen`](super::session::Screen) per view.

mod account_detail;
mod account_form;
mod accounts;
mod create_choice;
mod dashboard;
mod event;
mod main_menu;
mod note;
mod settings;

use chrono_tz::Tz;
use engine::{Account, Activity};
use ratatui::text::Line;

use super::{feed, session::Env};
use crate::ui::{Role, Theme};

pub use account_detail::AccountDetail;
pub use account_form::AccountForm;
pub use accounts::AccountList;
pub use create_choice::CreateChoice;
pub use dashboard::Dashboard;
pub use event::EventWizard;
pub use main_menu::MainMenu;
pub use note::NoteWizard;
pub use settings::{SettingEditor, Settings};

const ACCOUNT_STAMP: &str = "%b %d %Y %H:%M";
const RULE_WIDTH: usize = 40;

fn styled(theme: &Theme, role: Role, text: impl Into<String>) -> Line<'static> {
    Line::styled(text.into(), theme.style(role))
}

fn rule(theme: &Theme) -> Line<'static> {
    styled(theme, Role::Border, "─".repeat(RULE_WIDTH))
}

fn error_lines(theme: &Theme, error: Option<&str>) -> Vec<Line<'static>> {
    match error {
        Some(error) => vec![Line::default(), styled(theme, Role::Danger, error)],
        None => Vec::new(),
    }
}

/// `Phone: …  •  Email: …  •  Decision Maker: …`, skipping blank fields.
fn account_meta(account: &Account) -> Option<String> {
    let parts: Vec<String> = [
        ("Phone", &account.phone),
        ("Email", &account.email),
        ("Decision Maker", &account.decision_maker),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{label}: {value}"))
    .collect();
    (!parts.is_empty()).then(|| parts.join("  •  "))
}

/// Meta, address and creation lines of an account card.
fn account_card(theme: &Theme, account: &Account, zone: Tz, indent: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(meta) = account_meta(account) {
        lines.push(styled(theme, Role::Secondary, format!("{indent}{meta}")));
    }
    if !account.address.is_empty() {
        lines.push(styled(theme, Role::Faint, format!("{indent}{}", account.address)));
    }
    let created = account.created_at.with_timezone(&zone).format(ACCOUNT_STAMP);
    lines.push(styled(
        theme,
        Role::Faint,
        format!("{indent}Created by {} on {created}", account.creator),
    ));
    lines
}

fn activity_lines(theme: &Theme, entries: &[Activity], zone: Tz) -> Vec<Line<'static>> {
    if entries.is_empty() {
        return vec![styled(theme, Role::Faint, "No activity yet.")];
    }
    entries
        .iter()
        .map(|entry| {
            styled(
                theme,
                feed::kind_role(entry.kind),
                feed::activity_line(entry, zone),
            )
        })
        .collect()
}

/// Resolve the account typed in an association stage. Blank skips.
fn lookup_association(env: &Env, name: &str) -> Result<Option<Account>, String> {
    if name.trim().is_empty() {
        return Ok(None);
    }
    match env.store.account_by_name(name) {
        Ok(account) => Ok(Some(account)),
        Err(err) if err.is_not_found() => Err("Account not found".to_string()),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn meta_skips_blank_fields() {
        let mut account = Account {
            name: "Acme".to_string(),
            phone: "555".to_string(),
            ..Account::default()
        };
        assert_eq!(account_meta(&account).as_deref(), Some("Phone: 555"));

        account.decision_maker = "Dana".to_string();
        assert_eq!(
            account_meta(&account).as_deref(),
            Some("Phone: 555  •  Decision Maker: Dana")
        );

        account.phone.clear();
        account.decision_maker.clear();
        assert_eq!(account_meta(&account), None);
    }

    #[test]
    fn card_shows_creation_in_zone() {
        let account = Account {
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            creator: "sam".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 3, 23, 30, 0).unwrap(),
            ..Account::default()
        };
        let lines: Vec<String> = account_card(&Theme, &account, chrono_tz::Europe::Rome, "  ")
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert_eq!(
            lines,
            vec!["  1 Main St", "  Created by sam on Mar 04 2025 00:30"]
        );
    }
}
