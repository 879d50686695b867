use std::path::PathBuf;

use engine::Account;
use ratatui::text::Line;

use super::{account_card, rule, styled};
use crate::{
    app::{
        input::TextInput,
        selection::{filter_term, resolve_account},
        session::{Env, Launch, Screen, Transition},
    },
    ui::{Role, Theme},
};

const IMPORT: &str = "import";

/// Searchable account list. Filters live while typing.
#[derive(Debug)]
pub struct AccountList {
    input: TextInput,
    all: Vec<Account>,
    filtered: Vec<Account>,
}

impl AccountList {
    pub fn open(env: &mut Env) -> Self {
        let mut list = Self {
            input: TextInput::new("Type to search, / to go back", 64),
            all: Vec::new(),
            filtered: Vec::new(),
        };
        list.refresh(env);
        list
    }

    fn refresh(&mut self, env: &mut Env) {
        match env.store.list_accounts() {
            Ok(accounts) => self.all = accounts,
            Err(err) => {
                tracing::warn!("load accounts failed: {err}");
                env.error(format!("load accounts: {err}"));
                return;
            }
        }
        self.filter(env);
    }

    fn filter(&mut self, env: &mut Env) {
        let Some(term) = filter_term(self.input.value()) else {
            return;
        };
        if term.is_empty() {
            self.filtered = self.all.clone();
            return;
        }
        match env.store.search_accounts(term) {
            Ok(accounts) => self.filtered = accounts,
            Err(err) => {
                tracing::warn!(%term, "search accounts failed: {err}");
                env.error(format!("search accounts: {err}"));
            }
        }
    }

    fn import(&mut self, env: &mut Env, path: &str) {
        let path = path.trim();
        if path.is_empty() {
            env.error("Provide a CSV path");
            return;
        }
        let path = expand_home(path);
        let creator = env.creator();
        match env
            .store
            .import_accounts_csv(&path, &creator, env.zone())
        {
            Ok(report) => {
                tracing::info!(
                    path = %path.display(),
                    created = report.created,
                    skipped = report.skipped,
                    "accounts imported"
                );
                let mut message = format!("Imported {} account(s)", report.created);
                if report.skipped > 0 {
                    message.push_str(&format!(", skipped {}", report.skipped));
                }
                env.info(message);
                if !report.errors.is_empty() {
                    env.error(report.errors.join("; "));
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "import failed: {err}");
                env.error(format!("import csv: {err}"));
            }
        }
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

impl Screen for AccountList {
    fn input(&self) -> &TextInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    fn prompt(&self) -> &'static str {
        "find> "
    }

    fn submit(&mut self, env: &mut Env, text: &str) -> Transition {
        let value = text.trim();
        let lower = value.to_lowercase();
        if lower == IMPORT || lower.starts_with(&format!("{IMPORT} ")) {
            self.input.clear();
            self.import(env, value.get(IMPORT.len()..).unwrap_or_default());
            self.refresh(env);
            return Transition::Stay;
        }

        if let Some(account) = resolve_account(value, &self.filtered, &self.all).cloned() {
            self.input.clear();
            self.filter(env);
            return Transition::Push(Launch::AccountDetail(account));
        }
        self.refresh(env);
        Transition::Stay
    }

    fn on_edit(&mut self, env: &mut Env) {
        self.filter(env);
    }

    fn resume(&mut self, env: &mut Env) {
        self.refresh(env);
    }

    fn render(&self, env: &Env, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![
            styled(theme, Role::Title, "Accounts"),
            styled(
                theme,
                Role::Faint,
                "Type to search. Enter a number or name to manage, or 'import <path>' to load CSV. '/' to go back, 'exit.' home.",
            ),
            Line::default(),
        ];
        if self.filtered.is_empty() {
            lines.push(styled(theme, Role::Warning, "No accounts found."));
        }
        for (idx, account) in self.filtered.iter().enumerate() {
            lines.push(styled(
                theme,
                Role::Primary,
                format!("{}. {}", idx + 1, account.name),
            ));
            lines.extend(account_card(theme, account, env.zone(), "  "));
            lines.push(Line::default());
        }
        lines.push(rule(theme));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{nav::View, session::harness::session};

    #[test]
    fn typing_filters_live() {
        let (mut session, store) = session();
        store.seed("Acme");
        store.seed("Globex");
        store.seed("Initech");
        session.enter("2");
        assert!(session.rendered().contains("3. Initech"));

        for ch in "ob".chars() {
            session.type_char(ch);
        }
        let screen = session.rendered();
        assert!(screen.contains("1. Globex"));
        assert!(!screen.contains("Acme"));

        session.backspace();
        session.backspace();
        assert!(session.rendered().contains("3. Initech"));
    }

    #[test]
    fn index_selects_from_the_visible_list() {
        let (mut session, store) = session();
        store.seed("Acme");
        store.seed("Globex");
        session.enter("2");
        session.enter("2");
        assert_eq!(session.active(), View::AccountDetail);
        assert!(session.rendered().starts_with("Globex"));
    }

    #[test]
    fn unresolved_input_stays() {
        let (mut session, store) = session();
        store.seed("Acme Corp");
        store.seed("Acme Labs");
        session.enter("2");
        session.enter("acme");
        assert_eq!(session.active(), View::AccountList);
        assert!(session.rendered().contains("2. Acme Labs"));
    }

    #[test]
    fn empty_list_message() {
        let (mut session, _) = session();
        session.enter("2");
        assert!(session.rendered().contains("No accounts found."));
    }

    #[test]
    fn import_requires_a_path() {
        let (mut session, _) = session();
        session.enter("2");
        session.enter("import   ");
        assert!(session.rendered().contains("Provide a CSV path"));
    }

    #[test]
    fn import_failures_are_reported() {
        let (mut session, _) = session();
        session.enter("2");
        session.enter("import /nowhere/leads.csv");
        assert_eq!(session.active(), View::AccountList);
        assert!(session.rendered().contains("import csv: /nowhere/leads.csv"));
    }

    #[test]
    fn home_expansion() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~/leads.csv"), home.join("leads.csv"));
        assert_eq!(expand_home("~"), home);
        assert_eq!(expand_home("/tmp/x.csv"), PathBuf::from("/tmp/x.csv"));
        assert_eq!(expand_home("~other/x"), PathBuf::from("~other/x"));
    }
}
