use engine::{Account, Activity};
use ratatui::text::Line;

use super::{account_card, activity_lines, styled};
use crate::{
    app::{
        command::{ACCOUNT_DETAIL_MENU, DetailAction, resolve},
        feed::FEED_LIMIT,
        input::TextInput,
        session::{Env, Launch, Screen, Transition},
    },
    ui::{Role, Theme},
};

#[derive(Debug)]
pub struct AccountDetail {
    input: TextInput,
    account: Account,
    /// Loaded on demand; `None` until the activity view is requested.
    activity: Option<Vec<Activity>>,
}

impl AccountDetail {
    pub fn open(env: &mut Env, account: Account) -> Self {
        let mut detail = Self {
            input: TextInput::new("1=Activity  2=Add note  3=Add event  4=Edit  5=Back", 64),
            account,
            activity: None,
        };
        detail.reload_account(env);
        detail
    }

    fn reload_account(&mut self, env: &mut Env) {
        match env.store.account_by_id(self.account.id) {
            Ok(account) => self.account = account,
            Err(err) => {
                tracing::warn!(id = self.account.id, "load account failed: {err}");
                env.error(format!("load account: {err}"));
            }
        }
    }

    fn load_activity(&mut self, env: &mut Env) {
        match env
            .store
            .list_account_activity(self.account.id, FEED_LIMIT)
        {
            Ok(entries) => self.activity = Some(entries),
            Err(err) => {
                tracing::warn!(id = self.account.id, "load activity failed: {err}");
                env.error(format!("load activity: {err}"));
            }
        }
    }
}

impl Screen for AccountDetail {
    fn input(&self) -> &TextInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    fn submit(&mut self, env: &mut Env, text: &str) -> Transition {
        self.input.clear();
        if text.trim().is_empty() {
            return Transition::Stay;
        }
        match resolve(text, ACCOUNT_DETAIL_MENU) {
            Some(DetailAction::Activity) => {
                self.load_activity(env);
                Transition::Stay
            }
            Some(DetailAction::AddNote) => {
                Transition::Push(Launch::NoteWizard(Some(self.account.clone())))
            }
            Some(DetailAction::AddEvent) => {
                Transition::Push(Launch::EventWizard(Some(self.account.clone())))
            }
            Some(DetailAction::Edit) => {
                Transition::Push(Launch::AccountForm(Some(self.account.clone())))
            }
            Some(DetailAction::Back) => Transition::Pop,
            None => {
                env.error("Unknown choice");
                Transition::Stay
            }
        }
    }

    /// Returning from a form or wizard shows the fresh record and feed.
    fn resume(&mut self, env: &mut Env) {
        self.reload_account(env);
        self.load_activity(env);
    }

    fn render(&self, env: &Env, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = vec![styled(theme, Role::Title, self.account.name.clone())];
        lines.extend(account_card(theme, &self.account, env.zone(), ""));
        lines.push(Line::default());

        if let Some(activity) = &self.activity {
            lines.push(styled(theme, Role::Subtitle, "Recent Activity"));
            lines.extend(activity_lines(theme, activity, env.zone()));
            lines.push(Line::default());
        }

        lines.push(styled(theme, Role::Subtitle, "Actions"));
        for item in [
            "1. View activity",
            "2. Add note (auto links)",
            "3. Add event (auto links)",
            "4. Edit account",
        ] {
            lines.push(styled(theme, Role::Secondary, item));
        }
        lines.push(styled(theme, Role::Faint, "5. Back"));
        lines
    }
}
