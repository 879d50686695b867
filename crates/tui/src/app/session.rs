//! The interactive session: navigation, per-view screens and the shared
//! environment they act on.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use engine::Account;
use ratatui::text::{Line, Span};

use super::{
    command::Escape,
    input::TextInput,
    nav::{NavStack, View},
    screens,
};
use crate::{
    prefs::PreferenceStore,
    store::Store,
    ui::{Role, Theme},
};

/// Feedback for the last submission. Cleared before the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    pub info: Option<String>,
    pub error: Option<String>,
}

/// Everything a screen may read or change besides its own state.
pub struct Env {
    pub store: Box<dyn Store>,
    pub prefs: Box<dyn PreferenceStore>,
    pub clock: fn() -> DateTime<Utc>,
    pub notice: Notice,
}

impl Env {
    pub fn new(
        store: Box<dyn Store>,
        prefs: Box<dyn PreferenceStore>,
        clock: fn() -> DateTime<Utc>,
    ) -> Self {
        Self {
            store,
            prefs,
            clock,
            notice: Notice::default(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn zone(&self) -> Tz {
        self.prefs.location()
    }

    pub fn local_now(&self) -> DateTime<Tz> {
        self.now().with_timezone(&self.zone())
    }

    /// Creator recorded on new records.
    pub fn creator(&self) -> String {
        self.prefs.display_name().to_string()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.notice.info = Some(message.into());
    }

    pub fn error(&mut self, message: impl std::fmt::Display) {
        self.notice.error = Some(message.to_string());
    }
}

/// What the session should do after a screen handled input.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Stay,
    Push(Launch),
    /// Swap the active view, keeping the history.
    Replace(Launch),
    Pop,
    /// Clear the history and show the main menu.
    Home,
    Quit,
}

/// A view to open, with the data it starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum Launch {
    Dashboard,
    AccountList,
    AccountDetail(Account),
    /// `None` creates a new account.
    AccountForm(Option<Account>),
    CreateChoice,
    /// Pre-associated account, if any.
    NoteWizard(Option<Account>),
    EventWizard(Option<Account>),
    Settings,
    EditName,
    EditTimezone,
}

impl Launch {
    pub fn view(&self) -> View {
        match self {
            Self::Dashboard => View::Dashboard,
            Self::AccountList => View::AccountList,
            Self::AccountDetail(_) => View::AccountDetail,
            Self::AccountForm(_) => View::AccountForm,
            Self::CreateChoice => View::CreateChoice,
            Self::NoteWizard(_) => View::NoteWizard,
            Self::EventWizard(_) => View::EventWizard,
            Self::Settings => View::Settings,
            Self::EditName => View::SettingsEditName,
            Self::EditTimezone => View::SettingsEditTimezone,
        }
    }

    fn build(self, env: &mut Env) -> Box<dyn Screen> {
        match self {
            Self::Dashboard => Box::new(screens::Dashboard::open(env)),
            Self::AccountList => Box::new(screens::AccountList::open(env)),
            Self::AccountDetail(account) => Box::new(screens::AccountDetail::open(env, account)),
            Self::AccountForm(account) => Box::new(screens::AccountForm::open(account)),
            Self::CreateChoice => Box::new(screens::CreateChoice::default()),
            Self::NoteWizard(account) => Box::new(screens::NoteWizard::open(account)),
            Self::EventWizard(account) => Box::new(screens::EventWizard::open(account)),
            Self::Settings => Box::new(screens::Settings::default()),
            Self::EditName => Box::new(screens::SettingEditor::name(env)),
            Self::EditTimezone => Box::new(screens::SettingEditor::timezone(env)),
        }
    }
}

/// One view's state and behaviour.
pub trait Screen {
    fn input(&self) -> &TextInput;
    fn input_mut(&mut self) -> &mut TextInput;

    fn prompt(&self) -> &'static str {
        "> "
    }

    /// Handle a submitted line. The screen owns clearing its buffer.
    fn submit(&mut self, env: &mut Env, text: &str) -> Transition;

    /// The back token or Esc.
    fn back(&mut self, _env: &mut Env) -> Transition {
        Transition::Pop
    }

    /// Called after every keystroke that changed the buffer.
    fn on_edit(&mut self, _env: &mut Env) {}

    /// Called when the view becomes active again after a pop.
    fn resume(&mut self, _env: &mut Env) {}

    fn render(&self, env: &Env, theme: &Theme) -> Vec<Line<'static>>;
}

pub struct Session {
    env: Env,
    nav: NavStack,
    screens: HashMap<View, Box<dyn Screen>>,
    quit: bool,
}

impl Session {
    pub fn new(env: Env) -> Self {
        let mut screens: HashMap<View, Box<dyn Screen>> = HashMap::new();
        screens.insert(View::ROOT, Box::new(screens::MainMenu::default()));
        Self {
            env,
            nav: NavStack::new(),
            screens,
            quit: false,
        }
    }

    pub fn active(&self) -> View {
        self.nav.active()
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn type_char(&mut self, ch: char) {
        let Some(screen) = self.screens.get_mut(&self.nav.active()) else {
            return;
        };
        if screen.input_mut().push(ch) {
            screen.on_edit(&mut self.env);
        }
    }

    pub fn backspace(&mut self) {
        let Some(screen) = self.screens.get_mut(&self.nav.active()) else {
            return;
        };
        if screen.input_mut().pop().is_some() {
            screen.on_edit(&mut self.env);
        }
    }

    pub fn clear_line(&mut self) {
        let Some(screen) = self.screens.get_mut(&self.nav.active()) else {
            return;
        };
        if !screen.input().is_empty() {
            screen.input_mut().clear();
            screen.on_edit(&mut self.env);
        }
    }

    /// Esc: same as submitting the back token.
    pub fn back(&mut self) {
        self.env.notice = Notice::default();
        let Some(screen) = self.screens.get_mut(&self.nav.active()) else {
            return;
        };
        screen.input_mut().clear();
        let transition = screen.back(&mut self.env);
        self.apply(transition);
    }

    /// Enter: route the current line through the escape tokens, then the
    /// active screen.
    pub fn submit(&mut self) {
        self.env.notice = Notice::default();
        let active = self.nav.active();
        let Some(screen) = self.screens.get_mut(&active) else {
            return;
        };
        let text = screen.input().value().to_string();

        let transition = match Escape::parse(&text) {
            Some(Escape::Exit) if active != View::ROOT => {
                screen.input_mut().clear();
                Transition::Home
            }
            Some(Escape::Back) => {
                screen.input_mut().clear();
                screen.back(&mut self.env)
            }
            _ => screen.submit(&mut self.env, &text),
        };
        self.apply(transition);
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => return,
            Transition::Push(launch) => {
                let view = launch.view();
                let screen = launch.build(&mut self.env);
                self.nav.push(view);
                self.screens.insert(view, screen);
            }
            Transition::Replace(launch) => {
                let view = launch.view();
                let screen = launch.build(&mut self.env);
                self.nav.replace(view);
                self.screens.insert(view, screen);
            }
            Transition::Pop => {
                self.nav.pop();
                self.resume_active();
            }
            Transition::Home => {
                self.nav.reset_to_root();
                self.resume_active();
            }
            Transition::Quit => {
                self.quit = true;
                return;
            }
        }
        let nav = &self.nav;
        self.screens.retain(|view, _| nav.holds(*view));
        tracing::debug!(view = ?self.nav.active(), depth = self.nav.depth(), "navigated");
    }

    fn resume_active(&mut self) {
        if let Some(screen) = self.screens.get_mut(&self.nav.active()) {
            screen.resume(&mut self.env);
        }
    }

    /// Screen content followed by the notice lines.
    pub fn body(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = self
            .screens
            .get(&self.nav.active())
            .map(|screen| screen.render(&self.env, theme))
            .unwrap_or_default();

        let notice = &self.env.notice;
        if notice.info.is_some() || notice.error.is_some() {
            lines.push(Line::default());
        }
        if let Some(info) = &notice.info {
            lines.push(Line::styled(info.clone(), theme.style(Role::Success)));
        }
        if let Some(error) = &notice.error {
            lines.push(Line::styled(error.clone(), theme.style(Role::Danger)));
        }
        lines
    }

    /// Prompt and the typed text, or the placeholder when empty. Selected
    /// text is highlighted since typing will replace it.
    pub fn prompt_line(&self, theme: &Theme) -> Line<'static> {
        let Some(screen) = self.screens.get(&self.nav.active()) else {
            return Line::default();
        };
        let input = screen.input();
        let prompt = Span::styled(screen.prompt(), theme.style(Role::Accent));
        let text = if input.is_empty() {
            Span::styled(input.placeholder(), theme.style(Role::Faint))
        } else if input.is_selected() {
            Span::styled(input.value().to_string(), theme.style(Role::Highlight))
        } else {
            Span::styled(input.value().to_string(), theme.style(Role::Primary))
        };
        Line::from(vec![prompt, text])
    }

    /// Column of the cursor within the prompt line.
    pub fn cursor_offset(&self) -> u16 {
        self.screens
            .get(&self.nav.active())
            .map(|screen| screen.prompt().chars().count() + screen.input().value().chars().count())
            .and_then(|width| u16::try_from(width).ok())
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn enter(&mut self, text: &str) {
        for ch in text.chars() {
            self.type_char(ch);
        }
        self.submit();
    }

    #[cfg(test)]
    pub(crate) fn rendered(&self) -> String {
        let theme = Theme;
        self.body(&theme)
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[cfg(test)]
    pub(crate) fn input_value(&self) -> String {
        self.screens
            .get(&self.nav.active())
            .map(|screen| screen.input().value().to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod harness {
    use std::rc::Rc;

    use chrono::TimeZone;

    use super::*;
    use crate::{prefs::Preferences, store::memory::MemoryStore};

    /// Monday 2025-03-03 09:00 UTC.
    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
    }

    pub fn session() -> (Session, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::new(fixed_now));
        let env = Env::new(
            Box::new(Rc::clone(&store)),
            Box::new(Preferences::in_memory("sam", "UTC")),
            fixed_now,
        );
        (Session::new(env), store)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::{harness::session, *};

    #[test]
    fn starts_at_main_menu() {
        let (session, _) = session();
        assert_eq!(session.active(), View::MainMenu);
        assert!(!session.should_quit());
    }

    #[test]
    fn exit_token_returns_home_from_any_depth() {
        let (mut session, store) = session();
        store.seed("Acme");
        session.enter("2");
        session.enter("1");
        assert_eq!(session.active(), View::AccountDetail);
        session.enter("exit.");
        assert_eq!(session.active(), View::MainMenu);
        assert!(!session.should_quit());
    }

    #[test]
    fn exit_token_at_root_quits() {
        let (mut session, _) = session();
        session.enter("exit.");
        assert!(session.should_quit());
    }

    #[test]
    fn back_token_and_esc_pop() {
        let (mut session, _) = session();
        session.enter("5");
        assert_eq!(session.active(), View::Settings);
        session.enter("/");
        assert_eq!(session.active(), View::MainMenu);

        session.enter("1");
        assert_eq!(session.active(), View::Dashboard);
        session.back();
        assert_eq!(session.active(), View::MainMenu);
        assert_eq!(session.input_value(), "");
    }

    #[test]
    fn popped_screens_are_dropped() {
        let (mut session, _) = session();
        session.enter("5");
        session.enter("/");
        assert_eq!(session.screens.len(), 1);
    }

    #[test]
    fn note_without_account_returns_to_prior_view() {
        let (mut session, store) = session();
        session.enter("4");
        assert_eq!(session.active(), View::CreateChoice);
        session.enter("1");
        assert_eq!(session.active(), View::NoteWizard);
        session.enter("Call back tomorrow");
        session.enter("n");

        assert_eq!(session.active(), View::MainMenu);
        assert!(session.rendered().contains("Note saved"));
        let notes = store.notes();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, "Call back tomorrow");
        assert_eq!(notes[0].account_id, None);
        assert_eq!(notes[0].creator, "sam");
    }

    #[test]
    fn note_linked_by_name() {
        let (mut session, store) = session();
        let acme = store.seed("Acme");
        session.enter("4");
        session.enter("note");
        session.enter("Pricing sent");
        session.enter("y");
        session.enter("nope");
        assert!(session.rendered().contains("Account not found"));
        session.enter("acme");

        assert!(session.rendered().contains("Note saved for Acme"));
        assert_eq!(store.notes()[0].account_id, Some(acme.id));
    }

    #[test]
    fn notice_lasts_one_submission() {
        let (mut session, _) = session();
        session.enter("zzz");
        assert!(session.rendered().contains("Unknown choice"));
        session.enter("");
        assert!(!session.rendered().contains("Unknown choice"));
    }

    #[test]
    fn duplicate_account_returns_to_name_with_value_kept() {
        let (mut session, store) = session();
        store.seed("Acme");
        session.enter("3");
        assert_eq!(session.active(), View::AccountForm);
        for value in ["ACME", "555", "", "", ""] {
            session.enter(value);
        }

        assert_eq!(session.active(), View::AccountForm);
        assert_eq!(session.input_value(), "ACME");
        assert!(
            session
                .rendered()
                .contains("An account with that name already exists")
        );

        session.clear_line();
        session.enter("Globex");
        for _ in 0..4 {
            session.enter("");
        }
        assert_eq!(session.active(), View::MainMenu);
        assert!(session.rendered().contains("Account 'Globex' created"));
        let globex = store.account_by_name("globex").unwrap();
        assert_eq!(globex.phone, "555");
    }

    #[test]
    fn wizard_back_restores_previous_stage() {
        let (mut session, store) = session();
        session.enter("4");
        session.enter("2");
        session.enter("Demo");
        session.enter("bring slides");
        session.enter("/");
        assert_eq!(session.input_value(), "bring slides");
        session.enter("/");
        assert_eq!(session.input_value(), "Demo");
        session.enter("/");
        assert_eq!(session.active(), View::MainMenu);
        assert!(store.events().is_empty());
    }

    #[test]
    fn event_from_account_detail_links_automatically() {
        let (mut session, store) = session();
        let acme = store.seed("Acme");
        session.enter("2");
        session.enter("acme");
        assert_eq!(session.active(), View::AccountDetail);
        session.enter("3");
        session.enter("Demo");
        session.enter("");
        session.enter("2025-03-04 15:30");

        assert_eq!(session.active(), View::AccountDetail);
        let events = store.events();
        assert_eq!(events[0].account_id, Some(acme.id));
        assert_eq!(
            events[0].event_time,
            Utc.with_ymd_and_hms(2025, 3, 4, 15, 30, 0).unwrap()
        );
        assert!(session.rendered().contains("Event created for Acme"));
        assert!(session.rendered().contains("[Event] Demo"));
    }
}
