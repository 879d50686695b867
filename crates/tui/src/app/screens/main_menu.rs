use ratatui::text::Line;

use super::styled;
use crate::{
    app::{
        command::{MAIN_MENU, MainAction, resolve},
        input::TextInput,
        session::{Env, Launch, Screen, Transition},
    },
    ui::{Role, Theme},
};

const BANNER: &[&str] = &[
    r"   __________  __  ___    ______                  ",
    r"  / ____/ __ \/  |/  /   /_  __/__  _________ ___ ",
    r" / /   / /_/ / /|_/ /_____/ / / _ \/ ___/ __ `__ \",
    r"/ /___/ _, _/ /  / /_____/ / /  __/ /  / / / / / /",
    r"\____/_/ |_/_/  /_/     /_/  \___/_/  /_/ /_/ /_/ ",
];

const ITEMS: &[&str] = &[
    "1. Dashboard",
    "2. View accounts",
    "3. Add account",
    "4. Create note/event",
    "5. Settings & Help",
    "6. Quit",
];

/// Root view. The banner disappears after the first submission.
#[derive(Debug)]
pub struct MainMenu {
    input: TextInput,
    splash: bool,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self {
            input: TextInput::new("Choose an option", 32),
            splash: true,
        }
    }
}

impl Screen for MainMenu {
    fn input(&self) -> &TextInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    fn submit(&mut self, env: &mut Env, text: &str) -> Transition {
        self.splash = false;
        self.input.clear();

        let value = text.trim();
        if value.is_empty() || value == "0" {
            return Transition::Stay;
        }
        match resolve(value, MAIN_MENU) {
            Some(MainAction::Dashboard) => Transition::Push(Launch::Dashboard),
            Some(MainAction::Accounts) => Transition::Push(Launch::AccountList),
            Some(MainAction::AddAccount) => Transition::Push(Launch::AccountForm(None)),
            Some(MainAction::Create) => Transition::Push(Launch::CreateChoice),
            Some(MainAction::Settings) => Transition::Push(Launch::Settings),
            Some(MainAction::Quit) => Transition::Quit,
            None => {
                env.error("Unknown choice");
                Transition::Stay
            }
        }
    }

    fn back(&mut self, _env: &mut Env) -> Transition {
        Transition::Stay
    }

    fn render(&self, _env: &Env, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if self.splash {
            lines.extend(
                BANNER
                    .iter()
                    .map(|row| styled(theme, Role::Highlight, *row)),
            );
            lines.push(Line::default());
        }
        lines.push(styled(theme, Role::Title, "CRM-Term"));
        lines.push(styled(theme, Role::Secondary, "A lightning-fast terminal CRM"));
        lines.push(Line::default());
        lines.extend(ITEMS.iter().map(|item| styled(theme, Role::Primary, *item)));
        lines
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{nav::View, session::harness::session};

    #[test]
    fn splash_hides_after_first_submission() {
        let (mut session, _) = session();
        assert!(session.rendered().contains("/_/ |_/_/"));
        session.enter("");
        assert!(!session.rendered().contains("/_/ |_/_/"));
        assert!(session.rendered().contains("CRM-Term"));
    }

    #[test]
    fn numbers_words_and_prefixes_open_views() {
        for (input, view) in [
            ("1", View::Dashboard),
            ("dash", View::Dashboard),
            ("2", View::AccountList),
            ("add account", View::AccountForm),
            ("4", View::CreateChoice),
            ("set", View::Settings),
            ("help", View::Settings),
        ] {
            let (mut session, _) = session();
            session.enter(input);
            assert_eq!(session.active(), view, "{input}");
        }
    }

    #[test]
    fn zero_and_blank_are_silent() {
        let (mut session, _) = session();
        session.enter("0");
        session.enter("");
        assert_eq!(session.active(), View::MainMenu);
        assert!(!session.rendered().contains("Unknown choice"));
    }

    #[test]
    fn unknown_and_ambiguous_input_report() {
        let (mut session, _) = session();
        session.enter("banana");
        assert!(session.rendered().contains("Unknown choice"));
        session.enter("e");
        assert!(session.rendered().contains("Unknown choice"));
    }

    #[test]
    fn quit_option_and_token() {
        for input in ["6", "q", "quit", "EXIT."] {
            let (mut session, _) = session();
            session.enter(input);
            assert!(session.should_quit(), "{input}");
        }
    }
}
