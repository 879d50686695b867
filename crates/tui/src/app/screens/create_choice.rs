use ratatui::text::Line;

use super::styled;
use crate::{
    app::{
        input::TextInput,
        session::{Env, Launch, Screen, Transition},
    },
    ui::{Role, Theme},
};

/// Picks between the note and event wizards. The chosen wizard replaces
/// this view, so leaving the wizard skips it.
#[derive(Debug)]
pub struct CreateChoice {
    input: TextInput,
}

impl Default for CreateChoice {
    fn default() -> Self {
        Self {
            input: TextInput::new("1=Note  2=Event  3=Back", 32),
        }
    }
}

impl Screen for CreateChoice {
    fn input(&self) -> &TextInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    fn submit(&mut self, env: &mut Env, text: &str) -> Transition {
        self.input.clear();
        match text.trim().to_lowercase().as_str() {
            "1" | "note" | "n" => Transition::Replace(Launch::NoteWizard(None)),
            "2" | "event" | "e" => Transition::Replace(Launch::EventWizard(None)),
            "3" => Transition::Pop,
            "exit" => Transition::Home,
            _ => {
                env.error("Choose 1 for note or 2 for event");
                Transition::Stay
            }
        }
    }

    fn render(&self, _env: &Env, theme: &Theme) -> Vec<Line<'static>> {
        vec![
            styled(theme, Role::Title, "Create Note or Event"),
            styled(theme, Role::Secondary, "1. Note"),
            styled(theme, Role::Secondary, "2. Event"),
            styled(theme, Role::Faint, "3. Back"),
        ]
    }
}
