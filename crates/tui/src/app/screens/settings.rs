use ratatui::text::{Line, Span};

use super::styled;
use crate::{
    app::{
        input::TextInput,
        session::{Env, Launch, Screen, Transition},
    },
    ui::{Role, Theme},
};

const SHORTCUTS: &[(&str, &str)] = &[("/", "Back"), ("exit.", "Main menu"), ("Ctrl+C", "Quit")];

/// Current preferences and the shortcut reference.
fn overview(env: &Env, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        styled(theme, Role::Title, "Settings & Help"),
        styled(theme, Role::Faint, "'/' goes back, 'exit.' returns home."),
        Line::default(),
        styled(
            theme,
            Role::Secondary,
            format!("Name: {}", env.prefs.display_name()),
        ),
        styled(
            theme,
            Role::Secondary,
            format!("Timezone: {}", env.prefs.timezone_name()),
        ),
        Line::default(),
        styled(theme, Role::Highlight, "Shortcuts"),
    ];
    lines.extend(SHORTCUTS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(*key, theme.style(Role::HelpKey)),
            Span::raw(" → "),
            Span::styled(*action, theme.style(Role::HelpValue)),
        ])
    }));
    lines.push(Line::default());
    lines
}

#[derive(Debug)]
pub struct Settings {
    input: TextInput,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: TextInput::new("1=Name  2=Timezone  3=Back", 40),
        }
    }
}

impl Screen for Settings {
    fn input(&self) -> &TextInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    fn submit(&mut self, env: &mut Env, text: &str) -> Transition {
        self.input.clear();
        match text.trim().to_lowercase().as_str() {
            "1" | "name" => Transition::Push(Launch::EditName),
            "2" | "timezone" => Transition::Push(Launch::EditTimezone),
            "3" => Transition::Pop,
            "exit" => Transition::Home,
            _ => {
                env.error("Choose 1 or 2 to edit settings");
                Transition::Stay
            }
        }
    }

    fn render(&self, env: &Env, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = overview(env, theme);
        lines.push(styled(theme, Role::Secondary, "1. Update name"));
        lines.push(styled(theme, Role::Secondary, "2. Update timezone"));
        lines.push(styled(theme, Role::Faint, "3. Back"));
        lines
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    Name,
    Timezone,
}

/// Single-field editor for one preference, pre-filled with its value.
#[derive(Debug)]
pub struct SettingEditor {
    input: TextInput,
    setting: Setting,
}

impl SettingEditor {
    pub fn name(env: &Env) -> Self {
        Self {
            input: TextInput::new("Display name", 64).with_value(env.prefs.display_name()),
            setting: Setting::Name,
        }
    }

    pub fn timezone(env: &Env) -> Self {
        Self {
            input: TextInput::new("Area/City", 64).with_value(env.prefs.timezone_name()),
            setting: Setting::Timezone,
        }
    }
}

impl Screen for SettingEditor {
    fn input(&self) -> &TextInput {
        &self.input
    }

    fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    fn submit(&mut self, env: &mut Env, text: &str) -> Transition {
        let (result, message) = match self.setting {
            Setting::Name => (env.prefs.set_name(text), "Name updated"),
            Setting::Timezone => (env.prefs.set_timezone(text), "Timezone updated"),
        };
        match result {
            Ok(()) => {
                tracing::info!(setting = ?self.setting, "preference updated");
                env.info(message);
                Transition::Pop
            }
            Err(err) => {
                env.error(err);
                Transition::Stay
            }
        }
    }

    fn render(&self, env: &Env, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = overview(env, theme);
        let prompt = match self.setting {
            Setting::Name => "Enter new name:",
            Setting::Timezone => "Enter timezone (e.g. America/New_York):",
        };
        lines.push(styled(theme, Role::Secondary, prompt));
        lines
    }
}
