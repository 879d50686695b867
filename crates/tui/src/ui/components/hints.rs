use ratatui::text::Span;

use crate::{
    app::nav::View,
    ui::theme::{Role, Theme},
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, theme.style(Role::HelpKey)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            theme.style(Role::HelpValue),
        ));
    }

    spans
}

/// Separator span for dividing hint groups.
pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", theme.style(Role::Border))
}

/// Shortcuts honoured on every view.
pub const GLOBAL: &[KeyHint] = &[
    KeyHint::new("Esc", "back"),
    KeyHint::new("exit.", "home"),
    KeyHint::new("Ctrl+C", "quit"),
];

const MAIN_MENU: &[KeyHint] = &[KeyHint::new("1-6", "choose")];
const DASHBOARD: &[KeyHint] = &[KeyHint::new("t", "toggle"), KeyHint::new("r", "refresh")];
const ACCOUNT_LIST: &[KeyHint] = &[
    KeyHint::new("type", "filter"),
    KeyHint::new("#", "open"),
    KeyHint::new("import", "csv"),
];
const ACCOUNT_DETAIL: &[KeyHint] = &[KeyHint::new("1-5", "actions")];
const WIZARD: &[KeyHint] = &[
    KeyHint::new("Enter", "next"),
    KeyHint::new("/", "previous"),
    KeyHint::new("Ctrl+U", "clear"),
];
const CHOICE: &[KeyHint] = &[KeyHint::new("1-3", "choose")];
const EDITOR: &[KeyHint] = &[
    KeyHint::new("Enter", "save"),
    KeyHint::new("Ctrl+U", "clear"),
];

/// Hints that only make sense on `view`.
pub fn for_view(view: View) -> &'static [KeyHint] {
    match view {
        View::MainMenu => MAIN_MENU,
        View::Dashboard => DASHBOARD,
        View::AccountList => ACCOUNT_LIST,
        View::AccountDetail => ACCOUNT_DETAIL,
        View::AccountForm | View::NoteWizard | View::EventWizard => WIZARD,
        View::CreateChoice | View::Settings => CHOICE,
        View::SettingsEditName | View::SettingsEditTimezone => EDITOR,
    }
}
