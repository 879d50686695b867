use ratatui::style::{Color, Modifier, Style};

/// Semantic roles the screens style their text with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    Subtitle,
    Accent,
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Faint,
    Highlight,
    Border,
    HelpKey,
    HelpValue,
}

/// Pure mapping from [`Role`] to terminal styling (256-colour palette).
#[derive(Debug, Clone, Copy, Default)]
pub struct Theme;

impl Theme {
    pub fn style(&self, role: Role) -> Style {
        let (index, modifier) = match role {
            Role::Title => (213, Modifier::BOLD | Modifier::UNDERLINED),
            Role::Subtitle => (111, Modifier::BOLD),
            Role::Accent => (219, Modifier::BOLD),
            Role::Primary => (81, Modifier::empty()),
            Role::Secondary => (249, Modifier::empty()),
            Role::Success => (42, Modifier::BOLD),
            Role::Warning => (227, Modifier::BOLD),
            Role::Danger => (203, Modifier::BOLD),
            Role::Faint => (243, Modifier::empty()),
            Role::Highlight => (205, Modifier::BOLD),
            Role::Border => (240, Modifier::empty()),
            Role::HelpKey => (117, Modifier::BOLD),
            Role::HelpValue => (249, Modifier::empty()),
        };
        Style::default()
            .fg(Color::Indexed(index))
            .add_modifier(modifier)
    }
}
