pub mod components;
pub mod keymap;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::app::session::Session;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::{Role, Theme};

pub fn render(frame: &mut Frame<'_>, session: &Session, theme: &Theme) {
    let area = frame.area();

    // Info bar, active view, prompt, shortcuts
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_info_bar(frame, layout[0], session, theme);

    let body = Paragraph::new(session.body(theme)).wrap(Wrap { trim: false });
    frame.render_widget(body, layout[1].inner(Margin::new(1, 1)));

    let prompt = layout[2];
    frame.render_widget(Paragraph::new(session.prompt_line(theme)), prompt);
    let cursor_x = prompt
        .x
        .saturating_add(session.cursor_offset())
        .min(prompt.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, prompt.y));

    render_bottom_bar(frame, layout[3], session, theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, session: &Session, theme: &Theme) {
    let env = session.env();
    let line = Line::from(vec![
        Span::styled("CRM-Term", theme.style(Role::Accent)),
        Span::styled("  User", theme.style(Role::Faint)),
        Span::raw(format!(": {}  ", env.prefs.display_name())),
        Span::styled("Zone", theme.style(Role::Faint)),
        Span::raw(format!(": {}  ", env.prefs.timezone_name())),
        Span::styled("View", theme.style(Role::Faint)),
        Span::raw(format!(": {}", session.active().label())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, session: &Session, theme: &Theme) {
    let mut parts = components::hints::hints_to_spans(
        components::hints::for_view(session.active()),
        theme,
    );
    parts.push(components::hints::hint_separator(theme));
    parts.extend(components::hints::hints_to_spans(
        components::hints::GLOBAL,
        theme,
    ));
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
