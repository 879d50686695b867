pub mod agenda;
pub mod command;
pub mod feed;
pub mod input;
pub mod nav;
pub mod screens;
pub mod selection;
pub mod session;
pub mod wizard;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::{
    error::{AppError, Result},
    ui::{
        self, Theme,
        keymap::{AppAction, map_key},
    },
};

use session::Session;

pub struct App {
    session: Session,
    theme: Theme,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            theme: Theme,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.session.should_quit() {
            terminal
                .draw(|frame| ui::render(frame, &self.session, &self.theme))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }

        tracing::info!("session closed");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match map_key(key) {
            AppAction::Quit => self.session.quit(),
            AppAction::Back => self.session.back(),
            AppAction::Submit => self.session.submit(),
            AppAction::Backspace => self.session.backspace(),
            AppAction::ClearLine => self.session.clear_line(),
            AppAction::Input(ch) => self.session.type_char(ch),
            AppAction::None => {}
        }
    }
}
