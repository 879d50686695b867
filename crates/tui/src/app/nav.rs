//! View identifiers and the navigation history.

/// One screen of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    MainMenu,
    Dashboard,
    AccountList,
    AccountDetail,
    AccountForm,
    CreateChoice,
    NoteWizard,
    EventWizard,
    Settings,
    SettingsEditName,
    SettingsEditTimezone,
}

impl View {
    pub const ROOT: View = View::MainMenu;

    pub fn label(self) -> &'static str {
        match self {
            Self::MainMenu => "Main menu",
            Self::Dashboard => "Dashboard",
            Self::AccountList => "Accounts",
            Self::AccountDetail => "Account",
            Self::AccountForm => "Account form",
            Self::CreateChoice => "Create",
            Self::NoteWizard => "New note",
            Self::EventWizard => "New event",
            Self::Settings => "Settings",
            Self::SettingsEditName => "Edit name",
            Self::SettingsEditTimezone => "Edit time zone",
        }
    }
}

/// The active view plus the views to return to, most recent last.
///
/// The active view is never present in the history.
#[derive(Debug, Clone)]
pub struct NavStack {
    active: View,
    history: Vec<View>,
}

impl Default for NavStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavStack {
    pub fn new() -> Self {
        Self {
            active: View::ROOT,
            history: Vec::new(),
        }
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// True when `view` is active or waiting in the history.
    pub fn holds(&self, view: View) -> bool {
        self.active == view || self.history.contains(&view)
    }

    /// Remember the active view and activate `view`.
    ///
    /// Pushing a view that is already in the history unwinds back to it.
    pub fn push(&mut self, view: View) {
        if view == self.active {
            return;
        }
        self.history.push(self.active);
        if let Some(pos) = self.history.iter().position(|v| *v == view) {
            self.history.truncate(pos);
        }
        self.active = view;
    }

    /// Swap the active view without touching the history.
    pub fn replace(&mut self, view: View) {
        if let Some(pos) = self.history.iter().position(|v| *v == view) {
            self.history.truncate(pos);
        }
        self.active = view;
    }

    /// Return to the previous view, or the root when there is none.
    pub fn pop(&mut self) -> View {
        self.active = self.history.pop().unwrap_or(View::ROOT);
        self.active
    }

    pub fn reset_to_root(&mut self) {
        self.history.clear();
        self.active = View::ROOT;
    }
}
