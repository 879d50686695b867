//! Text command resolution for menus and the universal escape tokens.
//!
//! Resolution runs in two phases. Synonyms are exact, whole-input matches and
//! always win. Otherwise every option whose keywords start with the input is a
//! candidate, and only a single candidate resolves.

/// One selectable entry of a menu.
#[derive(Debug, Clone, Copy)]
pub struct MenuOption<T> {
    pub id: T,
    pub keywords: &'static [&'static str],
    pub synonyms: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Dashboard,
    Accounts,
    AddAccount,
    Create,
    Settings,
    Quit,
}

pub const MAIN_MENU: &[MenuOption<MainAction>] = &[
    MenuOption {
        id: MainAction::Dashboard,
        keywords: &["dashboard"],
        synonyms: &["1", "d", "dash", "dashboard"],
    },
    MenuOption {
        id: MainAction::Accounts,
        keywords: &["accounts"],
        synonyms: &["2", "accounts", "account", "view", "view accounts"],
    },
    MenuOption {
        id: MainAction::AddAccount,
        keywords: &["add", "new"],
        synonyms: &["3", "add", "add account", "new account"],
    },
    MenuOption {
        id: MainAction::Create,
        keywords: &["create", "note", "event"],
        synonyms: &["4", "create", "note", "event", "create note", "create event"],
    },
    MenuOption {
        id: MainAction::Settings,
        keywords: &["settings", "help"],
        synonyms: &["5", "settings", "help", "settings & help"],
    },
    MenuOption {
        id: MainAction::Quit,
        keywords: &["quit", "exit"],
        synonyms: &["6", "quit", "exit", "exit.", "q"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Activity,
    AddNote,
    AddEvent,
    Edit,
    Back,
}

pub const ACCOUNT_DETAIL_MENU: &[MenuOption<DetailAction>] = &[
    MenuOption {
        id: DetailAction::Activity,
        keywords: &["activity", "timeline"],
        synonyms: &["1", "activity", "view", "timeline"],
    },
    MenuOption {
        id: DetailAction::AddNote,
        keywords: &["note"],
        synonyms: &["2", "note", "add note", "create note"],
    },
    MenuOption {
        id: DetailAction::AddEvent,
        keywords: &["event"],
        synonyms: &["3", "event", "add event", "create event"],
    },
    MenuOption {
        id: DetailAction::Edit,
        keywords: &["edit", "update"],
        synonyms: &["4", "edit", "update"],
    },
    MenuOption {
        id: DetailAction::Back,
        keywords: &["back", "close"],
        synonyms: &["5", "back", "exit", "exit.", "/"],
    },
];

/// Resolve `input` against `table`. Unknown and ambiguous input both yield
/// `None`.
pub fn resolve<T: Copy>(input: &str, table: &[MenuOption<T>]) -> Option<T> {
    let value = input.trim().to_lowercase();
    if value.is_empty() {
        return None;
    }

    if let Some(option) = table
        .iter()
        .find(|option| option.synonyms.contains(&value.as_str()))
    {
        return Some(option.id);
    }

    let mut candidates = table.iter().filter(|option| {
        option
            .keywords
            .iter()
            .any(|keyword| keyword.starts_with(value.as_str()))
    });
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Some(only.id),
        _ => None,
    }
}

/// Tokens honoured by every text-accepting view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Clear the history and return to the main menu.
    Exit,
    /// Previous stage inside a wizard, previous view elsewhere.
    Back,
}

impl Escape {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "exit." | "quit" => Some(Self::Exit),
            "/" | "back" => Some(Self::Back),
            _ => None,
        }
    }
}
