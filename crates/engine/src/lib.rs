//! Storage engine for the CRM terminal.
//!
//! The engine owns the SQLite database (through sea-orm) and exposes the
//! record operations the interactive session relies on: accounts, notes,
//! events, the merged activity feed and CSV account import.

pub use accounts::{Account, NewAccount};
pub use activity::{Activity, ActivityKind};
pub use error::EngineError;
pub use events::{Event, NewEvent};
pub use import::ImportReport;
pub use notes::{NewNote, Note};
pub use ops::{Engine, EngineBuilder};

mod accounts;
mod activity;
mod error;
mod events;
mod import;
mod notes;
mod ops;
mod util;

/// Number of activity entries returned when a caller asks for zero.
pub const DEFAULT_ACTIVITY_LIMIT: u64 = 20;

/// Maximum number of characters kept for activity titles and details.
pub const ACTIVITY_TEXT_WIDTH: usize = 80;

type ResultEngine<T> = Result<T, EngineError>;
