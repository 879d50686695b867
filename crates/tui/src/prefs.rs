//! User preferences: display name and time zone.
//!
//! Stored as pretty JSON. A missing file yields defaults taken from the
//! environment; blank stored values are replaced by the same defaults.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FALLBACK_NAME: &str = "CRM User";
const FALLBACK_TIMEZONE: &str = "UTC";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Timezone cannot be empty")]
    EmptyTimezone,
    #[error("Invalid timezone")]
    InvalidTimezone(String),
    #[error("preferences io: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct Stored {
    name: String,
    timezone: String,
}

/// Lookup and save contract the session uses for preferences.
pub trait PreferenceStore {
    fn display_name(&self) -> &str;
    fn timezone_name(&self) -> &str;
    fn set_name(&mut self, name: &str) -> Result<(), PrefsError>;
    fn set_timezone(&mut self, zone: &str) -> Result<(), PrefsError>;

    /// The configured zone, UTC when the stored name does not parse.
    fn location(&self) -> Tz {
        self.timezone_name().parse().unwrap_or(Tz::UTC)
    }
}

#[derive(Debug, Clone)]
pub struct Preferences {
    path: Option<PathBuf>,
    stored: Stored,
}

impl Preferences {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let mut stored = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Stored::default(),
            Err(err) => return Err(err.into()),
        };
        fill_defaults(&mut stored);
        Ok(Self {
            path: Some(path),
            stored,
        })
    }

    /// Preferences that are never written to disk.
    pub fn in_memory(name: &str, timezone: &str) -> Self {
        let mut stored = Stored {
            name: name.to_string(),
            timezone: timezone.to_string(),
        };
        fill_defaults(&mut stored);
        Self { path: None, stored }
    }

    /// Write `next` and adopt it only once it is on disk.
    fn commit(&mut self, next: Stored) -> Result<(), PrefsError> {
        if let Some(path) = &self.path {
            if let Some(parent) = Path::new(path).parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&next)?)?;
            tracing::debug!(path = %path.display(), "preferences saved");
        }
        self.stored = next;
        Ok(())
    }
}

impl PreferenceStore for Preferences {
    fn display_name(&self) -> &str {
        &self.stored.name
    }

    fn timezone_name(&self) -> &str {
        &self.stored.timezone
    }

    fn set_name(&mut self, name: &str) -> Result<(), PrefsError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PrefsError::EmptyName);
        }
        self.commit(Stored {
            name: name.to_string(),
            ..self.stored.clone()
        })
    }

    fn set_timezone(&mut self, zone: &str) -> Result<(), PrefsError> {
        let zone = zone.trim();
        if zone.is_empty() {
            return Err(PrefsError::EmptyTimezone);
        }
        let parsed: Tz = zone
            .parse()
            .map_err(|_| PrefsError::InvalidTimezone(zone.to_string()))?;
        self.commit(Stored {
            timezone: parsed.name().to_string(),
            ..self.stored.clone()
        })
    }
}

fn fill_defaults(stored: &mut Stored) {
    if stored.name.trim().is_empty() {
        stored.name = default_name();
    }
    if stored.timezone.trim().is_empty() {
        stored.timezone = default_timezone();
    }
}

fn default_name() -> String {
    ["USER", "USERNAME"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

fn default_timezone() -> String {
    env::var("TZ")
        .ok()
        .and_then(|value| value.trim().parse::<Tz>().ok())
        .map(|zone| zone.name().to_string())
        .unwrap_or_else(|| FALLBACK_TIMEZONE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(dir.path().join("prefs.json")).unwrap();
        assert!(!prefs.display_name().is_empty());
        assert!(prefs.timezone_name().parse::<Tz>().is_ok());
    }

    #[test]
    fn changes_persist_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut prefs = Preferences::load(&path).unwrap();
        prefs.set_name("  Dana ").unwrap();
        prefs.set_timezone("Europe/Rome").unwrap();

        let reloaded = Preferences::load(&path).unwrap();
        assert_eq!(reloaded.display_name(), "Dana");
        assert_eq!(reloaded.timezone_name(), "Europe/Rome");
        assert_eq!(reloaded.location(), chrono_tz::Europe::Rome);
    }

    #[test]
    fn invalid_values_are_rejected_before_saving() {
        let mut prefs = Preferences::in_memory("Dana", "UTC");

        assert!(matches!(prefs.set_name("   "), Err(PrefsError::EmptyName)));
        assert!(matches!(
            prefs.set_timezone(""),
            Err(PrefsError::EmptyTimezone)
        ));
        assert!(matches!(
            prefs.set_timezone("Mars/Olympus"),
            Err(PrefsError::InvalidTimezone(_))
        ));
        assert_eq!(prefs.display_name(), "Dana");
        assert_eq!(prefs.timezone_name(), "UTC");
    }

    #[test]
    fn failed_write_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut prefs = Preferences {
            path: Some(blocker.join("prefs.json")),
            ..Preferences::in_memory("Dana", "UTC")
        };
        assert!(matches!(prefs.set_name("Sam"), Err(PrefsError::Io(_))));
        assert!(matches!(
            prefs.set_timezone("Europe/Rome"),
            Err(PrefsError::Io(_))
        ));
        assert_eq!(prefs.display_name(), "Dana");
        assert_eq!(prefs.timezone_name(), "UTC");
    }

    #[test]
    fn blank_stored_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"name":"  ","timezone":""}"#).unwrap();

        let prefs = Preferences::load(&path).unwrap();
        assert!(!prefs.display_name().trim().is_empty());
        assert!(!prefs.timezone_name().is_empty());
    }

    #[test]
    fn unparsable_zone_locates_as_utc() {
        let prefs = Preferences::in_memory("Dana", "Nowhere/Town");
        assert_eq!(prefs.location(), Tz::UTC);
    }
}
