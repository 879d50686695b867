use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const APP_DIR: &str = "crmterm";
const CONFIG_FILE: &str = "crmterm.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file.
    pub database: PathBuf,
    /// Preferences JSON file (display name, time zone).
    pub preferences: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let base = base_dir();
        Self {
            database: base.join("crm.db"),
            preferences: base.join("preferences.json"),
            log_level: "info".to_string(),
            log_dir: base.join("logs"),
        }
    }
}

impl AppConfig {
    /// sea-orm connection URL for the configured database file.
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.database.display())
    }
}

#[derive(Debug, Parser)]
#[command(name = "crmterm", version, about = "Keyboard-driven CRM for the terminal")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the SQLite database path.
    #[arg(long)]
    database: Option<PathBuf>,
    /// Override the preferences file path.
    #[arg(long)]
    preferences: Option<PathBuf>,
    /// Override the log level (RUST_LOG still wins).
    #[arg(long)]
    log_level: Option<String>,
    /// Override the log directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

/// Per-user directory holding config, data and logs.
///
/// Falls back to `~/.crmterm` when the platform has no config directory.
pub fn base_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .or_else(|| dirs::home_dir().map(|home| home.join(format!(".{APP_DIR}"))))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}")))
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| base_dir().join(CONFIG_FILE));
    let mut settings = layered(&config_path)?;

    if let Some(database) = args.database {
        settings.database = database;
    }
    if let Some(preferences) = args.preferences {
        settings.preferences = preferences;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_dir) = args.log_dir {
        settings.log_dir = log_dir;
    }

    Ok(settings)
}

/// Defaults, then the optional TOML file, then `CRMTERM_*` variables.
fn layered(config_path: &Path) -> Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("CRMTERM"));
    Ok(builder.build()?.try_deserialize()?)
}
