mod app;
mod config;
mod error;
mod logging;
mod prefs;
mod store;
mod ui;

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tokio::runtime::Runtime;

use crate::{
    app::{
        App,
        session::{Env, Session},
    },
    config::AppConfig,
    error::Result,
    prefs::Preferences,
    store::EngineStore,
};

fn main() -> Result<()> {
    let config = config::load()?;
    let _guard = logging::init(&config)?;
    tracing::info!(database = %config.database.display(), "starting crm-term");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let database = open_database(&runtime, &config)?;
    let engine = runtime.block_on(engine::Engine::builder().database(database).build())?;
    let store = EngineStore::new(engine, runtime);

    let prefs = Preferences::load(&config.preferences)?;
    let env = Env::new(Box::new(store), Box::new(prefs), Utc::now);

    let result = App::new(Session::new(env)).run();
    if let Err(err) = &result {
        tracing::error!("session ended with an error: {err}");
    }
    tracing::info!("crm-term stopped");
    result
}

/// Connect to SQLite, creating the file and its directory on first run, and
/// bring the schema up to date.
fn open_database(runtime: &Runtime, config: &AppConfig) -> Result<DatabaseConnection> {
    if let Some(parent) = config.database.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let database = runtime.block_on(Database::connect(config.database_url()))?;
    runtime.block_on(Migrator::up(&database, None))?;
    Ok(database)
}
