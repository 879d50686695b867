pub use sea_orm_migration::prelude::*;

mod m20250301_000000_init;
mod m20250315_000000_event_time_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_init::Migration),
            Box::new(m20250315_000000_event_time_index::Migration),
        ]
    }
}
