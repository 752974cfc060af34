pub use sea_orm_migration::prelude::*;

mod m20251018_000001_create_participants;
mod m20251018_000002_create_winners;
mod m20251018_000003_create_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251018_000001_create_participants::Migration),
            Box::new(m20251018_000002_create_winners::Migration),
            Box::new(m20251018_000003_create_settings::Migration),
        ]
    }
}
