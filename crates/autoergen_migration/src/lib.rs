pub use sea_orm_migration::prelude::*;

mod m20260820_000001_create_users;
mod m20260820_000002_create_projects;
mod m20260820_000003_create_logs;
mod m20260820_000004_create_saved_schemas;
mod m20260820_000005_seed_initial_data;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260820_000001_create_users::Migration),
            Box::new(m20260820_000002_create_projects::Migration),
            Box::new(m20260820_000003_create_logs::Migration),
            Box::new(m20260820_000004_create_saved_schemas::Migration),
            Box::new(m20260820_000005_seed_initial_data::Migration),
        ]
    }
}
