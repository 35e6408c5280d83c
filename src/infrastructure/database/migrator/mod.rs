//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_availability;
mod m20240601_000002_create_reservations;
mod m20240601_000003_create_rooms;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_availability::Migration),
            Box::new(m20240601_000002_create_reservations::Migration),
            Box::new(m20240601_000003_create_rooms::Migration),
        ]
    }
}
