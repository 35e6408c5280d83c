//! Infrastructure layer - external concerns

pub mod database;
pub mod soap_client;

pub use database::{init_database, run_migrations, DatabaseConfig};
pub use soap_client::SoapAvailabilityClient;
