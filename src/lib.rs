//! # Hotel Reservation Broker
//!
//! Books hotel rooms over a JSON/REST front door after checking availability
//! with a SOAP backend, and hosts that SOAP backend too.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: availability, reservation and room types plus repository traits
//! - **application**: the reservation orchestrator, the availability responder
//!   and the outbound gateway port
//! - **infrastructure**: SeaORM persistence and the SOAP HTTP client
//! - **interfaces**: REST (axum + Swagger) and SOAP (`/wsdl`) routers
//! - **support**: the SOAP envelope codec and the published WSDL
//! - **server**: process lifecycle shared by the CLI binary

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, run_migrations, DatabaseConfig};

// Re-export API routers
pub use interfaces::http::create_api_router;
pub use interfaces::soap::create_soap_router;
