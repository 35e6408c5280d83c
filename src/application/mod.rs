//! Application layer: use cases on top of the domain
//!
//! - **availability**: the `checkAvailability` responder
//! - **reservation**: the reservation orchestrator
//! - **ports**: outbound interfaces the use cases depend on

pub mod availability;
pub mod ports;
pub mod reservation;

pub use availability::AvailabilityResponder;
pub use ports::AvailabilityGateway;
pub use reservation::ReservationOrchestrator;
