pub mod orchestrator;

pub use orchestrator::ReservationOrchestrator;
