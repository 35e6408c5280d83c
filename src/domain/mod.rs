//! Domain layer: entities, value types and repository interfaces.

pub mod availability;
pub mod repositories;
pub mod reservation;
pub mod room;

pub use availability::{
    AvailabilityQuery, AvailabilityRepository, AvailabilityResponse, AvailabilitySlot,
    CheckAvailabilityRequest, RoomAvailability,
};
pub use repositories::RepositoryProvider;
pub use reservation::{
    ConfirmOutcome, ConfirmedReservation, NewReservation, Reservation, ReservationIntent,
    ReservationRepository, ReservationStatus,
};
pub use room::{NewRoom, Room, RoomRepository};

pub use crate::shared::errors::{DomainError, DomainResult};
