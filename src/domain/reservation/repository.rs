//! Reservation repository interface

use async_trait::async_trait;

use super::model::{ConfirmOutcome, NewReservation, Reservation};
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Commit a confirmed reservation unless a confirmed reservation for the
    /// same room overlaps the requested dates (both ends inclusive). Check
    /// and insert are atomic.
    async fn confirm(&self, reservation: NewReservation) -> DomainResult<ConfirmOutcome>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Find all reservations, newest first
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// Hard-delete a reservation, returning the removed row
    async fn delete(&self, id: i32) -> DomainResult<Option<Reservation>>;
}
