//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` - unified access to all per-aggregate repositories
//! - `DomainResult` - standard result type for domain operations

use super::availability::AvailabilityRepository;
use super::reservation::ReservationRepository;
use super::room::RoomRepository;

pub use crate::shared::errors::DomainResult;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Created once at startup around a single connection pool and passed to
/// every component that needs storage:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let rows = repos.availability().find_available(&query).await?;
///     let r = repos.reservations().find_by_id(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn availability(&self) -> &dyn AvailabilityRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn rooms(&self) -> &dyn RoomRepository;
}
