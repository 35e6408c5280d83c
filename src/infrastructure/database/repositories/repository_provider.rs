//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::availability::AvailabilityRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::room::RoomRepository;

use super::availability_repository::SeaOrmAvailabilityRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::room_repository::SeaOrmRoomRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let rows = repos.availability().find_available(&query).await?;
/// let r = repos.reservations().find_by_id(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    availability: SeaOrmAvailabilityRepository,
    reservations: SeaOrmReservationRepository,
    rooms: SeaOrmRoomRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            availability: SeaOrmAvailabilityRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn availability(&self) -> &dyn AvailabilityRepository {
        &self.availability
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }
}
