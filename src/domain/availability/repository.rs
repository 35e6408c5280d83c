//! Availability store accessor interface

use async_trait::async_trait;

use super::model::{AvailabilityQuery, AvailabilitySlot, RoomAvailability};
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Rows with exactly `query.room_type` whose date lies in
    /// `[start_date, end_date]` (both inclusive), ordered by date then room.
    async fn find_available(&self, query: &AvailabilityQuery)
        -> DomainResult<Vec<RoomAvailability>>;

    /// Insert or replace the row for `(room_id, available_date)`
    async fn upsert(&self, slot: AvailabilitySlot) -> DomainResult<()>;
}
