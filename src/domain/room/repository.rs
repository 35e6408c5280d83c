//! Room repository interface

use async_trait::async_trait;

use super::model::{NewRoom, Room};
use crate::shared::errors::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: NewRoom) -> DomainResult<Room>;

    async fn find_all(&self) -> DomainResult<Vec<Room>>;

    /// Returns the updated room, or `None` if no room has this id
    async fn update_status(&self, room_id: i32, status: &str) -> DomainResult<Option<Room>>;

    /// Returns the deleted room, or `None` if no room has this id
    async fn delete(&self, room_id: i32) -> DomainResult<Option<Room>>;
}
