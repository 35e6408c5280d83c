//! Room inventory DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::room::{NewRoom, Room};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[schema(example = 101)]
    #[validate(required(message = "roomNumber is required"))]
    pub room_number: Option<i32>,
    #[schema(example = "Single")]
    #[validate(required(message = "roomType is required"), length(min = 1, message = "roomType is required"))]
    pub room_type: Option<String>,
    #[schema(example = "available")]
    #[validate(required(message = "status is required"), length(min = 1, message = "status is required"))]
    pub status: Option<String>,
}

impl CreateRoomRequest {
    pub fn into_new_room(self) -> NewRoom {
        NewRoom {
            room_number: self.room_number.unwrap_or_default(),
            room_type: self.room_type.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomStatusRequest {
    #[schema(example = "maintenance")]
    #[validate(required(message = "status is required"), length(min = 1, message = "status is required"))]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub room_id: i32,
    pub room_number: i32,
    pub room_type: String,
    pub status: String,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            room_id: r.room_id,
            room_number: r.room_number,
            room_type: r.room_type,
            status: r.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomChangeResponse {
    pub message: String,
    pub room: RoomDto,
}
