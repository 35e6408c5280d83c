//! Reservation DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::availability::{parse_date, RoomAvailability, DATE_FORMAT};
use crate::domain::reservation::{Reservation, ReservationIntent};
use crate::domain::DomainResult;
use crate::support::soap_envelope::format_timestamp;

/// Request to book a room
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Room type to book, matched exactly (e.g. "Single")
    #[schema(example = "Single")]
    #[validate(required(message = "roomType is required"), length(min = 1, message = "roomType is required"))]
    pub room_type: Option<String>,
    /// First night (YYYY-MM-DD)
    #[schema(example = "2024-06-01")]
    #[validate(required(message = "startDate is required"))]
    pub start_date: Option<String>,
    /// Last night (YYYY-MM-DD)
    #[schema(example = "2024-06-03")]
    #[validate(required(message = "endDate is required"))]
    pub end_date: Option<String>,
    #[schema(example = "John Doe")]
    #[validate(required(message = "customerName is required"), length(min = 1, message = "customerName is required"))]
    pub customer_name: Option<String>,
}

impl CreateReservationRequest {
    /// Parse dates and build the domain intent. Presence is already checked
    /// by validation.
    pub fn into_intent(self) -> DomainResult<ReservationIntent> {
        let start_date = parse_date("startDate", self.start_date.as_deref().unwrap_or_default())?;
        let end_date = parse_date("endDate", self.end_date.as_deref().unwrap_or_default())?;
        Ok(ReservationIntent {
            room_type: self.room_type.unwrap_or_default(),
            start_date,
            end_date,
            customer_name: self.customer_name.unwrap_or_default(),
        })
    }
}

/// Stored reservation, rendered with the table's column names
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub reservation_id: i32,
    pub room_number: i32,
    pub customer_name: String,
    #[schema(example = "2024-06-01")]
    pub start_date: String,
    #[schema(example = "2024-06-03")]
    pub end_date: String,
    /// confirmed | cancelled
    pub status: String,
    pub created_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            reservation_id: r.id,
            room_number: r.room_number,
            customer_name: r.customer_name,
            start_date: r.start_date.format(DATE_FORMAT).to_string(),
            end_date: r.end_date.format(DATE_FORMAT).to_string(),
            status: r.status.to_string(),
            created_at: format_timestamp(&r.created_at),
        }
    }
}

/// The availability row a reservation was made against
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomAvailabilityDto {
    pub room_id: i32,
    pub room_type: String,
    #[schema(example = "2024-06-02T00:00:00.000Z")]
    pub available_date: String,
    pub status: String,
}

impl From<RoomAvailability> for RoomAvailabilityDto {
    fn from(r: RoomAvailability) -> Self {
        Self {
            room_id: r.room_id,
            room_type: r.room_type,
            available_date: format_timestamp(&r.available_date),
            status: r.status,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReservationResponse {
    pub message: String,
    pub room: RoomAvailabilityDto,
    pub reservation: ReservationDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CancelReservationResponse {
    pub message: String,
    /// The removed record, with status `cancelled`
    pub reservation: ReservationDto,
}
