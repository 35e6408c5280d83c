//! Reservation domain entity

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::availability::{AvailabilityQuery, RoomAvailability};
use crate::shared::errors::{DomainError, DomainResult};

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Room matched and the record committed
    Confirmed,
    /// Record removed by an explicit cancel
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a client asks for: a room type over a date range, for a named guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationIntent {
    pub room_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_name: String,
}

impl ReservationIntent {
    /// Required-field check. `customer_name` is free text; nothing beyond
    /// presence is enforced.
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::InvalidRequest("customerName is required".into()));
        }
        self.availability_query().map(|_| ())
    }

    pub fn availability_query(&self) -> DomainResult<AvailabilityQuery> {
        AvailabilityQuery::new(self.room_type.clone(), self.start_date, self.end_date)
    }
}

/// Persisted reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Generated by the store
    pub id: i32,
    /// `room_id` of the selected availability row
    pub room_number: i32,
    pub customer_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// A reservation about to be committed (no id yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub room_number: i32,
    pub customer_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewReservation {
    pub fn for_room(room: &RoomAvailability, intent: &ReservationIntent) -> Self {
        Self {
            room_number: room.room_id,
            customer_name: intent.customer_name.clone(),
            start_date: intent.start_date,
            end_date: intent.end_date,
        }
    }
}

/// Result of an attempt to commit a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed(Reservation),
    /// A confirmed reservation for the same room overlaps the requested dates
    RoomTaken,
}

/// A committed reservation together with the availability row it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedReservation {
    pub reservation: Reservation,
    pub room: RoomAvailability,
}

// ── Tests ──────────────────────────────────────────────────────
