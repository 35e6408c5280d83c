//! Availability domain types

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::shared::errors::{DomainError, DomainResult};

/// Wire format for stay dates (`xsd:date`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated `checkAvailability` query.
///
/// Built once per reservation attempt; all three fields are required and
/// `start_date <= end_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    room_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl AvailabilityQuery {
    pub fn new(
        room_type: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> DomainResult<Self> {
        let room_type = room_type.into();
        if room_type.trim().is_empty() {
            return Err(DomainError::InvalidRequest("roomType is required".into()));
        }
        if start_date > end_date {
            return Err(DomainError::InvalidRequest(
                "startDate must not be after endDate".into(),
            ));
        }
        Ok(Self {
            room_type,
            start_date,
            end_date,
        })
    }

    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }
}

/// `checkAvailability` as it arrives on the wire, before validation.
///
/// Fields stay optional so that the responder can say which one is missing
/// instead of failing inside the XML decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckAvailabilityRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub room_type: Option<String>,
}

impl TryFrom<CheckAvailabilityRequest> for AvailabilityQuery {
    type Error = DomainError;

    fn try_from(req: CheckAvailabilityRequest) -> Result<Self, Self::Error> {
        let missing: Vec<&str> = [
            ("startDate", req.start_date.is_none()),
            ("endDate", req.end_date.is_none()),
            ("roomType", req.room_type.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(DomainError::InvalidRequest(format!(
                "Missing required parameters: {}",
                missing.join(", ")
            )));
        }

        let start_date = parse_date("startDate", req.start_date.as_deref().unwrap_or_default())?;
        let end_date = parse_date("endDate", req.end_date.as_deref().unwrap_or_default())?;
        AvailabilityQuery::new(req.room_type.unwrap_or_default(), start_date, end_date)
    }
}

/// Parse an `xsd:date` value
pub fn parse_date(field: &str, value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        DomainError::InvalidRequest(format!("{} must be a date (YYYY-MM-DD), got '{}'", field, value))
    })
}

/// One row of the availability table as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAvailability {
    pub room_id: i32,
    pub room_type: String,
    /// Always UTC; date-only store values map to midnight
    pub available_date: DateTime<Utc>,
    pub status: String,
}

impl RoomAvailability {
    pub fn on_date(
        room_id: i32,
        room_type: impl Into<String>,
        date: NaiveDate,
        status: impl Into<String>,
    ) -> Self {
        Self {
            room_id,
            room_type: room_type.into(),
            available_date: date.and_time(NaiveTime::MIN).and_utc(),
            status: status.into(),
        }
    }
}

/// Ordered result of a `checkAvailability` call.
///
/// The order is whatever the backend returned and is significant: the
/// reservation selection policy is positional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityResponse {
    rooms: Vec<RoomAvailability>,
}

impl AvailabilityResponse {
    pub fn new(rooms: Vec<RoomAvailability>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[RoomAvailability] {
        &self.rooms
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Distinct rooms in backend order; a room listed for several dates
    /// appears once, at the position of its first row.
    pub fn candidates(&self) -> Vec<&RoomAvailability> {
        let mut seen = std::collections::HashSet::new();
        self.rooms
            .iter()
            .filter(|room| seen.insert(room.room_id))
            .collect()
    }
}

/// A row to be written into the availability table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub room_id: i32,
    pub room_type: String,
    pub available_date: NaiveDate,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn full_request() -> CheckAvailabilityRequest {
        CheckAvailabilityRequest {
            start_date: Some("2024-06-01".into()),
            end_date: Some("2024-06-03".into()),
            room_type: Some("Single".into()),
        }
    }

    #[test]
    fn complete_request_becomes_query() {
        let query = AvailabilityQuery::try_from(full_request()).unwrap();
        assert_eq!(query.room_type(), "Single");
        assert_eq!(query.start_date(), date("2024-06-01"));
        assert_eq!(query.end_date(), date("2024-06-03"));
    }

    #[test]
    fn missing_room_type_is_invalid_request() {
        let req = CheckAvailabilityRequest {
            room_type: None,
            ..full_request()
        };
        match AvailabilityQuery::try_from(req) {
            Err(DomainError::InvalidRequest(msg)) => assert!(msg.contains("roomType")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn every_missing_field_is_named() {
        match AvailabilityQuery::try_from(CheckAvailabilityRequest::default()) {
            Err(DomainError::InvalidRequest(msg)) => {
                assert_eq!(msg, "Missing required parameters: startDate, endDate, roomType")
            }
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = AvailabilityQuery::new("Single", date("2024-06-03"), date("2024-06-01"))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let req = CheckAvailabilityRequest {
            end_date: Some("June 3rd".into()),
            ..full_request()
        };
        assert!(matches!(
            AvailabilityQuery::try_from(req),
            Err(DomainError::InvalidRequest(_))
        ));
    }

    #[test]
    fn on_date_maps_to_midnight_utc() {
        let room = RoomAvailability::on_date(101, "Single", date("2024-06-02"), "available");
        assert_eq!(room.available_date.to_rfc3339(), "2024-06-02T00:00:00+00:00");
    }

    #[test]
    fn candidates_keep_first_position_per_room() {
        let response = AvailabilityResponse::new(vec![
            RoomAvailability::on_date(102, "Single", date("2024-06-01"), "available"),
            RoomAvailability::on_date(101, "Single", date("2024-06-01"), "available"),
            RoomAvailability::on_date(102, "Single", date("2024-06-02"), "available"),
        ]);
        let ids: Vec<i32> = response.candidates().iter().map(|r| r.room_id).collect();
        assert_eq!(ids, vec![102, 101]);
    }
}
