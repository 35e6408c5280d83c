//! Availability aggregate
//!
//! Query, wire request and response types for `checkAvailability`, plus the
//! read interface over the availability table.

pub mod model;
pub mod repository;

pub use model::{
    parse_date, AvailabilityQuery, AvailabilityResponse, AvailabilitySlot,
    CheckAvailabilityRequest, RoomAvailability, DATE_FORMAT,
};
pub use repository::AvailabilityRepository;
