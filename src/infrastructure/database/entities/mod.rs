//! Database entities module

pub mod availability;
pub mod reservation;
pub mod room;
