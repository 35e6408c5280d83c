//! Room inventory aggregate

pub mod model;
pub mod repository;

pub use model::{NewRoom, Room};
pub use repository::RoomRepository;
