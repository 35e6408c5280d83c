//! Room inventory entity

/// A room registered in the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub room_id: i32,
    pub room_number: i32,
    pub room_type: String,
    /// Free-form operational status, e.g. `available` or `maintenance`
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub room_number: i32,
    pub room_type: String,
    pub status: String,
}
