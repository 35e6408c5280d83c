//! Availability entity
//!
//! One row per room and night. The backend answers `checkAvailability`
//! straight from this table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "availability")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub room_id: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub available_date: Date,

    pub room_type: String,

    /// Free text, e.g. "available"
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
