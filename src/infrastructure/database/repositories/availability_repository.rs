//! SeaORM implementation of AvailabilityRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::availability::{
    AvailabilityQuery, AvailabilityRepository, AvailabilitySlot, RoomAvailability,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::availability;

pub struct SeaOrmAvailabilityRepository {
    db: DatabaseConnection,
}

impl SeaOrmAvailabilityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: availability::Model) -> RoomAvailability {
    RoomAvailability::on_date(m.room_id, m.room_type, m.available_date, m.status)
}

#[async_trait]
impl AvailabilityRepository for SeaOrmAvailabilityRepository {
    async fn find_available(
        &self,
        query: &AvailabilityQuery,
    ) -> DomainResult<Vec<RoomAvailability>> {
        debug!(
            "Querying availability: type={} from={} to={}",
            query.room_type(),
            query.start_date(),
            query.end_date()
        );

        // Values are bound, never interpolated into the statement
        let models = availability::Entity::find()
            .filter(availability::Column::RoomType.eq(query.room_type()))
            .filter(
                availability::Column::AvailableDate.between(query.start_date(), query.end_date()),
            )
            .order_by_asc(availability::Column::AvailableDate)
            .order_by_asc(availability::Column::RoomId)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn upsert(&self, slot: AvailabilitySlot) -> DomainResult<()> {
        debug!(
            "Upserting availability: room={} date={}",
            slot.room_id, slot.available_date
        );

        let model = availability::ActiveModel {
            room_id: Set(slot.room_id),
            available_date: Set(slot.available_date),
            room_type: Set(slot.room_type),
            status: Set(slot.status),
        };
        availability::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    availability::Column::RoomId,
                    availability::Column::AvailableDate,
                ])
                .update_columns([availability::Column::RoomType, availability::Column::Status])
                .to_owned(),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
