//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};

use crate::domain::room::{NewRoom, Room, RoomRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::room;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: room::Model) -> Room {
    Room {
        room_id: m.room_id,
        room_number: m.room_number,
        room_type: m.room_type,
        status: m.status,
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn create(&self, r: NewRoom) -> DomainResult<Room> {
        debug!("Creating room: number={} type={}", r.room_number, r.room_type);

        let model = room::ActiveModel {
            room_number: Set(r.room_number),
            room_type: Set(r.room_type),
            status: Set(r.status),
            ..Default::default()
        };
        Ok(model_to_domain(model.insert(&self.db).await?))
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::RoomId)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update_status(&self, room_id: i32, status: &str) -> DomainResult<Option<Room>> {
        let Some(existing) = room::Entity::find_by_id(room_id).one(&self.db).await? else {
            return Ok(None);
        };

        debug!("Updating room {} status to {}", room_id, status);
        let mut active: room::ActiveModel = existing.into();
        active.status = Set(status.to_string());
        Ok(Some(model_to_domain(active.update(&self.db).await?)))
    }

    async fn delete(&self, room_id: i32) -> DomainResult<Option<Room>> {
        let Some(existing) = room::Entity::find_by_id(room_id).one(&self.db).await? else {
            return Ok(None);
        };

        debug!("Deleting room: {}", room_id);
        let removed = model_to_domain(existing.clone());
        existing.delete(&self.db).await?;
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    fn single(number: i32) -> NewRoom {
        NewRoom {
            room_number: number,
            room_type: "Single".into(),
            status: "available".into(),
        }
    }

    #[tokio::test]
    async fn created_rooms_are_listed_in_id_order() {
        let repo = SeaOrmRoomRepository::new(test_database().await);
        let a = repo.create(single(101)).await.unwrap();
        let b = repo.create(single(102)).await.unwrap();
        assert!(a.room_id < b.room_id);

        let numbers: Vec<i32> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.room_number)
            .collect();
        assert_eq!(numbers, vec![101, 102]);
    }

    #[tokio::test]
    async fn status_update_returns_updated_room() {
        let repo = SeaOrmRoomRepository::new(test_database().await);
        let room = repo.create(single(101)).await.unwrap();
        let updated = repo
            .update_status(room.room_id, "maintenance")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "maintenance");
        assert_eq!(updated.room_number, 101);
    }

    #[tokio::test]
    async fn missing_room_is_none_for_update_and_delete() {
        let repo = SeaOrmRoomRepository::new(test_database().await);
        assert!(repo.update_status(42, "x").await.unwrap().is_none());
        assert!(repo.delete(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_room() {
        let repo = SeaOrmRoomRepository::new(test_database().await);
        let room = repo.create(single(101)).await.unwrap();
        let removed = repo.delete(room.room_id).await.unwrap().unwrap();
        assert_eq!(removed, room);
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
