//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::sea_query::{Expr, InsertStatement, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

use crate::domain::reservation::{
    ConfirmOutcome, NewReservation, Reservation, ReservationRepository, ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let status = ReservationStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Store(format!(
            "reservation {} has unknown status '{}'",
            m.reservation_id, m.status
        ))
    })?;
    Ok(Reservation {
        id: m.reservation_id,
        room_number: m.room_number,
        customer_name: m.customer_name,
        start_date: m.start_date,
        end_date: m.end_date,
        status,
        created_at: m.created_at,
    })
}

/// `INSERT .. SELECT .. WHERE NOT EXISTS (overlap)`.
///
/// The clash check and the insert are one statement, so SQLite takes the
/// write lock before reading and concurrent confirms queue on the busy
/// timeout instead of failing. Stays overlap when they share any day:
/// both ends are inclusive.
fn guarded_insert(r: &NewReservation, created_at: DateTime<Utc>) -> DomainResult<InsertStatement> {
    let confirmed = ReservationStatus::Confirmed.as_str();

    let clash = Query::select()
        .expr(Expr::val(1))
        .from(reservation::Entity)
        .and_where(reservation::Column::RoomNumber.eq(r.room_number))
        .and_where(reservation::Column::Status.eq(confirmed))
        .and_where(reservation::Column::StartDate.lte(r.end_date))
        .and_where(reservation::Column::EndDate.gte(r.start_date))
        .to_owned();

    let row = Query::select()
        .exprs([
            Expr::val(r.room_number),
            Expr::val(r.customer_name.clone()),
            Expr::val(r.start_date),
            Expr::val(r.end_date),
            Expr::val(confirmed),
            Expr::val(created_at),
        ])
        .and_where(Expr::exists(clash).not())
        .to_owned();

    let mut insert = Query::insert();
    insert.into_table(reservation::Entity).columns([
        reservation::Column::RoomNumber,
        reservation::Column::CustomerName,
        reservation::Column::StartDate,
        reservation::Column::EndDate,
        reservation::Column::Status,
        reservation::Column::CreatedAt,
    ]);
    insert
        .select_from(row)
        .map_err(|e| DomainError::Store(format!("Failed to build reservation insert: {}", e)))?;
    Ok(insert)
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn confirm(&self, r: NewReservation) -> DomainResult<ConfirmOutcome> {
        debug!(
            "Confirming reservation: room={} {}..{}",
            r.room_number, r.start_date, r.end_date
        );

        let backend = self.db.get_database_backend();
        let insert = guarded_insert(&r, Utc::now())?;
        let result = self.db.execute(backend.build(&insert)).await?;

        if result.rows_affected() == 0 {
            debug!("Room {} already booked for these dates", r.room_number);
            return Ok(ConfirmOutcome::RoomTaken);
        }

        // The guard allows one confirmed stay per room and day, so this row is ours.
        let inserted = reservation::Entity::find()
            .filter(reservation::Column::RoomNumber.eq(r.room_number))
            .filter(reservation::Column::Status.eq(ReservationStatus::Confirmed.as_str()))
            .filter(reservation::Column::StartDate.eq(r.start_date))
            .filter(reservation::Column::EndDate.eq(r.end_date))
            .order_by_desc(reservation::Column::ReservationId)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DomainError::Store(format!(
                    "reservation for room {} missing after insert",
                    r.room_number
                ))
            })?;

        Ok(ConfirmOutcome::Confirmed(model_to_domain(inserted)?))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        reservation::Entity::find()
            .order_by_desc(reservation::Column::ReservationId)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn delete(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let Some(existing) = reservation::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        debug!("Deleting reservation: {}", id);
        let removed = model_to_domain(existing.clone())?;
        existing.delete(&self.db).await?;
        Ok(Some(removed))
    }
}
