//! Reservation orchestrator
//!
//! Turns a reservation intent into a confirmed reservation: ask the
//! availability backend, pick a room, commit. Also serves lookup, listing and
//! cancellation of stored reservations.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::ports::AvailabilityGateway;
use crate::domain::reservation::{
    ConfirmOutcome, ConfirmedReservation, NewReservation, Reservation, ReservationIntent,
    ReservationStatus,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct ReservationOrchestrator {
    repos: Arc<dyn RepositoryProvider>,
    gateway: Arc<dyn AvailabilityGateway>,
}

impl ReservationOrchestrator {
    pub fn new(repos: Arc<dyn RepositoryProvider>, gateway: Arc<dyn AvailabilityGateway>) -> Self {
        Self { repos, gateway }
    }

    /// Create a reservation for the first bookable room the backend offers.
    ///
    /// Rooms are tried in backend order. A room whose dates were taken by a
    /// concurrent booking is skipped; when every offered room is taken the
    /// result is `NoAvailability`, same as an empty offer.
    pub async fn create_reservation(
        &self,
        intent: ReservationIntent,
    ) -> DomainResult<ConfirmedReservation> {
        intent.validate()?;
        let query = intent.availability_query()?;

        let offer = self.gateway.check_availability(&query).await.map_err(|e| {
            error!(room_type = query.room_type(), "Availability check failed: {}", e);
            metrics::counter!("reservations_failed_total", "reason" => "backend").increment(1);
            e
        })?;

        if offer.is_empty() {
            info!(room_type = query.room_type(), "No rooms available");
            metrics::counter!("reservations_failed_total", "reason" => "no_availability")
                .increment(1);
            return Err(DomainError::NoAvailability);
        }

        for room in offer.candidates() {
            let outcome = self
                .repos
                .reservations()
                .confirm(NewReservation::for_room(room, &intent))
                .await
                .map_err(|e| {
                    error!(room_id = room.room_id, "Failed to persist reservation: {}", e);
                    metrics::counter!("reservations_failed_total", "reason" => "store")
                        .increment(1);
                    e
                })?;

            match outcome {
                ConfirmOutcome::Confirmed(reservation) => {
                    info!(
                        reservation_id = reservation.id,
                        room_number = reservation.room_number,
                        "Reservation confirmed"
                    );
                    metrics::counter!("reservations_created_total").increment(1);
                    return Ok(ConfirmedReservation {
                        reservation,
                        room: room.clone(),
                    });
                }
                ConfirmOutcome::RoomTaken => {
                    warn!(room_id = room.room_id, "Room already booked, trying next offer");
                }
            }
        }

        info!(room_type = query.room_type(), "Every offered room is already booked");
        metrics::counter!("reservations_failed_total", "reason" => "no_availability").increment(1);
        Err(DomainError::NoAvailability)
    }

    pub async fn get_reservation(&self, id: i32) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    pub async fn list_reservations(&self) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_all().await
    }

    /// Cancel by removing the record. The returned copy is marked cancelled.
    pub async fn cancel_reservation(&self, id: i32) -> DomainResult<Reservation> {
        let mut removed = self
            .repos
            .reservations()
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))?;

        info!(reservation_id = id, "Reservation cancelled");
        metrics::counter!("reservations_cancelled_total").increment(1);
        removed.status = ReservationStatus::Cancelled;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::availability::AvailabilityResponder;
    use crate::domain::availability::{
        AvailabilityQuery, AvailabilityResponse, AvailabilitySlot, RoomAvailability,
    };
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::{file_database, test_database};
    use crate::support::soap_envelope;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn intent(room_type: &str) -> ReservationIntent {
        ReservationIntent {
            room_type: room_type.into(),
            start_date: date("2024-06-01"),
            end_date: date("2024-06-03"),
            customer_name: "John Doe".into(),
        }
    }

    /// Gateway with a canned answer
    struct FixedGateway {
        reply: fn() -> DomainResult<AvailabilityResponse>,
        calls: AtomicUsize,
    }

    impl FixedGateway {
        fn new(reply: fn() -> DomainResult<AvailabilityResponse>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl AvailabilityGateway for FixedGateway {
        async fn check_availability(
            &self,
            _query: &AvailabilityQuery,
        ) -> DomainResult<AvailabilityResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    /// Gateway that goes through the envelope codec and a real responder
    struct LoopbackGateway {
        responder: AvailabilityResponder,
    }

    #[async_trait]
    impl AvailabilityGateway for LoopbackGateway {
        async fn check_availability(
            &self,
            query: &AvailabilityQuery,
        ) -> DomainResult<AvailabilityResponse> {
            let request_xml = soap_envelope::encode_request(query)
                .map_err(|e| DomainError::BackendUnavailable(e.to_string()))?;
            let request = soap_envelope::decode_request(&request_xml)
                .map_err(|e| DomainError::BackendUnavailable(e.to_string()))?;
            let response = self.responder.handle(request).await?;
            let response_xml = soap_envelope::encode_response(&response)
                .map_err(|e| DomainError::BackendUnavailable(e.to_string()))?;
            soap_envelope::decode_response(&response_xml)
                .map_err(|e| DomainError::Decode(e.to_string()))
        }
    }

    fn room(id: i32) -> RoomAvailability {
        RoomAvailability::on_date(id, "Single", date("2024-06-02"), "available")
    }

    async fn repos() -> Arc<SeaOrmRepositoryProvider> {
        Arc::new(SeaOrmRepositoryProvider::new(test_database().await))
    }

    #[tokio::test]
    async fn end_to_end_through_the_envelope_codec() {
        let repos = repos().await;
        repos
            .availability()
            .upsert(AvailabilitySlot {
                room_id: 101,
                room_type: "Single".into(),
                available_date: date("2024-06-02"),
                status: "available".into(),
            })
            .await
            .unwrap();
        let gateway = Arc::new(LoopbackGateway {
            responder: AvailabilityResponder::new(repos.clone()),
        });
        let orchestrator = ReservationOrchestrator::new(repos, gateway);

        let confirmed = orchestrator.create_reservation(intent("Single")).await.unwrap();
        assert_eq!(confirmed.reservation.room_number, 101);
        assert_eq!(confirmed.reservation.status, ReservationStatus::Confirmed);
        assert_eq!(confirmed.reservation.customer_name, "John Doe");
        assert_eq!(confirmed.room.room_id, 101);

        let id = confirmed.reservation.id;
        assert_eq!(orchestrator.get_reservation(id).await.unwrap(), confirmed.reservation);

        let cancelled = orchestrator.cancel_reservation(id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert!(matches!(
            orchestrator.get_reservation(id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn empty_offer_is_no_availability_and_writes_nothing() {
        let repos = repos().await;
        let gateway = FixedGateway::new(|| Ok(AvailabilityResponse::default()));
        let orchestrator = ReservationOrchestrator::new(repos.clone(), gateway);

        let err = orchestrator.create_reservation(intent("Suite")).await.unwrap_err();
        assert!(matches!(err, DomainError::NoAvailability));
        assert!(repos.reservations().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_room_in_backend_order_wins() {
        let gateway = FixedGateway::new(|| Ok(AvailabilityResponse::new(vec![room(103), room(101)])));
        let orchestrator = ReservationOrchestrator::new(repos().await, gateway);

        let confirmed = orchestrator.create_reservation(intent("Single")).await.unwrap();
        assert_eq!(confirmed.reservation.room_number, 103);
    }

    #[tokio::test]
    async fn taken_room_falls_through_to_next_offer() {
        let gateway = FixedGateway::new(|| Ok(AvailabilityResponse::new(vec![room(101), room(102)])));
        let orchestrator = ReservationOrchestrator::new(repos().await, gateway);

        let first = orchestrator.create_reservation(intent("Single")).await.unwrap();
        let second = orchestrator.create_reservation(intent("Single")).await.unwrap();
        assert_eq!(first.reservation.room_number, 101);
        assert_eq!(second.reservation.room_number, 102);

        let third = orchestrator.create_reservation(intent("Single")).await;
        assert!(matches!(third, Err(DomainError::NoAvailability)));
    }

    #[tokio::test]
    async fn concurrent_requests_never_double_book() {
        let gateway = FixedGateway::new(|| Ok(AvailabilityResponse::new(vec![room(101)])));
        let orchestrator = Arc::new(ReservationOrchestrator::new(repos().await, gateway));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let o = orchestrator.clone();
                tokio::spawn(async move { o.create_reservation(intent("Single")).await })
            })
            .collect();

        let mut confirmed = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => confirmed += 1,
                Err(DomainError::NoAvailability) => {}
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }
        assert_eq!(confirmed, 1);
        assert_eq!(orchestrator.list_reservations().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn contention_on_a_pooled_file_database_ends_in_booking_or_no_availability() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_database(&dir.path().join("broker.db"), 10).await;
        let gateway = FixedGateway::new(|| Ok(AvailabilityResponse::new(vec![room(101), room(102)])));
        let orchestrator = Arc::new(ReservationOrchestrator::new(
            Arc::new(SeaOrmRepositoryProvider::new(db)),
            gateway,
        ));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let o = orchestrator.clone();
                tokio::spawn(async move { o.create_reservation(intent("Single")).await })
            })
            .collect();

        let mut rooms = Vec::new();
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(c) => rooms.push(c.reservation.room_number),
                Err(DomainError::NoAvailability) => rejected += 1,
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }
        rooms.sort();
        assert_eq!(rooms, vec![101, 102]);
        assert_eq!(rejected, 14);
    }

    #[tokio::test]
    async fn backend_failure_propagates_and_writes_nothing() {
        let repos = repos().await;
        let gateway =
            FixedGateway::new(|| Err(DomainError::BackendUnavailable("connection refused".into())));
        let orchestrator = ReservationOrchestrator::new(repos.clone(), gateway);

        let err = orchestrator.create_reservation(intent("Single")).await.unwrap_err();
        assert!(matches!(err, DomainError::BackendUnavailable(_)));
        assert!(repos.reservations().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_intent_never_calls_the_backend() {
        let gateway = FixedGateway::new(|| Ok(AvailabilityResponse::new(vec![room(101)])));
        let orchestrator = ReservationOrchestrator::new(repos().await, gateway.clone());

        let mut bad = intent("Single");
        bad.customer_name = String::new();
        assert!(matches!(
            orchestrator.create_reservation(bad).await,
            Err(DomainError::InvalidRequest(_))
        ));

        let mut inverted = intent("Single");
        inverted.start_date = date("2024-06-10");
        assert!(orchestrator.create_reservation(inverted).await.is_err());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let gateway = FixedGateway::new(|| Ok(AvailabilityResponse::default()));
        let orchestrator = ReservationOrchestrator::new(repos().await, gateway);
        assert!(matches!(
            orchestrator.get_reservation(77).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            orchestrator.cancel_reservation(77).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
