//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, patch},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::ReservationOrchestrator;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::MessageResponse;
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{self, MetricsState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::reservations::{self, ReservationAppState};
use crate::interfaces::http::modules::rooms::{self, RoomAppState};

/// Unified state for every REST route.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    pub orchestrator: Arc<ReservationOrchestrator>,
    pub backend_endpoint: Arc<str>,
    pub metrics: Option<PrometheusHandle>,
    pub started_at: Arc<Instant>,
}

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            orchestrator: Arc::clone(&s.orchestrator),
        }
    }
}

impl FromRef<ApiState> for RoomAppState {
    fn from_ref(s: &ApiState) -> Self {
        RoomAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
            backend_endpoint: Arc::clone(&s.backend_endpoint),
        }
    }
}

impl FromRef<ApiState> for MetricsState {
    fn from_ref(s: &ApiState) -> Self {
        MetricsState {
            handle: s.metrics.clone(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::cancel_reservation,
        rooms::create_room,
        rooms::list_rooms,
        rooms::update_room_status,
        rooms::delete_room,
    ),
    components(
        schemas(
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            reservations::CreateReservationRequest,
            reservations::CreateReservationResponse,
            reservations::CancelReservationResponse,
            reservations::ReservationDto,
            reservations::RoomAvailabilityDto,
            rooms::CreateRoomRequest,
            rooms::UpdateRoomStatusRequest,
            rooms::RoomDto,
            rooms::RoomChangeResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Reservations", description = "Availability-checked room reservations"),
        (name = "Rooms", description = "Room inventory registry"),
    ),
    info(
        title = "Hotel Reservation Broker API",
        version = "1.0.0",
        description = "Books rooms after checking the SOAP availability service",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the REST router with all routes
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Reservations
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(reservations::get_reservation).delete(reservations::cancel_reservation),
        )
        // Rooms
        .route("/rooms", get(rooms::list_rooms).post(rooms::create_room))
        .route(
            "/rooms/{id}",
            patch(rooms::update_room_status).delete(rooms::delete_room),
        )
        // Prometheus
        .route("/metrics", get(metrics::prometheus_metrics))
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .with_state(state);

    Router::new()
        .merge(swagger_routes)
        .merge(api_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::application::AvailabilityResponder;
    use crate::domain::availability::AvailabilitySlot;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::SoapAvailabilityClient;
    use crate::interfaces::soap::{create_soap_router, SoapState};
    use crate::support::wsdl::availability_wsdl;

    /// REST router wired to a real SOAP responder listening on an ephemeral
    /// port, both sharing one in-memory database.
    async fn broker(slots: Vec<AvailabilitySlot>) -> (Router, Arc<SeaOrmRepositoryProvider>) {
        let db = test_database().await;
        let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        for slot in slots {
            repos.availability().upsert(slot).await.unwrap();
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/wsdl", listener.local_addr().unwrap());
        let soap = create_soap_router(SoapState {
            responder: Arc::new(AvailabilityResponder::new(repos.clone())),
            wsdl: availability_wsdl(&endpoint).into(),
        });
        tokio::spawn(async move {
            axum::serve(listener, soap).await.unwrap();
        });

        let gateway = Arc::new(
            SoapAvailabilityClient::new(endpoint.clone(), Duration::from_secs(5)).unwrap(),
        );
        let state = ApiState {
            db,
            repos: repos.clone(),
            orchestrator: Arc::new(ReservationOrchestrator::new(repos.clone(), gateway)),
            backend_endpoint: endpoint.into(),
            metrics: None,
            started_at: Arc::new(Instant::now()),
        };
        (create_api_router(state), repos)
    }

    fn single_room_101() -> AvailabilitySlot {
        AvailabilitySlot {
            room_id: 101,
            room_type: "Single".into(),
            available_date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            status: "available".into(),
        }
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn john_doe() -> Value {
        json!({
            "roomType": "Single",
            "startDate": "2024-06-01",
            "endDate": "2024-06-03",
            "customerName": "John Doe"
        })
    }

    #[tokio::test]
    async fn reserve_fetch_cancel_fetch() {
        let (app, _) = broker(vec![single_room_101()]).await;

        let (status, created) = call(&app, "POST", "/reservations", Some(john_doe())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["message"], "Reservation created successfully!");
        assert_eq!(created["room"]["room_id"], 101);
        assert_eq!(created["room"]["available_date"], "2024-06-02T00:00:00.000Z");
        let reservation = &created["reservation"];
        assert_eq!(reservation["room_number"], 101);
        assert_eq!(reservation["customer_name"], "John Doe");
        assert_eq!(reservation["start_date"], "2024-06-01");
        assert_eq!(reservation["end_date"], "2024-06-03");
        assert_eq!(reservation["status"], "confirmed");

        let id = reservation["reservation_id"].as_i64().unwrap();
        let (status, fetched) = call(&app, "GET", &format!("/reservations/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&fetched, reservation);

        let (status, deleted) = call(&app, "DELETE", &format!("/reservations/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["reservation"]["status"], "cancelled");

        let (status, body) = call(&app, "GET", &format!("/reservations/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Reservation not found");
    }

    #[tokio::test]
    async fn non_numeric_ids_answer_400_with_message() {
        let (app, _) = broker(vec![]).await;

        for (method, uri) in [
            ("GET", "/reservations/abc"),
            ("DELETE", "/reservations/abc"),
            ("DELETE", "/rooms/abc"),
        ] {
            let (status, body) = call(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
            assert!(body["message"].as_str().unwrap().starts_with("Invalid path parameter"));
        }
    }

    #[tokio::test]
    async fn empty_store_answers_no_rooms_and_writes_nothing() {
        let (app, repos) = broker(vec![]).await;

        let (status, body) = call(&app, "POST", "/reservations", Some(john_doe())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No rooms available");
        assert!(repos.reservations().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_identical_booking_finds_no_room() {
        let (app, _) = broker(vec![single_room_101()]).await;

        let (status, _) = call(&app, "POST", "/reservations", Some(john_doe())).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = call(&app, "POST", "/reservations", Some(john_doe())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No rooms available");

        let (_, all) = call(&app, "GET", "/reservations", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_field_is_400() {
        let (app, _) = broker(vec![single_room_101()]).await;
        let mut body = john_doe();
        body.as_object_mut().unwrap().remove("customerName");

        let (status, reply) = call(&app, "POST", "/reservations", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(reply["message"].as_str().unwrap().contains("customerName is required"));
    }

    #[tokio::test]
    async fn malformed_date_is_400() {
        let (app, _) = broker(vec![single_room_101()]).await;
        let mut body = john_doe();
        body["startDate"] = json!("01/06/2024");

        let (status, reply) = call(&app, "POST", "/reservations", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(reply["message"].as_str().unwrap().contains("startDate"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_500_with_generic_message() {
        let db = test_database().await;
        let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/wsdl", listener.local_addr().unwrap());
        drop(listener);

        let gateway =
            Arc::new(SoapAvailabilityClient::new(endpoint.clone(), Duration::from_secs(2)).unwrap());
        let app = create_api_router(ApiState {
            db,
            repos: repos.clone(),
            orchestrator: Arc::new(ReservationOrchestrator::new(repos, gateway)),
            backend_endpoint: endpoint.into(),
            metrics: None,
            started_at: Arc::new(Instant::now()),
        });

        let (status, body) = call(&app, "POST", "/reservations", Some(john_doe())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Availability service unavailable");
    }

    #[tokio::test]
    async fn room_inventory_crud() {
        let (app, _) = broker(vec![]).await;

        let (status, body) = call(
            &app,
            "POST",
            "/rooms",
            Some(json!({"roomNumber": 101, "roomType": "Single", "status": "available"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Room registered successfully");

        let (_, rooms) = call(&app, "GET", "/rooms", None).await;
        let room_id = rooms[0]["room_id"].as_i64().unwrap();
        assert_eq!(rooms[0]["room_number"], 101);

        let (status, body) = call(
            &app,
            "PATCH",
            &format!("/rooms/{}", room_id),
            Some(json!({"status": "maintenance"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["room"]["status"], "maintenance");

        let (status, body) = call(&app, "DELETE", &format!("/rooms/{}", room_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Room deleted successfully");

        let (status, _) = call(&app, "DELETE", &format!("/rooms/{}", room_id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_database() {
        let (app, _) = broker(vec![]).await;
        let (status, body) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn openapi_document_lists_reservation_paths() {
        let (app, _) = broker(vec![]).await;
        let (status, doc) = call(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/reservations/{id}"].is_object());
        assert!(doc["paths"]["/rooms"].is_object());
    }
}
