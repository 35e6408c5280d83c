//! SOAP surface: the `checkAvailability` responder over HTTP

pub mod handlers;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::interfaces::http::modules::metrics::http_metrics_middleware;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::support::wsdl::SOAP_ENDPOINT_PATH;

pub use handlers::{dispatch, SoapState};

pub fn create_soap_router(state: SoapState) -> Router {
    Router::new()
        .route(
            SOAP_ENDPOINT_PATH,
            get(handlers::wsdl_document).post(handlers::soap_endpoint),
        )
        .with_state(state)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
