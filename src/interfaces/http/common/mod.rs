//! Shared response types for the REST surface
//!
//! Every error body is `{"message": "..."}`. [`ApiError`] is the single
//! place where a [`DomainError`] becomes an HTTP status.

pub mod api_path;
pub mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use api_path::ApiPath;
pub use validated_json::ValidatedJson;

/// Body of every error and of plain acknowledgements
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Domain failure on its way to the client
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::InvalidRequest(_) | DomainError::NoAvailability => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::BackendUnavailable(_)
            | DomainError::Decode(_)
            | DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if !self.0.is_client_error() {
            tracing::error!(%status, "Request failed: {}", self.0);
        }
        (status, Json(MessageResponse::new(self.0.public_message()))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn no_availability_is_400_with_fixed_message() {
        let response = ApiError(DomainError::NoAvailability).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await["message"], "No rooms available");
    }

    #[tokio::test]
    async fn store_detail_is_hidden() {
        let response =
            ApiError(DomainError::Store("SELECT * FROM reservations failed".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert!(!body["message"].as_str().unwrap().contains("SELECT"));
    }

    #[tokio::test]
    async fn backend_problems_are_500_with_generic_message() {
        for err in [
            DomainError::BackendUnavailable("timeout after 10s".into()),
            DomainError::Decode("unexpected <html>".into()),
        ] {
            let response = ApiError(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let message = body_of(response).await["message"].as_str().unwrap().to_string();
            assert!(!message.contains("timeout after") && !message.contains("<html>"));
        }
    }

    #[tokio::test]
    async fn not_found_names_the_entity() {
        let response = ApiError(DomainError::not_found("Reservation", 5)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await["message"], "Reservation not found");
    }
}
