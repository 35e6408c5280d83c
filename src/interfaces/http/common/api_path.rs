//! Path extractor with `{message}` rejections
//!
//! `ApiPath<T>` is `axum::extract::Path<T>` whose failures (for example
//! `/reservations/abc` against an `i32` id) answer with the same
//! `{"message": ...}` body as every other REST error.

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::MessageResponse;

pub struct ApiPath<T>(pub T);

pub struct ApiPathRejection(PathRejection);

impl IntoResponse for ApiPathRejection {
    fn into_response(self) -> Response {
        let message = format!("Invalid path parameter: {}", self.0.body_text());
        (self.0.status(), Json(MessageResponse::new(message))).into_response()
    }
}

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiPathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(ApiPathRejection)?;
        Ok(ApiPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn echo(ApiPath(id): ApiPath<i32>) -> String {
        id.to_string()
    }

    async fn get_path(uri: &str) -> (StatusCode, Vec<u8>) {
        let app = Router::new().route("/rooms/{id}", get(echo));
        let resp = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn numeric_id_is_extracted() {
        let (status, bytes) = get_path("/rooms/42").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"42");
    }

    #[tokio::test]
    async fn non_numeric_id_is_400_with_message_body() {
        let (status, bytes) = get_path("/rooms/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid path parameter"));
    }
}
