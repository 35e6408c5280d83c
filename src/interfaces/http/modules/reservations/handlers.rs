//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::application::ReservationOrchestrator;
use crate::interfaces::http::common::{ApiPath, ApiResult, MessageResponse, ValidatedJson};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub orchestrator: Arc<ReservationOrchestrator>,
}

#[utoipa::path(
    post,
    path = "/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation confirmed", body = CreateReservationResponse),
        (status = 400, description = "Invalid request or no rooms available", body = MessageResponse),
        (status = 500, description = "Availability service or storage failed", body = MessageResponse)
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> ApiResult<Json<CreateReservationResponse>> {
    let intent = request.into_intent()?;
    let confirmed = state.orchestrator.create_reservation(intent).await?;

    Ok(Json(CreateReservationResponse {
        message: "Reservation created successfully!".to_string(),
        room: confirmed.room.into(),
        reservation: confirmed.reservation.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/reservations",
    tag = "Reservations",
    responses(
        (status = 200, description = "All reservations, newest first", body = Vec<ReservationDto>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
) -> ApiResult<Json<Vec<ReservationDto>>> {
    let reservations = state.orchestrator.list_reservations().await?;
    Ok(Json(reservations.into_iter().map(ReservationDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ReservationDto),
        (status = 404, description = "Reservation not found", body = MessageResponse)
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<ReservationDto>> {
    let reservation = state.orchestrator.get_reservation(id).await?;
    Ok(Json(reservation.into()))
}

#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled and removed", body = CancelReservationResponse),
        (status = 404, description = "Reservation not found", body = MessageResponse)
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<CancelReservationResponse>> {
    let reservation = state.orchestrator.cancel_reservation(id).await?;
    Ok(Json(CancelReservationResponse {
        message: "Reservation deleted successfully".to_string(),
        reservation: reservation.into(),
    }))
}
