//! Room inventory HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{ApiPath, ApiResult, MessageResponse, ValidatedJson};

use super::dto::*;

#[derive(Clone)]
pub struct RoomAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    post,
    path = "/rooms",
    tag = "Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room registered", body = MessageResponse),
        (status = 400, description = "Missing field", body = MessageResponse)
    )
)]
pub async fn create_room(
    State(state): State<RoomAppState>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let room = state.repos.rooms().create(request.into_new_room()).await?;
    info!(room_id = room.room_id, room_number = room.room_number, "Room registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Room registered successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/rooms",
    tag = "Rooms",
    responses((status = 200, description = "All rooms", body = Vec<RoomDto>))
)]
pub async fn list_rooms(State(state): State<RoomAppState>) -> ApiResult<Json<Vec<RoomDto>>> {
    let rooms = state.repos.rooms().find_all().await?;
    Ok(Json(rooms.into_iter().map(RoomDto::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/rooms/{id}",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room ID")),
    request_body = UpdateRoomStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = RoomChangeResponse),
        (status = 404, description = "Room not found", body = MessageResponse)
    )
)]
pub async fn update_room_status(
    State(state): State<RoomAppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRoomStatusRequest>,
) -> ApiResult<Json<RoomChangeResponse>> {
    let status = request.status.unwrap_or_default();
    let room = state
        .repos
        .rooms()
        .update_status(id, &status)
        .await?
        .ok_or_else(|| DomainError::not_found("Room", id))?;

    Ok(Json(RoomChangeResponse {
        message: "Room status updated successfully".to_string(),
        room: room.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted", body = RoomChangeResponse),
        (status = 404, description = "Room not found", body = MessageResponse)
    )
)]
pub async fn delete_room(
    State(state): State<RoomAppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<RoomChangeResponse>> {
    let room = state
        .repos
        .rooms()
        .delete(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Room", id))?;

    info!(room_id = id, "Room deleted");
    Ok(Json(RoomChangeResponse {
        message: "Room deleted successfully".to_string(),
        room: room.into(),
    }))
}
