use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::models::{DevEvent, DevEventInput, DevEventSpeaker, DevEventSpeakerInput, DevEventView};
use crate::state::AppState;
use crate::utils::error::AppError;

pub const DEV_EVENTS_PATH: &str = "/api/dev-events";

pub async fn list_dev_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.store.list_active_events().await?;
    let views: Vec<DevEventView> = events.into_iter().map(DevEventView::summary).collect();

    Ok(Json(views).into_response())
}

pub async fn get_dev_event(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id?;
    let (event, speakers) = state.store.get_event_with_speakers(id).await?;

    Ok(Json(DevEventView::with_speakers(event, speakers)).into_response())
}

pub async fn create_dev_event(
    State(state): State<AppState>,
    input: Result<Json<DevEventInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = input?;
    let event = state.store.create_event(DevEvent::from_input(input)).await?;
    info!(event_id = %event.id, "Dev event created");

    let location = format!("{}/{}", DEV_EVENTS_PATH, event.id);
    let body = DevEventView::with_speakers(event, Vec::new());

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response())
}

pub async fn update_dev_event(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    input: Result<Json<DevEventInput>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(input) = input?;

    state
        .store
        .update_event(
            id,
            input.title,
            input.description,
            input.start_date,
            input.end_date,
        )
        .await?;
    info!(event_id = %id, "Dev event updated");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_dev_event(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.store.soft_delete_event(id).await?;
    info!(event_id = %id, "Dev event soft deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_speaker(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    input: Result<Json<DevEventSpeakerInput>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(input) = input?;

    let speaker = DevEventSpeaker::from_input(input, id);
    let speaker_id = speaker.id;
    state.store.create_speaker(speaker, id).await?;
    info!(event_id = %id, speaker_id = %speaker_id, "Speaker added to dev event");

    Ok(StatusCode::NO_CONTENT)
}
