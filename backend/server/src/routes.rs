use std::sync::Arc;

use axum::{
    Json,
    extract::{State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::AppError,
    models::Created,
    schema::{Issue, validate},
    state::State,
};

pub const CREATED_MESSAGE: &str = "RSVP submitted successfully";

pub async fn rsvp_handler(
    AxumState(state): AxumState<Arc<State>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) =
        payload.map_err(|e| AppError::Validation(vec![Issue::malformed(e.body_text())]))?;

    let new_rsvp = validate(&payload).map_err(AppError::Validation)?;

    let _guard = state.submissions.lock().await;

    if let Some(existing) = state
        .store
        .find_by_email(&new_rsvp.email)
        .await
        .map_err(AppError::SubmitFailed)?
    {
        warn!("Duplicate RSVP, email already held by RSVP {}", existing.id);
        return Err(AppError::DuplicateEmail);
    }

    let rsvp = state
        .store
        .create(new_rsvp)
        .await
        .map_err(AppError::SubmitFailed)?;

    info!("RSVP {} created", rsvp.id);

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: CREATED_MESSAGE,
            data: rsvp,
        }),
    ))
}

pub async fn rsvps_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<impl IntoResponse, AppError> {
    let rsvps = state.store.list().await.map_err(AppError::ListFailed)?;

    Ok((StatusCode::OK, Json(rsvps)))
}
