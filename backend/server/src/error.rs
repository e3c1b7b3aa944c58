use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{schema::Issue, store::StoreError};

pub const VALIDATION_MESSAGE: &str = "Validation error";
pub const DUPLICATE_MESSAGE: &str = "You have already RSVP'd with this email address";
pub const SUBMIT_FAILED_MESSAGE: &str = "An error occurred while submitting your RSVP";
pub const LIST_FAILED_MESSAGE: &str = "An error occurred while fetching RSVPs";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {} issue(s)", .0.len())]
    Validation(Vec<Issue>),

    #[error("Duplicate email")]
    DuplicateEmail,

    #[error("Submit failed: {0}")]
    SubmitFailed(#[source] StoreError),

    #[error("List failed: {0}")]
    ListFailed(#[source] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": VALIDATION_MESSAGE, "errors": issues }),
            ),
            AppError::DuplicateEmail => (
                StatusCode::CONFLICT,
                json!({ "message": DUPLICATE_MESSAGE }),
            ),
            AppError::SubmitFailed(e) => {
                error!("Error submitting RSVP: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": SUBMIT_FAILED_MESSAGE }),
                )
            }
            AppError::ListFailed(e) => {
                error!("Error fetching RSVPs: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": LIST_FAILED_MESSAGE }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
