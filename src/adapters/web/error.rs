//! HTTP error responses for the web adapter.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::error::RotraderError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<RotraderError> for WebError {
    fn from(err: RotraderError) -> Self {
        let status = match &err {
            RotraderError::ConfigParse { .. }
            | RotraderError::ConfigMissing { .. }
            | RotraderError::ConfigInvalid { .. } => StatusCode::BAD_REQUEST,
            RotraderError::NotEnoughYears { .. }
            | RotraderError::EmptySelection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RotraderError::Universe(_) => StatusCode::BAD_REQUEST,
            RotraderError::Data { .. } | RotraderError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
