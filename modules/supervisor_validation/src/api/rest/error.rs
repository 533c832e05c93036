//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized").with_detail(detail)
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(detail)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            [(http::header::CONTENT_TYPE, "application/problem+json")],
            Json(self),
        )
            .into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: ValidationError) -> Problem {
    let detail = error.to_string();
    match error {
        ValidationError::NotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, "Not Found").with_detail(detail)
        }

        ValidationError::Forbidden { .. } => {
            Problem::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(detail)
        }

        ValidationError::PendingItems { .. } => {
            Problem::new(StatusCode::CONFLICT, "Pending Items").with_detail(detail)
        }

        ValidationError::AlreadyCompleted { .. } => {
            Problem::new(StatusCode::CONFLICT, "Validation Already Completed").with_detail(detail)
        }

        ValidationError::DecisionsChanged { .. } => {
            Problem::new(StatusCode::CONFLICT, "Decisions Changed").with_detail(detail)
        }

        ValidationError::InvalidTransition { .. } => {
            Problem::new(StatusCode::CONFLICT, "Invalid Status Transition").with_detail(detail)
        }

        ValidationError::Validation { message } => Problem::bad_request(message),

        ValidationError::Internal => {
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                .with_detail("An unexpected error occurred")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn conflicts_map_to_409() {
        let id = Uuid::new_v4();
        let pending = map_domain_error(ValidationError::PendingItems {
            validation_id: id,
            pending: 2,
        });
        assert_eq!(pending.status, 409);
        assert!(pending.detail.unwrap_or_default().contains("2 pending"));

        let done = map_domain_error(ValidationError::AlreadyCompleted { validation_id: id });
        assert_eq!(done.status, 409);

        let changed = map_domain_error(ValidationError::DecisionsChanged { validation_id: id });
        assert_eq!(changed.status, 409);
        assert_eq!(changed.title, "Decisions Changed");
    }

    #[test]
    fn internal_errors_hide_details() {
        let problem = map_domain_error(ValidationError::Internal);
        assert_eq!(problem.status, 500);
        assert_eq!(problem.detail.as_deref(), Some("An unexpected error occurred"));
    }

    #[test]
    fn validation_messages_are_passed_through() {
        let problem = map_domain_error(ValidationError::validation("comment is required"));
        assert_eq!(problem.status, 400);
        assert_eq!(problem.detail.as_deref(), Some("comment is required"));
        assert_eq!(problem.type_uri, "https://httpstatuses.io/400");
    }
}
