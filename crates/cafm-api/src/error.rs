//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

/// Error returned by every handler, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Internal(cafm_core::Error),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<cafm_core::Error> for ApiError {
    fn from(err: cafm_core::Error) -> Self {
        use cafm_core::Error;

        match &err {
            Error::NotFound(_) | Error::TicketNotFound(_) | Error::TechnicianNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            Error::InvalidTransition { .. } => ApiError::BadRequest(err.to_string()),
            Error::NoTechnicianAvailable(_) => ApiError::Conflict(err.to_string()),
            _ => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(err) => {
                error!(error = %err, "Request failed");
                err.to_string()
            }
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Conflict(msg) => msg,
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafm_core::{Error, TicketStatus};
    use uuid::Uuid;

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (Error::TicketNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (Error::TechnicianNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (Error::InvalidInput("title".into()), StatusCode::BAD_REQUEST),
            (
                Error::InvalidTransition {
                    from: TicketStatus::Closed,
                    to: TicketStatus::Open,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::NoTechnicianAvailable("Plumber".into()),
                StatusCode::CONFLICT,
            ),
            (Error::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_invalid_input_keeps_bare_message() {
        match ApiError::from(Error::InvalidInput("Title must not be empty".into())) {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Title must not be empty"),
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::Conflict("busy".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
