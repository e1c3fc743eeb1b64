//! Error responses of the search endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::error::UpstreamError;

/// Body returned for every handler failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failure of a search request, mapped onto a fixed status and body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Upstream credential missing from the environment.
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// Required query parameter absent or empty.
    #[error("Missing '{0}' query parameter")]
    MissingParam(&'static str),

    /// Upstream call or response handling failed.
    #[error("upstream failure: {0}")]
    Internal(#[from] UpstreamError),
}

impl ApiError {
    /// Outcome label for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::NotConfigured(_) => "not_configured",
            ApiError::MissingParam(_) => "invalid_request",
            ApiError::Internal(_) => "upstream_error",
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParam(_) => StatusCode::BAD_REQUEST,
            ApiError::NotConfigured(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Upstream detail stays in the logs.
        let message = match &self {
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };

        (self.status(), Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_public_contract() {
        assert_eq!(
            ApiError::NotConfigured("USDA_API_KEY").to_string(),
            "USDA_API_KEY not configured"
        );
        assert_eq!(
            ApiError::MissingParam("q").to_string(),
            "Missing 'q' query parameter"
        );
    }

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(
            ApiError::NotConfigured("YOUTUBE_API_KEY").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::MissingParam("q").status(), StatusCode::BAD_REQUEST);

        let internal = ApiError::from(UpstreamError::Decode {
            service: "usda",
            reason: "bad".to_string(),
        });
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.outcome(), "upstream_error");
    }
}
