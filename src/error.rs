use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Every way a shortener request can fail.
///
/// Client mistakes map to 400, a missing record to 404, and anything else to a
/// generic 500. The cause of an internal fault is logged here and never
/// written into the response body.
#[derive(Debug)]
pub enum ApiError {
    /// Create request without a body
    MissingBody,
    /// Create request whose body has no usable `url`
    MissingUrl,
    /// Resolve request without a short code
    MissingShortCode,
    /// No record stored under the short code
    NotFound(String),
    /// Any method/path that is neither create nor resolve
    InvalidRequest,
    /// Store, parse or serialization fault
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingBody
            | ApiError::MissingUrl
            | ApiError::MissingShortCode
            | ApiError::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::MissingBody => "Missing request body",
            ApiError::MissingUrl => "Missing URL",
            ApiError::MissingShortCode => "ShortCode is required",
            ApiError::NotFound(_) => "Short URL not present.",
            ApiError::InvalidRequest => "Invalid request",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(err) => tracing::error!("Error: {:#}", err),
            ApiError::NotFound(code) => tracing::debug!("No mapping for short code: {}", code),
            _ => {}
        }

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });

        (self.status(), body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.into())
    }
}
