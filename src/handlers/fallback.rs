use crate::error::ApiError;
use axum::http::{Method, Uri};

/// Catch-all for every method/path that is neither create nor resolve
pub async fn invalid_request_handler(method: Method, uri: Uri) -> ApiError {
    tracing::debug!("Rejecting {} {}", method, uri.path());
    ApiError::InvalidRequest
}
