use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::shortcode::is_short_code;
use crate::state::AppState;
use anyhow::Context;
use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderName, HeaderValue, StatusCode, header},
};

/// GET /{short_code} handler - Redirect to the stored URL
#[utoipa::path(
    get,
    path = routes::RESOLVE,
    params(
        ("short_code" = String, Path, description = "Short code returned by POST /shorten")
    ),
    responses(
        (status = 301, description = "Redirect to the stored URL",
            headers(("Location" = String, description = "Destination URL"))),
        (status = 400, description = "Missing or undecodable short code", body = ErrorResponse),
        (status = 404, description = "Short code not found", body = ErrorResponse),
        (status = 500, description = "Unexpected fault", body = ErrorResponse)
    ),
    tag = "shortener"
)]
pub async fn resolve_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, [(HeaderName, HeaderValue); 1]), ApiError> {
    // A segment that does not decode to UTF-8 cannot name a stored code
    let Path(short_code) = path.map_err(|rejection| {
        tracing::debug!("Rejecting short code path: {}", rejection);
        ApiError::InvalidRequest
    })?;

    let url = state.store.get(&short_code).await?;
    tracing::info!(
        generated = is_short_code(&short_code),
        "Resolved {} -> {:?}",
        short_code,
        url
    );

    let Some(url) = url else {
        return Err(ApiError::NotFound(short_code));
    };

    let location = HeaderValue::from_str(&url)
        .with_context(|| format!("Stored URL for {} is not a valid Location header", short_code))?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}

/// GET / handler - A resolve request that carries no short code
pub async fn missing_short_code_handler() -> ApiError {
    ApiError::MissingShortCode
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorResponse;
    use crate::models::MappingRecord;
    use crate::store::UrlStore;
    use crate::test_support::{body_bytes, body_json, failing_app, memory_app, send};
    use axum::{
        body::Body,
        http::{StatusCode, header},
    };

    async fn seed(store: &impl UrlStore, short_code: &str, url: &str) {
        store
            .put(&MappingRecord {
                short_code: short_code.to_string(),
                url: url.to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_resolve_redirects() {
        let (app, store) = memory_app();
        seed(&store, "abc123", "https://example.com").await;

        let response = send(&app, "GET", "/abc123", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com"
        );
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_is_repeatable_until_overwritten() {
        let (app, store) = memory_app();
        seed(&store, "abc123", "https://example.com").await;

        for _ in 0..3 {
            let response = send(&app, "GET", "/abc123", Body::empty()).await;
            assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "https://example.com"
            );
        }

        seed(&store, "abc123", "https://example.org/other").await;

        let response = send(&app, "GET", "/abc123", Body::empty()).await;
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.org/other"
        );
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let (app, _store) = memory_app();

        let response = send(&app, "GET", "/doesnotexist", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Short URL not present.");
    }

    #[tokio::test]
    async fn test_resolve_without_short_code() {
        let (app, _store) = memory_app();

        let response = send(&app, "GET", "/", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "ShortCode is required");
    }

    #[tokio::test]
    async fn test_resolve_undecodable_code_is_json_bad_request() {
        let (app, _store) = memory_app();

        let response = send(&app, "GET", "/%FF%FE", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Invalid request");
    }

    #[tokio::test]
    async fn test_resolve_unusable_location_is_internal_error() {
        let (app, store) = memory_app();
        seed(&store, "abc123", "https://example.com/\nSet-Cookie: x=1").await;

        let response = send(&app, "GET", "/abc123", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[tokio::test]
    async fn test_resolve_store_failure() {
        let app = failing_app();

        let response = send(&app, "GET", "/abc123", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorResponse = body_json(response).await;
        assert_eq!(error.error, "Internal Server Error");
    }
}
