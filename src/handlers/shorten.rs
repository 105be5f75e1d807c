use crate::error::{ApiError, ErrorResponse};
use crate::models::{MappingRecord, ShortenRequest, ShortenResponse};
use crate::routes;
use crate::shortcode::generate_short_code;
use crate::state::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
};
use serde_json::Value as JsonValue;

/// POST /shorten handler - Store a URL under a freshly generated short code
///
/// The body is taken raw rather than through the `Json` extractor: an empty
/// body is a client error, while a body that cannot be read (including one
/// over the default 2 MiB limit) or is not JSON at all is treated as an
/// internal fault.
#[utoipa::path(
    post,
    path = routes::SHORTEN,
    request_body = ShortenRequest,
    responses(
        (status = 200, description = "Short URL created", body = ShortenResponse),
        (status = 400, description = "Missing request body or URL", body = ErrorResponse),
        (status = 500, description = "Unexpected fault", body = ErrorResponse)
    ),
    tag = "shortener"
)]
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), ApiError> {
    let body = body.map_err(|rejection| {
        anyhow::anyhow!("Failed to read request body: {}", rejection)
    })?;

    if body.is_empty() {
        return Err(ApiError::MissingBody);
    }

    let value: JsonValue = serde_json::from_slice(&body)?;
    let request = ShortenRequest::from_value(&value).ok_or(ApiError::MissingUrl)?;

    let record = MappingRecord {
        short_code: generate_short_code(),
        url: request.url,
    };
    state.store.put(&record).await?;

    tracing::info!("Created short code {} for {}", record.short_code, record.url);
    Ok((
        StatusCode::OK,
        Json(ShortenResponse {
            short_url: state.config.short_url(&record.short_code),
        }),
    ))
}
