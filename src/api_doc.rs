use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{ShortenRequest, ShortenResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "spanner-shortener API",
        version = "1.0.0",
        description = "A minimal URL shortener backed by Google Cloud Spanner"
    ),
    paths(
        handlers::health::health_handler,
        handlers::shorten::shorten_handler,
        handlers::resolve::resolve_handler
    ),
    components(
        schemas(
            ShortenRequest,
            ShortenResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "shortener", description = "Short URL creation and redirects")
    )
)]
pub struct ApiDoc;
