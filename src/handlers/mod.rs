pub mod docs;
pub mod fallback;
pub mod health;
pub mod resolve;
pub mod shorten;

pub use docs::openapi_handler;
pub use fallback::invalid_request_handler;
pub use health::health_handler;
pub use resolve::{missing_short_code_handler, resolve_handler};
pub use shorten::shorten_handler;
