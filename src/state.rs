use crate::config::Config;
use crate::store::UrlStore;
use std::sync::Arc;

/// Shared application state
///
/// Built once at startup and never mutated afterwards; every request gets a
/// cheap clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UrlStore>,
    pub config: Arc<Config>,
}
