use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::models::MappingRecord;

pub mod memory;
pub mod spanner;

pub use memory::MemoryStore;
pub use spanner::SpannerStore;

/// Key-value persistence for mapping records.
///
/// Implementations hold no business state of their own between calls other
/// than what lives in the backing store.
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Insert or overwrite the record stored under `record.short_code`.
    async fn put(&self, record: &MappingRecord) -> Result<()>;

    /// Look up the destination URL for a short code.
    async fn get(&self, short_code: &str) -> Result<Option<String>>;

    /// Cheap round trip proving the backend answers.
    async fn health_check(&self) -> Result<()>;

    fn backend(&self) -> &'static str;
}

/// Build the store selected by the configuration.
///
/// Called once at startup; the returned handle is shared by every request.
pub async fn connect(config: &Config) -> Result<Arc<dyn UrlStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; mappings are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Spanner => {
            let spanner = config
                .spanner
                .as_ref()
                .context("Spanner backend selected without Spanner settings")?;
            let store = SpannerStore::connect(spanner, &config.table_name).await?;
            Ok(Arc::new(store))
        }
    }
}
