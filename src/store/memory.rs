use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use super::UrlStore;
use crate::models::MappingRecord;

/// Process-local store mapping short_code -> url.
///
/// Backed by a DashMap so concurrent requests never block each other for
/// long. Used for local development and tests; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStore {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl UrlStore for MemoryStore {
    async fn put(&self, record: &MappingRecord) -> Result<()> {
        self.inner
            .insert(record.short_code.clone(), record.url.clone());
        tracing::debug!("Stored mapping for short code: {}", record.short_code);
        Ok(())
    }

    async fn get(&self, short_code: &str) -> Result<Option<String>> {
        Ok(self.inner.get(short_code).map(|url| url.clone()))
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
