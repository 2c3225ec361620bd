use async_trait::async_trait;
use cr_chain_types::ChainMetadata;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MetadataError {
    #[error("transport error fetching chain {chain_id}: {message}")]
    Transport { chain_id: u64, message: String },

    #[error("registry returned HTTP {status} for chain {chain_id}")]
    Status { chain_id: u64, status: u16 },

    #[error("chain {0} not found")]
    NotFound(u64),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("malformed registry response: {0}")]
    Malformed(String),
}

/// Resolves registry metadata (native currency, explorers, ...) for a chain id.
#[async_trait]
pub trait ChainMetadataSource: Send + Sync {
    async fn chain_metadata(&self, chain_id: u64) -> Result<ChainMetadata, MetadataError>;
}

#[async_trait]
impl<T: ChainMetadataSource + ?Sized> ChainMetadataSource for Arc<T> {
    async fn chain_metadata(&self, chain_id: u64) -> Result<ChainMetadata, MetadataError> {
        (**self).chain_metadata(chain_id).await
    }
}

/// Source that never resolves anything. Every lookup falls back.
#[derive(Default)]
pub struct NoopMetadataSource;

#[async_trait]
impl ChainMetadataSource for NoopMetadataSource {
    async fn chain_metadata(&self, chain_id: u64) -> Result<ChainMetadata, MetadataError> {
        Err(MetadataError::NotFound(chain_id))
    }
}

/// In-memory registry, keyed by chain id.
#[derive(Default)]
pub struct StaticMetadataSource {
    records: RwLock<HashMap<u64, ChainMetadata>>,
}

impl StaticMetadataSource {
    pub fn new(records: impl IntoIterator<Item = ChainMetadata>) -> Self {
        Self {
            records: RwLock::new(
                records
                    .into_iter()
                    .map(|record| (record.chain_id, record))
                    .collect(),
            ),
        }
    }

    pub async fn insert(&self, record: ChainMetadata) {
        let mut guard = self.records.write().await;
        guard.insert(record.chain_id, record);
    }
}

#[async_trait]
impl ChainMetadataSource for StaticMetadataSource {
    async fn chain_metadata(&self, chain_id: u64) -> Result<ChainMetadata, MetadataError> {
        let guard = self.records.read().await;
        guard
            .get(&chain_id)
            .cloned()
            .ok_or(MetadataError::NotFound(chain_id))
    }
}
