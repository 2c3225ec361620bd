use std::sync::Arc;
use std::time::Duration;

use cr_chain_client::{ChainMetadataSource, MetadataError};
use cr_chain_types::{Chain, ChainInput, ChainMetadata};
use moka::future::Cache;
use tracing::debug;

use crate::cache::ChainCache;
use crate::rpc;

pub const FALLBACK_SYMBOL: &str = "ETH";
pub const FALLBACK_DECIMALS: u8 = 18;
pub const FALLBACK_NATIVE_CURRENCY_NAME: &str = "ETH";

pub const DEFAULT_METADATA_TTL: Duration = Duration::from_secs(5 * 60);

const METADATA_CAPACITY: u64 = 10_000;

pub struct ChainRegistry<M> {
    source: M,
    chains: Arc<ChainCache>,
    metadata: Cache<u64, ChainMetadata>,
}

impl<M> ChainRegistry<M>
where
    M: ChainMetadataSource,
{
    pub fn new(source: M) -> Self {
        Self::with_cache(source, Arc::new(ChainCache::new()))
    }

    pub fn shared(source: M) -> Self {
        Self::with_cache(source, crate::global_chain_cache().clone())
    }

    pub fn with_cache(source: M, chains: Arc<ChainCache>) -> Self {
        Self {
            source,
            chains,
            metadata: metadata_cache(DEFAULT_METADATA_TTL),
        }
    }

    pub fn with_metadata_ttl(mut self, ttl: Duration) -> Self {
        self.metadata = metadata_cache(ttl);
        self
    }

    pub fn chains(&self) -> &Arc<ChainCache> {
        &self.chains
    }

    pub fn define_chain(&self, input: impl Into<ChainInput>) -> Chain {
        self.chains.define_chain(input)
    }

    pub fn cache_chains(&self, chains: impl IntoIterator<Item = Chain>) {
        self.chains.cache_chains(chains)
    }

    pub fn get_cached_chain(&self, id: u64) -> Chain {
        self.chains.get_cached_chain(id)
    }

    pub fn get_cached_chain_if_exists(&self, id: u64) -> Option<Chain> {
        self.chains.get_cached_chain_if_exists(id)
    }

    pub fn rpc_url_for_chain(&self, chain: &Chain, client_id: &str) -> String {
        rpc::rpc_url_for_chain(chain, client_id, self.chains.rpc_domain())
    }

    // Only successful lookups are cached.
    pub async fn chain_metadata(&self, chain: &Chain) -> Result<ChainMetadata, MetadataError> {
        let chain_id = chain.id;
        self.metadata
            .try_get_with(chain_id, self.source.chain_metadata(chain_id))
            .await
            .map_err(|err| (*err).clone())
    }

    pub async fn chain_symbol(&self, chain: &Chain) -> String {
        let local = chain
            .native_currency
            .as_ref()
            .and_then(|currency| currency.symbol.clone())
            .filter(|symbol| !symbol.is_empty());
        if let Some(symbol) = local {
            return symbol;
        }

        match self.chain_metadata(chain).await {
            Ok(metadata) => metadata.native_currency.symbol,
            Err(err) => {
                debug!(chain_id = chain.id, error = %err, "chain symbol lookup failed, using fallback");
                FALLBACK_SYMBOL.to_owned()
            }
        }
    }

    pub async fn chain_decimals(&self, chain: &Chain) -> u8 {
        let local = chain
            .native_currency
            .as_ref()
            .and_then(|currency| currency.decimals);
        if let Some(decimals) = local {
            return decimals;
        }

        match self.chain_metadata(chain).await {
            Ok(metadata) => metadata.native_currency.decimals,
            Err(err) => {
                debug!(chain_id = chain.id, error = %err, "chain decimals lookup failed, using fallback");
                FALLBACK_DECIMALS
            }
        }
    }

    pub async fn chain_native_currency_name(&self, chain: &Chain) -> String {
        let local = chain
            .native_currency
            .as_ref()
            .and_then(|currency| currency.name.clone())
            .filter(|name| !name.is_empty());
        if let Some(name) = local {
            return name;
        }

        match self.chain_metadata(chain).await {
            Ok(metadata) => metadata.native_currency.name,
            Err(err) => {
                debug!(chain_id = chain.id, error = %err, "native currency lookup failed, using fallback");
                FALLBACK_NATIVE_CURRENCY_NAME.to_owned()
            }
        }
    }
}

fn metadata_cache(ttl: Duration) -> Cache<u64, ChainMetadata> {
    Cache::builder()
        .time_to_live(ttl)
        .max_capacity(METADATA_CAPACITY)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cr_chain_client::{NoopMetadataSource, StaticMetadataSource};
    use cr_chain_types::{ChainOptions, NativeCurrency};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn registry_record(chain_id: u64, name: &str, symbol: &str) -> ChainMetadata {
        serde_json::from_value(json!({
            "chain": symbol,
            "chainId": chain_id,
            "name": format!("{name} Chain"),
            "rpc": [format!("https://{chain_id}.rpc.thirdweb.com/${{THIRDWEB_API_KEY}}")],
            "nativeCurrency": { "name": name, "symbol": symbol, "decimals": 18 },
            "shortName": symbol.to_lowercase(),
            "slug": name.to_lowercase()
        }))
        .unwrap()
    }

    fn static_registry() -> ChainRegistry<StaticMetadataSource> {
        ChainRegistry::new(StaticMetadataSource::new([
            registry_record(1, "Ether", "ETH"),
            registry_record(43114, "Avalanche", "AVAX"),
        ]))
    }

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ChainMetadataSource for CountingSource {
        async fn chain_metadata(&self, chain_id: u64) -> Result<ChainMetadata, MetadataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(MetadataError::Transport {
                    chain_id,
                    message: "connection refused".to_owned(),
                });
            }
            Ok(registry_record(chain_id, "Ether", "ETH"))
        }
    }

    #[tokio::test]
    async fn local_fields_win_over_lookup() {
        let registry = ChainRegistry::new(NoopMetadataSource);
        let chain = registry.define_chain(ChainOptions {
            id: 43114,
            native_currency: Some(NativeCurrency {
                name: Some("Avalanche".to_owned()),
                symbol: Some("AVAX".to_owned()),
                decimals: Some(18),
            }),
            ..ChainOptions::default()
        });

        assert_eq!(registry.chain_symbol(&chain).await, "AVAX");
        assert_eq!(registry.chain_decimals(&chain).await, 18);
        assert_eq!(registry.chain_native_currency_name(&chain).await, "Avalanche");
    }

    #[tokio::test]
    async fn missing_fields_come_from_registry() {
        let registry = static_registry();
        let chain = registry.define_chain(1_u64);

        assert_eq!(registry.chain_symbol(&chain).await, "ETH");
        assert_eq!(registry.chain_decimals(&chain).await, 18);
        assert_eq!(registry.chain_native_currency_name(&chain).await, "Ether");

        let avalanche = registry.define_chain(43114_u64);
        assert_eq!(registry.chain_symbol(&avalanche).await, "AVAX");
        assert_eq!(registry.chain_native_currency_name(&avalanche).await, "Avalanche");
    }

    #[tokio::test]
    async fn partial_currency_is_completed_from_registry() {
        let registry = static_registry();
        let chain = registry.define_chain(ChainOptions {
            id: 43114,
            native_currency: Some(NativeCurrency {
                symbol: Some(String::new()),
                ..NativeCurrency::default()
            }),
            ..ChainOptions::default()
        });

        assert_eq!(registry.chain_symbol(&chain).await, "AVAX");
        assert_eq!(registry.chain_decimals(&chain).await, 18);
    }

    #[tokio::test]
    async fn failed_lookups_fall_back() {
        let registry = static_registry();
        let unknown = registry.define_chain(987654321_u64);

        assert_eq!(registry.chain_decimals(&unknown).await, FALLBACK_DECIMALS);
        assert_eq!(registry.chain_symbol(&unknown).await, FALLBACK_SYMBOL);
        assert_eq!(
            registry.chain_native_currency_name(&unknown).await,
            FALLBACK_NATIVE_CURRENCY_NAME
        );
        assert_eq!(
            registry.chain_metadata(&unknown).await.unwrap_err(),
            MetadataError::NotFound(987654321)
        );
    }

    #[tokio::test]
    async fn successful_lookups_are_reused() {
        let registry = ChainRegistry::new(CountingSource::default());
        let chain = registry.define_chain(1_u64);

        registry.chain_symbol(&chain).await;
        registry.chain_decimals(&chain).await;
        registry.chain_native_currency_name(&chain).await;

        assert_eq!(registry.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_lookups_are_retried() {
        let registry = ChainRegistry::new(CountingSource {
            fail: true,
            ..CountingSource::default()
        });
        let chain = registry.define_chain(1_u64);

        assert_eq!(registry.chain_decimals(&chain).await, 18);
        assert_eq!(registry.chain_decimals(&chain).await, 18);

        assert_eq!(registry.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cached_metadata_expires_after_ttl() {
        let source = Arc::new(StaticMetadataSource::new([registry_record(1, "Ether", "ETH")]));
        let registry =
            ChainRegistry::new(source.clone()).with_metadata_ttl(Duration::from_millis(100));
        let chain = registry.define_chain(1_u64);

        assert_eq!(registry.chain_native_currency_name(&chain).await, "Ether");

        source.insert(registry_record(1, "Ether2", "ETH")).await;
        assert_eq!(registry.chain_native_currency_name(&chain).await, "Ether");

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(registry.chain_native_currency_name(&chain).await, "Ether2");
    }

    #[tokio::test]
    async fn lookups_do_not_touch_chain_cache() {
        let registry = static_registry();
        let chain = registry.define_chain(1_u64);
        registry.chain_symbol(&chain).await;

        assert!(registry.chains().is_empty());
    }

    #[test]
    fn registries_can_share_a_cache() {
        let chains = Arc::new(ChainCache::new());
        let first = ChainRegistry::with_cache(NoopMetadataSource, chains.clone());
        let second = ChainRegistry::with_cache(NoopMetadataSource, chains);

        let chain = first.define_chain(ChainOptions {
            id: 8453,
            name: Some("Base".to_owned()),
            ..ChainOptions::default()
        });
        first.cache_chains([chain.clone()]);

        assert_eq!(second.get_cached_chain(8453), chain);
        assert_eq!(second.get_cached_chain_if_exists(8453), Some(chain));
    }

    #[test]
    fn resolves_rpc_urls_with_registry_domain() {
        let registry = ChainRegistry::with_cache(
            NoopMetadataSource,
            Arc::new(ChainCache::with_rpc_domain("rpc.example.org")),
        );
        let chain = registry.get_cached_chain(5);
        assert_eq!(
            registry.rpc_url_for_chain(&chain, "client"),
            "https://5.rpc.example.org/client"
        );
    }
}
