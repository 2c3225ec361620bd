mod cache;
mod normalize;
mod registry;
mod rpc;

use std::sync::{Arc, LazyLock};

use cr_chain_types::{Chain, ChainInput};

pub use cache::{ChainCache, DEFAULT_RPC_DOMAIN, default_rpc_url};
pub use normalize::{convert_external_chain, convert_legacy_chain};
pub use registry::{
    ChainRegistry, DEFAULT_METADATA_TTL, FALLBACK_DECIMALS, FALLBACK_NATIVE_CURRENCY_NAME,
    FALLBACK_SYMBOL,
};
pub use rpc::{API_KEY_PLACEHOLDER, rpc_url_for_chain};

static CHAIN_CACHE: LazyLock<Arc<ChainCache>> = LazyLock::new(|| Arc::new(ChainCache::new()));

pub fn global_chain_cache() -> &'static Arc<ChainCache> {
    &CHAIN_CACHE
}

pub fn define_chain(input: impl Into<ChainInput>) -> Chain {
    CHAIN_CACHE.define_chain(input)
}

pub fn cache_chains(chains: impl IntoIterator<Item = Chain>) {
    CHAIN_CACHE.cache_chains(chains)
}

pub fn get_cached_chain(id: u64) -> Chain {
    CHAIN_CACHE.get_cached_chain(id)
}

pub fn get_cached_chain_if_exists(id: u64) -> Option<Chain> {
    CHAIN_CACHE.get_cached_chain_if_exists(id)
}
