use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use cr_chain_types::{Chain, ChainInput};

use crate::normalize;

pub const DEFAULT_RPC_DOMAIN: &str = "rpc.thirdweb.com";

pub fn default_rpc_url(chain_id: u64, rpc_domain: &str) -> String {
    format!("https://{chain_id}.{rpc_domain}")
}

pub struct ChainCache {
    chains: RwLock<HashMap<u64, Chain>>,
    rpc_domain: String,
}

impl Default for ChainCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainCache {
    pub fn new() -> Self {
        Self::with_rpc_domain(DEFAULT_RPC_DOMAIN)
    }

    pub fn with_rpc_domain(rpc_domain: impl Into<String>) -> Self {
        Self {
            chains: RwLock::new(HashMap::new()),
            rpc_domain: rpc_domain.into(),
        }
    }

    pub fn rpc_domain(&self) -> &str {
        &self.rpc_domain
    }

    pub fn cache_chains(&self, chains: impl IntoIterator<Item = Chain>) {
        let mut guard = self.chains.write().unwrap_or_else(PoisonError::into_inner);
        for chain in chains {
            guard.insert(chain.id, chain);
        }
    }

    pub fn get_cached_chain(&self, id: u64) -> Chain {
        self.get_cached_chain_if_exists(id)
            .unwrap_or_else(|| self.default_chain(id))
    }

    pub fn get_cached_chain_if_exists(&self, id: u64) -> Option<Chain> {
        let guard = self.chains.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(&id).cloned()
    }

    pub fn contains(&self, id: u64) -> bool {
        let guard = self.chains.read().unwrap_or_else(PoisonError::into_inner);
        guard.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        let guard = self.chains.read().unwrap_or_else(PoisonError::into_inner);
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn default_chain(&self, id: u64) -> Chain {
        Chain {
            id,
            name: String::new(),
            rpc: default_rpc_url(id, &self.rpc_domain),
            native_currency: None,
            block_explorers: None,
            testnet: None,
            icon: None,
            faucets: None,
        }
    }

    // Explicit chain objects never read or write the cache.
    pub fn define_chain(&self, input: impl Into<ChainInput>) -> Chain {
        match input.into() {
            ChainInput::Id(id) => self.get_cached_chain(id),
            ChainInput::Custom(options) => normalize::from_options(options, &self.rpc_domain),
            ChainInput::External(chain) => normalize::from_external(&chain, &self.rpc_domain),
            ChainInput::Legacy(chain) => normalize::from_legacy(&chain, &self.rpc_domain),
        }
    }
}
