use cr_chain_types::{BlockExplorer, Chain, ChainOptions, ExternalChain, LegacyChain};

use crate::cache::{DEFAULT_RPC_DOMAIN, default_rpc_url};

pub fn convert_legacy_chain(chain: &LegacyChain) -> Chain {
    from_legacy(chain, DEFAULT_RPC_DOMAIN)
}

pub fn convert_external_chain(chain: &ExternalChain) -> Chain {
    from_external(chain, DEFAULT_RPC_DOMAIN)
}

pub(crate) fn from_legacy(chain: &LegacyChain, rpc_domain: &str) -> Chain {
    Chain {
        id: chain.chain_id,
        name: chain.name.clone(),
        rpc: chain
            .rpc
            .first()
            .cloned()
            .unwrap_or_else(|| default_rpc_url(chain.chain_id, rpc_domain)),
        native_currency: Some(chain.native_currency.clone().into()),
        block_explorers: chain.explorers.as_ref().map(|explorers| {
            explorers
                .iter()
                .map(|explorer| BlockExplorer {
                    name: explorer.name.clone(),
                    url: explorer.url.clone(),
                    api_url: Some(explorer.url.clone()),
                })
                .collect()
        }),
        testnet: chain.testnet.then_some(true),
        icon: chain.icon.clone(),
        faucets: chain.faucets.clone(),
    }
}

pub(crate) fn from_external(chain: &ExternalChain, rpc_domain: &str) -> Chain {
    Chain {
        id: chain.id,
        name: chain.name.clone(),
        rpc: chain
            .rpc_urls
            .default
            .http
            .first()
            .cloned()
            .unwrap_or_else(|| default_rpc_url(chain.id, rpc_domain)),
        native_currency: Some(chain.native_currency.clone().into()),
        block_explorers: Some(
            chain
                .block_explorers
                .iter()
                .flat_map(|set| set.iter())
                .map(|explorer| BlockExplorer {
                    name: explorer.name.clone(),
                    url: explorer.url.clone(),
                    api_url: explorer.api_url.clone(),
                })
                .collect(),
        ),
        testnet: chain.testnet.unwrap_or(false).then_some(true),
        icon: None,
        faucets: None,
    }
}

pub(crate) fn from_options(options: ChainOptions, rpc_domain: &str) -> Chain {
    let rpc = options
        .rpc
        .filter(|rpc| !rpc.trim().is_empty())
        .unwrap_or_else(|| default_rpc_url(options.id, rpc_domain));

    Chain {
        id: options.id,
        name: options.name.unwrap_or_default(),
        rpc,
        native_currency: options.native_currency,
        block_explorers: options.block_explorers,
        testnet: options.testnet,
        icon: options.icon,
        faucets: options.faucets,
    }
}
