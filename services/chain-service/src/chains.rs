use axum::{
    Json,
    extract::{Path, Query, State},
};
use cr_chain_client::ChainMetadataSource;
use cr_chain_registry::ChainRegistry;
use cr_chain_types::{Chain, ChainInput};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{ApiResult, AppState, bad_request};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CachedChainsResponse {
    pub(crate) cached: Vec<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChainSymbolResponse {
    pub(crate) chain_id: u64,
    pub(crate) symbol: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChainDecimalsResponse {
    pub(crate) chain_id: u64,
    pub(crate) decimals: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NativeCurrencyNameResponse {
    pub(crate) chain_id: u64,
    pub(crate) name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcUrlResponse {
    pub(crate) chain_id: u64,
    pub(crate) rpc_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcUrlQuery {
    client_id: Option<String>,
}

/// Cached chain for `chain_id`, or the templated default.
pub(crate) async fn get_chain(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
) -> Json<Chain> {
    Json(state.registry.get_cached_chain(chain_id))
}

/// Normalizes each input and stores the result in the shared cache.
pub(crate) async fn cache_chains(
    State(state): State<Arc<AppState>>,
    Json(inputs): Json<Vec<ChainInput>>,
) -> ApiResult<CachedChainsResponse> {
    if inputs.is_empty() {
        return Err(bad_request("at least one chain is required"));
    }

    let chains = chains_to_cache(&state.registry, inputs);
    let cached: Vec<u64> = chains.iter().map(|chain| chain.id).collect();

    state.registry.cache_chains(chains);
    info!(count = cached.len(), "chains cached");

    Ok(Json(CachedChainsResponse { cached }))
}

/// Normalizes inputs for insertion into the cache. Bare ids that are not
/// cached yet are skipped so the templated default never becomes an entry.
pub(crate) fn chains_to_cache<M: ChainMetadataSource>(
    registry: &ChainRegistry<M>,
    inputs: Vec<ChainInput>,
) -> Vec<Chain> {
    inputs
        .into_iter()
        .filter_map(|input| match input {
            ChainInput::Id(id) if !registry.chains().contains(id) => {
                debug!(chain_id = id, "skipping uncached chain id");
                None
            }
            input => Some(registry.define_chain(input)),
        })
        .collect()
}

/// Normalizes a single input without caching it.
pub(crate) async fn define_chain(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ChainInput>,
) -> Json<Chain> {
    Json(state.registry.define_chain(input))
}

pub(crate) async fn chain_symbol(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
) -> Json<ChainSymbolResponse> {
    let chain = state.registry.get_cached_chain(chain_id);
    Json(ChainSymbolResponse {
        chain_id,
        symbol: state.registry.chain_symbol(&chain).await,
    })
}

pub(crate) async fn chain_decimals(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
) -> Json<ChainDecimalsResponse> {
    let chain = state.registry.get_cached_chain(chain_id);
    Json(ChainDecimalsResponse {
        chain_id,
        decimals: state.registry.chain_decimals(&chain).await,
    })
}

pub(crate) async fn chain_native_currency_name(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
) -> Json<NativeCurrencyNameResponse> {
    let chain = state.registry.get_cached_chain(chain_id);
    Json(NativeCurrencyNameResponse {
        chain_id,
        name: state.registry.chain_native_currency_name(&chain).await,
    })
}

/// RPC endpoint for the chain with the client id applied. The `client_id`
/// query parameter overrides the configured one.
pub(crate) async fn rpc_url(
    State(state): State<Arc<AppState>>,
    Path(chain_id): Path<u64>,
    Query(query): Query<RpcUrlQuery>,
) -> ApiResult<RpcUrlResponse> {
    let client_id = query
        .client_id
        .filter(|value| !value.trim().is_empty())
        .or_else(|| state.client_id.clone())
        .ok_or_else(|| bad_request("client_id is required; set THIRDWEB_CLIENT_ID or pass ?client_id="))?;

    let chain = state.registry.get_cached_chain(chain_id);
    Ok(Json(RpcUrlResponse {
        chain_id,
        rpc_url: state.registry.rpc_url_for_chain(&chain, &client_id),
    }))
}
