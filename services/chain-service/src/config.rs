//! Service configuration, read from environment variables at startup.
//!
//! - `PORT`: HTTP listen port (default: 8080)
//! - `THIRDWEB_API_URL`: chain registry base URL (default: https://api.thirdweb.com)
//! - `THIRDWEB_CLIENT_ID`: client id sent to the registry and used for RPC URLs
//! - `THIRDWEB_RPC_DOMAIN`: host suffix for templated RPC URLs (default: rpc.thirdweb.com)
//! - `CHAINS_FILE`: optional JSON array of chains preloaded into the cache
//! - `RUST_LOG`: tracing env filter

use anyhow::{Context, Result};
use cr_chain_registry::DEFAULT_RPC_DOMAIN;
use cr_chain_types::ChainInput;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceConfig {
    pub(crate) port: u16,
    pub(crate) api_url: Option<String>,
    pub(crate) client_id: Option<String>,
    pub(crate) rpc_domain: String,
    pub(crate) chains_file: Option<PathBuf>,
}

impl ServiceConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            api_url: non_empty("THIRDWEB_API_URL"),
            client_id: non_empty("THIRDWEB_CLIENT_ID"),
            rpc_domain: non_empty("THIRDWEB_RPC_DOMAIN")
                .unwrap_or_else(|| DEFAULT_RPC_DOMAIN.to_owned()),
            chains_file: non_empty("CHAINS_FILE").map(PathBuf::from),
        })
    }
}

/// Reads a JSON array of chain inputs (ids, custom chains, registry records
/// or third-party chain objects).
pub(crate) fn load_chain_inputs(path: &Path) -> Result<Vec<ChainInput>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read chains file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse chains file: {}", path.display()))
}
