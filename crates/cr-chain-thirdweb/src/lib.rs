use async_trait::async_trait;
use cr_chain_client::{ChainMetadataSource, MetadataError};
use cr_chain_types::ChainMetadata;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.thirdweb.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP source backed by the thirdweb chain registry.
///
/// Reads `THIRDWEB_API_URL` and `THIRDWEB_CLIENT_ID` from environment at
/// construction time when they are not passed explicitly.
pub struct ThirdwebMetadataSource {
    endpoint: String,
    client_id: Option<String>,
    http: reqwest::Client,
}

impl Default for ThirdwebMetadataSource {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl ThirdwebMetadataSource {
    pub fn new(endpoint: Option<String>, client_id: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var("THIRDWEB_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let client_id = client_id
            .or_else(|| std::env::var("THIRDWEB_CLIENT_ID").ok())
            .filter(|value| !value.trim().is_empty());
        let http = http_client(reqwest::Client::builder().timeout(REQUEST_TIMEOUT));

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client_id,
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn http_client(builder: reqwest::ClientBuilder) -> reqwest::Client {
    builder.build().unwrap_or_else(|err| {
        warn!(error = %err, "failed to build registry http client, using defaults without timeout");
        reqwest::Client::new()
    })
}

// ── Registry REST API types ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChainEnvelope {
    #[serde(default)]
    data: Option<ChainMetadata>,
    #[serde(default)]
    error: Option<Value>,
}

#[async_trait]
impl ChainMetadataSource for ThirdwebMetadataSource {
    async fn chain_metadata(&self, chain_id: u64) -> Result<ChainMetadata, MetadataError> {
        let url = format!("{}/v1/chains/{chain_id}", self.endpoint);

        let mut request = self.http.get(&url);
        if let Some(client_id) = &self.client_id {
            request = request.header("x-client-id", client_id);
        }

        let response = request.send().await.map_err(|err| MetadataError::Transport {
            chain_id,
            message: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(chain_id, status = status.as_u16(), "chain registry rejected lookup");
            return Err(MetadataError::Status {
                chain_id,
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(|err| MetadataError::Transport {
            chain_id,
            message: err.to_string(),
        })?;

        let envelope: ChainEnvelope =
            serde_json::from_str(&text).map_err(|err| MetadataError::Malformed(err.to_string()))?;

        if let Some(error) = envelope.error {
            let message = match error {
                Value::String(message) => message,
                other => other.to_string(),
            };
            return Err(MetadataError::Registry(message));
        }

        envelope.data.ok_or(MetadataError::NotFound(chain_id))
    }
}
