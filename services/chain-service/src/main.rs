mod chains;
mod config;
mod wallets;

use axum::{
    Json, Router,
    http::{Method, StatusCode},
    routing::{get, post},
};
use cr_chain_client::ChainMetadataSource;
use cr_chain_registry::{ChainCache, ChainRegistry};
use cr_chain_thirdweb::ThirdwebMetadataSource;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::{ServiceConfig, load_chain_inputs};

#[derive(Debug, Serialize)]
struct HealthResponse {
    service: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct VersionResponse {
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    error: String,
}

pub(crate) type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub(crate) struct AppState {
    pub(crate) registry: ChainRegistry<Arc<dyn ChainMetadataSource>>,
    pub(crate) client_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServiceConfig::from_env()?;

    let source: Arc<dyn ChainMetadataSource> = Arc::new(ThirdwebMetadataSource::new(
        config.api_url.clone(),
        config.client_id.clone(),
    ));
    let registry = ChainRegistry::with_cache(
        source,
        Arc::new(ChainCache::with_rpc_domain(config.rpc_domain.clone())),
    );

    if let Some(path) = &config.chains_file {
        let chains = chains::chains_to_cache(&registry, load_chain_inputs(path)?);
        info!(count = chains.len(), path = %path.display(), "preloaded chains");
        registry.cache_chains(chains);
    }

    let state = Arc::new(AppState {
        registry,
        client_id: config.client_id.clone(),
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);
    let app = router(state).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("chain-service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
        .route("/chains", post(chains::cache_chains))
        .route("/chains/define", post(chains::define_chain))
        .route("/chains/{chain_id}", get(chains::get_chain))
        .route("/chains/{chain_id}/symbol", get(chains::chain_symbol))
        .route("/chains/{chain_id}/decimals", get(chains::chain_decimals))
        .route(
            "/chains/{chain_id}/native-currency-name",
            get(chains::chain_native_currency_name),
        )
        .route("/chains/{chain_id}/rpc-url", get(chains::rpc_url))
        .route("/wallets/{wallet_id}", get(wallets::wallet))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "chain-service",
        status: "ok",
    })
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        service: "chain-service",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub(crate) fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
}

pub(crate) fn not_found(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
}
