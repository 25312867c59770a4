use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use slotwarden_core::WardenConfig;
use slotwarden_store::RestStore;

mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotwarden_gateway=info,tower_http=debug".into()),
        )
        .init();

    // load config: explicit path > SLOTWARDEN_CONFIG env > ./slotwarden.toml
    let config_path = std::env::var("SLOTWARDEN_CONFIG").ok();
    let config = WardenConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        WardenConfig::default()
    });

    if config.store.url.is_empty() {
        anyhow::bail!("store URL is not configured — set SLOTWARDEN_STORE_URL or [store] url");
    }
    if config.proxy.secret.is_empty() {
        tracing::warn!("proxy secret is empty — /getData and /setData will reject every request");
    }

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    let store = RestStore::new(&config.store)?;
    let state = Arc::new(app::AppState::new(config, Arc::new(store)));
    let router = app::build_router(state);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("slotwarden gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
