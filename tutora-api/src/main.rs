use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tutora_api::{app, state::{AppState, AuthConfig}};
use tutora_core::RemoteConfigStore;
use tutora_store::{FileConfigCache, PricingConfigRepository, RedisClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tutora_api=debug,tutora_store=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = tutora_store::app_config::Config::load().context("Failed to load config")?;
    tracing::info!("Starting Tutora pricing API on port {}", config.server.port);

    // Redis is optional; without it the local cache is the only store.
    let remote: Option<Arc<dyn RemoteConfigStore>> = match &config.redis.url {
        Some(url) => {
            let client = RedisClient::new(url, config.redis.document_key.clone())
                .await
                .context("Failed to create Redis client")?;
            Some(Arc::new(client) as Arc<dyn RemoteConfigStore>)
        }
        None => {
            tracing::warn!("No redis.url configured, pricing config is node-local");
            None
        }
    };
    let cache = Arc::new(FileConfigCache::new(config.cache.path.clone()));

    let app_state = AppState {
        pricing: PricingConfigRepository::new(remote, cache),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.context("Failed to bind")?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
