//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors should use `auth::AuthError`.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use auth::store::SessionStore;
use auth::{AuthConfig, InMemorySessionStore, StaticCredentialVerifier, session_router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let addr: SocketAddr = env_or("BIND_ADDR", DEFAULT_BIND_ADDR.parse()?)?;

    let session_store = Arc::new(InMemorySessionStore::new(config.session_ttl)?);
    let verifier = Arc::new(StaticCredentialVerifier::demo());

    tracing::info!(
        ttl_ms = config.session_ttl_ms(),
        cookie_secure = config.cookie_secure,
        "Session store ready"
    );

    if let Some(period) = config.sweep_interval {
        spawn_sweeper(session_store.clone(), period);
    }

    // Build router
    let app = session_router(session_store, verifier, config).layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Session configuration: build profile defaults, then environment overrides
fn load_config() -> anyhow::Result<AuthConfig> {
    let mut config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    if let Some(secs) = env_opt::<u64>("SESSION_TTL_SECS")? {
        config.session_ttl = Duration::from_secs(secs);
    }
    if let Some(secure) = env_opt::<bool>("COOKIE_SECURE")? {
        config.cookie_secure = secure;
    }
    if let Some(secs) = env_opt::<u64>("SESSION_SWEEP_INTERVAL_SECS")? {
        // 0 disables the sweeper
        config.sweep_interval = (secs > 0).then(|| Duration::from_secs(secs));
    }

    Ok(config)
}

fn env_opt<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse()
                .with_context(|| format!("{key} has an invalid value: {raw:?}"))?;
            Ok(Some(value))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{key} is not valid unicode")),
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(env_opt(key)?.unwrap_or(default))
}

/// Periodically drop expired sessions that nobody has presented again
fn spawn_sweeper(store: Arc<InMemorySessionStore>, period: Duration) {
    tracing::info!(period_secs = period.as_secs(), "Session sweeper enabled");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                tracing::info!(sessions_deleted = purged, "Expired session cleanup completed");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
