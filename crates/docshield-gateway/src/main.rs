//! docshield gateway
//!
//! - Document API under /v1 (users, files, modules, repositories, analyses)
//! - Router-wide CSRF layer, per-handler capability gates
//! - Every document redacted for the caller before it leaves the process

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use docshield_core::error::DocShieldError;
use docshield_gateway::{app_state, config, router};

const DEFAULT_CONFIG: &str = "docshield.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("DOCSHIELD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.gateway.listen.parse().map_err(|e| {
        DocShieldError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
    })?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "docshield-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
