use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use service::transfers::repo::{InMemoryTransferRepository, MongoTransferRepository};
use service::transfers::{TransferRepository, TransferService};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Acquire the storage handle once; it is shared read-only by every request.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let repo: Arc<dyn TransferRepository> = match cfg.storage.backend {
        StorageBackend::Mongodb => Arc::new(MongoTransferRepository::connect(&cfg.mongodb).await?),
        StorageBackend::Memory => {
            warn!("using in-memory storage; records are lost on restart");
            Arc::new(InMemoryTransferRepository::new())
        }
    };
    let transfers = Arc::new(TransferService::new(repo, cfg.business.clone()));
    Ok(ServerState { transfers })
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server until a shutdown signal.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    info!(
        host = %cfg.server.host,
        port = cfg.server.port,
        storage = ?cfg.storage.backend,
        mongodb = %cfg.mongodb.redacted_uri(),
        database = %cfg.mongodb.database,
        collection = %cfg.mongodb.collection,
        transfer_min_amount = cfg.business.transfer_min_amount,
        "config loaded"
    );

    let state = build_state(&cfg).await?;
    info!("services created");
    let app = build_app(state);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| StartupError::Any(anyhow::anyhow!("cannot bind {addr}: {e}")))?;
    info!(%addr, version = env!("CARGO_PKG_VERSION"), "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_builds_without_network() {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Memory;
        assert!(build_state(&cfg).await.is_ok());
    }

    #[test]
    fn bad_host_is_invalid_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
