mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use shortly_core::Repository;
use shortly_gateway::{App, AppState};
use shortly_generator::RandomGenerator;
use shortly_storage::{InMemoryRepository, SqliteRepository};
use shortly_telemetry::{Environment, Telemetry};
use tracing::{debug, info};

use crate::cli::{StorageBackendArg, CLI};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    let environment = Environment::from(config.env);

    Telemetry::new(environment)
        .init()
        .context("failed to init logger")?;

    info!(
        env = %environment,
        version = env!("CARGO_PKG_VERSION"),
        "starting shortly"
    );
    debug!(?config, "loaded configuration");

    match config.storage {
        StorageBackendArg::Sqlite => {
            let repository = Arc::new(open_sqlite(&config.storage_path).await?);
            run_server(&config, repository.clone()).await?;
            repository.close().await;
        }
        StorageBackendArg::InMemory => {
            run_server(&config, Arc::new(InMemoryRepository::new())).await?;
        }
    }

    info!("server stopped");
    Ok(())
}

async fn open_sqlite(path: &Path) -> anyhow::Result<SqliteRepository> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    SqliteRepository::open(path)
        .await
        .context("failed to init storage")
}

async fn run_server(config: &CLI, repository: Arc<dyn Repository>) -> anyhow::Result<()> {
    let state = AppState::new(repository, Arc::new(RandomGenerator::default()));
    let router = App::router(state, config.timeout());

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(
        listen_addr = %listener.local_addr()?,
        storage_backend = %config.storage,
        "starting server"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
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
