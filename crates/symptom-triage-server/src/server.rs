//! Startup: logging, model initialization, serving and shutdown.

use std::sync::Arc;

use anyhow::Context;
use symptom_triage_core::{KnowledgeBase, ModelLifecycle, ModelStore, Predictor, RiskScorer};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::router::router;
use crate::state::AppState;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Load or train the model and wrap it in a predictor.
///
/// Training is CPU-bound, so it runs on the blocking pool.
pub async fn build_predictor(config: &ServerConfig) -> anyhow::Result<Predictor> {
    let training = config.training_config();
    let store = ModelStore::new(config.model_path.clone());
    let retrain = config.retrain;

    let (model, source) = tokio::task::spawn_blocking(move || {
        let kb = KnowledgeBase::builtin();
        ModelLifecycle::new(&kb, &training, &store).initialize(retrain)
    })
    .await
    .context("Model initialization task panicked")?
    .context("Failed to initialize model")?;

    tracing::info!(
        source = ?source,
        trees = model.n_trees(),
        vocabulary = model.vocabulary().len(),
        "Model ready"
    );

    Ok(Predictor::new(model, RiskScorer::default(), source))
}

/// Initialize the model, then serve until ctrl-c or SIGTERM.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    config.validate().context("Invalid configuration")?;

    let predictor = build_predictor(&config).await?;
    let state = AppState::new(Arc::new(predictor));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for ctrl-c");
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
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
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
    tracing::info!("Shutdown signal received");
}
