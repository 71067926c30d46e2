use clap::Parser;
use symptom_triage_server::server::{init_logging, run};
use symptom_triage_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(config.verbose);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        model_path = %config.model_path.display(),
        "Starting symptom triage server"
    );

    run(config).await
}
