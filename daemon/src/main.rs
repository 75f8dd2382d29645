//! Verdict daemon: entry point for running the KYC service.

mod config;
mod shutdown;

use clap::Parser;
use config::ServerConfig;
use shutdown::ShutdownController;
use std::path::PathBuf;
use std::sync::Arc;
use verdict_api::{ApiServer, AppState, UploadStore};
use verdict_engine::{KycQueries, WorkflowEngine};
use verdict_store::{
    DocumentStore, IdentityStore, MemoryDocumentStore, MemoryIdentityStore,
};
use verdict_verifier::{MockVerifier, MockVerifierConfig};

#[derive(Parser)]
#[command(name = "verdict-daemon", about = "Verdict KYC service daemon")]
struct Cli {
    /// Port for the HTTP API.
    #[arg(long, env = "VERDICT_PORT")]
    port: Option<u16>,

    /// Directory for uploaded document payloads.
    #[arg(long, env = "VERDICT_UPLOAD_DIR")]
    upload_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "VERDICT_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "VERDICT_LOG_FORMAT")]
    log_format: String,

    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Manage the KYC service.
    #[command(name = "server")]
    Server {
        #[command(subcommand)]
        action: ServerAction,
    },
}

#[derive(clap::Subcommand)]
enum ServerAction {
    /// Run the service.
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    verdict_utils::init_tracing(&cli.log_level, cli.log_format == "json");

    let file_config: Option<ServerConfig> = if let Some(ref config_path) = cli.config {
        match ServerConfig::from_toml_file(config_path) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", config_path.display());
                Some(cfg)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load config file {}: {e}, using CLI defaults",
                    config_path.display()
                );
                None
            }
        }
    } else {
        None
    };

    let base = file_config.unwrap_or_default();
    let config = ServerConfig {
        port: cli.port.unwrap_or(base.port),
        upload_dir: cli.upload_dir.unwrap_or(base.upload_dir),
        ..base
    };

    match cli.command {
        Command::Server { action } => match action {
            ServerAction::Run => run(config).await,
        },
    }
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!(
        "Starting Verdict KYC service (port: {}, uploads: {}, verifier delay: {}-{}ms)",
        config.port,
        config.upload_dir.display(),
        config.verifier_min_delay_ms,
        config.verifier_max_delay_ms,
    );

    let identities: Arc<dyn IdentityStore> = Arc::new(MemoryIdentityStore::new());
    let documents: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let verifier = Arc::new(MockVerifier::new(MockVerifierConfig {
        min_delay_ms: config.verifier_min_delay_ms,
        max_delay_ms: config.verifier_max_delay_ms,
        marker: config.verifier_marker.clone(),
    }));
    let engine = Arc::new(WorkflowEngine::new(
        identities.clone(),
        documents.clone(),
        verifier,
    ));
    let queries = KycQueries::new(identities.clone(), documents);
    let uploads = Arc::new(UploadStore::open(&config.upload_dir)?);

    let state = AppState {
        identities,
        engine,
        queries,
        uploads,
    };

    let controller = Arc::new(ShutdownController::new());
    let receiver = controller.subscribe();
    {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.wait_for_signal().await });
    }

    ApiServer::new(config.port, state).start(receiver).await?;

    tracing::info!("Verdict daemon exited cleanly");
    Ok(())
}
