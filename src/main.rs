use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use release_dashboard_server::config::{AppConfig, CliConfig, FileConfig};
use release_dashboard_server::server::{self, run_server, RequestsLoggingLevel};
use release_dashboard_server::{DashboardHandler, DashboardStore, SqliteDashboardStore};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Dashboard database: sqlite://<path>, sqlite:<path>, file:<uri> or a plain path.
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// The address to bind the HTTP listeners to.
    #[clap(long, default_value = "127.0.0.1")]
    pub bind_address: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Return the raw message of server errors in responses.
    #[clap(long)]
    pub expose_internal_errors: bool,

    /// Refuse payouts exceeding the available balance.
    #[clap(long)]
    pub enforce_payout_balance: bool,

    /// Create the dashboard tables if the database has none.
    #[clap(long)]
    pub bootstrap_schema: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            database_url: self.database_url.clone(),
            bind_address: self.bind_address.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            expose_internal_errors: self.expose_internal_errors,
            enforce_payout_balance: self.enforce_payout_balance,
            bootstrap_schema: self.bootstrap_schema,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize tracing")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    if let Some(path) = &cli_args.config {
        info!("Loaded config file {:?}", path);
    }
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Initializing metrics...");
    server::metrics::init_metrics();

    let store = SqliteDashboardStore::new(app_config.database_url.clone());
    match &app_config.database_url {
        Some(url) => info!("Using dashboard database {}", url),
        None => warn!("DATABASE_URL is not set, dashboard requests will fail"),
    }

    if app_config.bootstrap_schema && store.bootstrap_schema()? {
        info!("Dashboard schema created");
    }

    let store: Arc<dyn DashboardStore> = Arc::new(store);
    let handler = Arc::new(DashboardHandler::new(store, app_config.handler_settings()));

    run_server(app_config.server_config(), handler).await
}
