mod file_config;

pub use file_config::FileConfig;

use crate::dashboard::HandlerSettings;
use crate::dashboard_store::{parse_database_url, StoreError};
use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub database_url: Option<String>,
    pub bind_address: String,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub expose_internal_errors: bool,
    pub enforce_payout_balance: bool,
    pub bootstrap_schema: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` is allowed: requests then fail with a configuration error.
    pub database_url: Option<String>,
    pub bind_address: String,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub expose_internal_errors: bool,
    pub enforce_payout_balance: bool,
    pub bootstrap_schema: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let database_url = file
            .database_url
            .or_else(|| cli.database_url.clone())
            .filter(|url| !url.trim().is_empty());

        if let Some(url) = &database_url {
            if let Err(err @ StoreError::UnsupportedScheme(_)) = parse_database_url(url) {
                bail!("Invalid database_url: {}", err);
            }
        }

        let bind_address = file
            .bind_address
            .unwrap_or_else(|| cli.bind_address.clone());
        if bind_address.trim().is_empty() {
            bail!("bind_address must not be empty");
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port == metrics_port {
            bail!(
                "port and metrics_port must be different (both set to {})",
                port
            );
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let expose_internal_errors = file
            .expose_internal_errors
            .unwrap_or(cli.expose_internal_errors);
        let enforce_payout_balance = file
            .enforce_payout_balance
            .unwrap_or(cli.enforce_payout_balance);
        let bootstrap_schema = file.bootstrap_schema.unwrap_or(cli.bootstrap_schema);

        Ok(Self {
            database_url,
            bind_address,
            port,
            metrics_port,
            logging_level,
            expose_internal_errors,
            enforce_payout_balance,
            bootstrap_schema,
        })
    }

    pub fn handler_settings(&self) -> HandlerSettings {
        HandlerSettings {
            expose_internal_errors: self.expose_internal_errors,
            enforce_payout_balance: self.enforce_payout_balance,
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            bind_address: self.bind_address.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
