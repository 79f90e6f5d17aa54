//! Shared logging configuration and initialization.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::dashboard::{API_PREFIX, DASHBOARD_PATH};

const SERVER_COMPONENT: &str = "dashboard_server";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            include_target: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingInitError {
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Reads `MATCHDAY_LOG_LEVEL`, `MATCHDAY_LOG_FORMAT` and `MATCHDAY_LOG_TARGET`.
pub fn logging_config_from_env() -> LoggingConfig {
    LoggingConfig::from_lookup(|key| env::var(key).ok())
}

impl LoggingConfig {
    /// Builds a config from any key lookup; blank or unrecognised values keep
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("MATCHDAY_LOG_LEVEL") {
            let trimmed = level.trim();
            if !trimmed.is_empty() {
                config.level = trimmed.to_string();
            }
        }

        let format = lookup("MATCHDAY_LOG_FORMAT");
        if let Some(format) = format.as_deref().and_then(parse_log_format) {
            config.format = format;
        }

        let target = lookup("MATCHDAY_LOG_TARGET");
        if let Some(include_target) = target.as_deref().and_then(parse_bool) {
            config.include_target = include_target;
        }

        config
    }
}

pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingInitError> {
    let env_filter =
        EnvFilter::try_new(config.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(config.include_target)
        .with_ansi(matches!(config.format, LogFormat::Pretty));

    match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.pretty().finish())?,
    }

    Ok(())
}

pub fn log_app_start(config: &LoggingConfig) {
    info!(
        component = SERVER_COMPONENT,
        event = "app.start",
        log_level = %config.level,
        log_format = ?config.format,
        include_target = config.include_target
    );
}

/// Announces the listening address with the HTML page and JSON API entry points.
pub fn log_app_bind(bound_addr: SocketAddr) {
    info!(
        component = SERVER_COMPONENT,
        event = "app.bind",
        bind_addr = %bound_addr,
        dashboard_url = %format!("http://{bound_addr}{DASHBOARD_PATH}"),
        api_url = %format!("http://{bound_addr}{API_PREFIX}")
    );
}

pub fn log_provider_selected(provider: &str, seed: Option<u64>, slowest_call_ms: u64) {
    match seed {
        Some(seed) => info!(
            component = SERVER_COMPONENT,
            event = "provider.selected",
            provider,
            seed,
            slowest_call_ms
        ),
        None => info!(
            component = SERVER_COMPONENT,
            event = "provider.selected",
            provider,
            seeded = false,
            slowest_call_ms
        ),
    }
}

fn parse_log_format(raw: &str) -> Option<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Some(LogFormat::Json),
        "pretty" => Some(LogFormat::Pretty),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
