//! # Structured Logging Module
//!
//! Environment-aware structured logging for the Metecho maintenance tooling.
//! Console output is human readable in development and test, JSON in
//! production. `RUST_LOG` overrides the environment's default level.

use std::sync::OnceLock;
use chrono::Utc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::models::entity::EntityKind;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    init_structured_logging_with(None, None);
}

/// Initialize logging for `environment` (falling back to `METECHO_ENV`, then
/// `APP_ENV`), forcing `level` (e.g. from a `-v` flag) over the environment
/// default. `RUST_LOG` still wins when set.
pub fn init_structured_logging_with(environment: Option<&str>, level: Option<&str>) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let format = std::env::var("METECHO_LOG_FORMAT").ok();
        let settings = LoggingSettings::resolve(environment, level, format.as_deref());
        let filter = || {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
        };

        let console = if settings.json {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json()
                .with_filter(filter())
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_filter(filter())
                .boxed()
        };

        // Embedders may have installed a subscriber already
        if tracing_subscriber::registry().with(console).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %settings.environment,
            level = %settings.level,
            json = settings.json,
            "Structured logging initialized"
        );
    });
}

/// Console logging choices for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub environment: String,
    pub level: String,
    pub json: bool,
}

impl LoggingSettings {
    /// `environment` and `level` override their defaults; `format` is the value
    /// of `METECHO_LOG_FORMAT`, if any.
    pub fn resolve(environment: Option<&str>, level: Option<&str>, format: Option<&str>) -> Self {
        let environment = environment
            .map(str::to_string)
            .unwrap_or_else(get_environment);
        let level = level
            .map(str::to_string)
            .unwrap_or_else(|| get_log_level(&environment));
        let json = match format {
            Some(format) => format.eq_ignore_ascii_case("json"),
            None => environment == "production",
        };
        Self {
            environment,
            level,
            json,
        }
    }
}

/// Get current environment from environment variables
pub(crate) fn get_environment() -> String {
    std::env::var("METECHO_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "test" => "debug".to_string(),
        "development" => "debug".to_string(),
        "production" => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log structured data for one purged entity kind
pub fn log_purge_operation(
    entity: EntityKind,
    strategy: &str,
    status: &str,
    rows_removed: Option<u64>,
    duration_ms: u64,
) {
    tracing::info!(
        entity = %entity,
        table = entity.table_name(),
        strategy = %strategy,
        status = %status,
        rows_removed = rows_removed,
        duration_ms = duration_ms,
        timestamp = %Utc::now().to_rfc3339(),
        "PURGE_OPERATION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "ERROR"
    );
}
