use std::{fs, path::Path};

use anyhow::Context;
use chrono::Utc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::DiagnosticsConfig;

pub struct TelemetryGuard {
    pub session_id: Uuid,
    _file_guard: WorkerGuard,
}

pub fn init_tracing_with_config(config: &DiagnosticsConfig) -> anyhow::Result<TelemetryGuard> {
    init_tracing_with_options(
        &config.logs_dir,
        &config.trace_file_prefix,
        &config.rust_log_filter,
    )
}

pub fn init_tracing_with_options(
    log_dir: impl AsRef<Path>,
    file_prefix: &str,
    default_filter: &str,
) -> anyhow::Result<TelemetryGuard> {
    let log_dir = log_dir.as_ref();
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory: {}", log_dir.display()))?;

    let session_id = Uuid::new_v4();
    let timestamp = Utc::now().format("%Y%m%d-%H%M%S");
    let file_name = format!("{file_prefix}-{timestamp}.log");
    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(file_writer);

    if let Err(error) = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        warn!(?error, "global tracing subscriber already initialized");
    } else {
        info!(%session_id, log_dir = %log_dir.display(), "tracing initialized");
    }

    Ok(TelemetryGuard {
        session_id,
        _file_guard: file_guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_log_directory_is_created() {
        let temp = tempfile::tempdir().expect("tempdir should be creatable");
        let config = DiagnosticsConfig {
            logs_dir: temp.path().join("nested").join("logs"),
            ..DiagnosticsConfig::default()
        };
        let guard = init_tracing_with_config(&config).expect("tracing should initialize");
        assert!(config.logs_dir.is_dir());
        assert!(!guard.session_id.is_nil());
    }
}
