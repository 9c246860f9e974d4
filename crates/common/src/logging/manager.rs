//! Logging initialization.

use tracing::*;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::types::LoggerConfig;

/// Initializes the logging subsystem with the provided config.
///
/// The default level is INFO; `RUST_LOG` overrides it. Must be called at most
/// once per process.
pub fn init(config: LoggerConfig) {
    let filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let stdout_sub = if config.stdout_config.json_format {
        layer().json().with_filter(filt.clone()).boxed()
    } else {
        layer().compact().with_filter(filt.clone()).boxed()
    };

    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = rolling::daily(&file_config.directory, &file_config.file_name_prefix);

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(filt.clone())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(filt.clone())
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .init();

    info!(service_name = %config.service_name, "logging initialized");
}
