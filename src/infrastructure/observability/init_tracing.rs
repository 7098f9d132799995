use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::TracingConfig;

const DEFAULT_FILTER: &str = "info,brevik=debug,tower_http=debug";

/// Installs the global subscriber. `RUST_LOG` overrides the default
/// filter; `LOG_FORMAT=json` switches to line-oriented JSON output.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (json_layer, plain_layer) = if config.json_format {
        (
            Some(fmt::layer().json().with_file(true).with_line_number(true)),
            None,
        )
    } else {
        (None, Some(fmt::layer().with_target(true)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(plain_layer)
        .init();

    tracing::info!(
        port,
        environment = %config.environment,
        json = config.json_format,
        "Telemetry initialized"
    );
}
