use std::sync::Once;
use tracing_forest::ForestLayer;
use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

static INIT: Once = Once::new();

/// Installs the global tracing subscriber once per process.
///
/// The filter defaults to `info` and follows `RUST_LOG` when it is set.
pub fn setup_logger() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        if let Err(err) = Registry::default()
            .with(env_filter)
            .with(ForestLayer::default())
            .try_init()
        {
            tracing::debug!("logger already installed: {}", err);
        }
    });
}
