//! Tracing initialization.
//!
//! Log output goes to stdout through the `tracing-subscriber` fmt layer. Verbosity is
//! controlled with `RUST_LOG` using the usual `EnvFilter` directives, for example:
//!
//! ```bash
//! RUST_LOG=bookshelf=debug,tower_http=info,sqlx=warn
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "bookshelf=info,tower_http=info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    info!("Telemetry initialized");
    Ok(())
}
