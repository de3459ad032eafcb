//! Installs a `tracing_subscriber` formatting layer, so the
//! `tracing::instrument` spans on the resolver and scan entry points
//! are written out, filtered by the environment.
//!
//! An example environment is shown:
//! ```bash
//! RUST_LOG=pk_tools=debug
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialises the tracer, using tracing subscription.
/// This is optional, not calling this function will simply
/// not log traces.
pub fn initialize_tracer() {
    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(fmt_layer)
        .init();
}
