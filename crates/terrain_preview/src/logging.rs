//! Console logging setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins when set; otherwise
/// `info`, or `debug` for the terrain crates when `verbose`.
pub fn init_logging(verbose: bool) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("info,terrain_plugin=debug,terrain_preview=debug")
    } else {
      EnvFilter::new("info")
    }
  });

  tracing_subscriber::registry()
    .with(env_filter)
    .with(
      fmt::layer()
        .with_target(true)
        .with_thread_names(true),
    )
    .init();
}
