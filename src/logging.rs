//! Logging initialisation for the `jsonconfig` binary.
//!
//! Library code only emits `tracing` events; hosts embedding the loader
//! install their own subscriber.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::env::Env;

/// Default filter when neither `RUST_LOG` nor a flag is given.
pub const DEFAULT_FILTER: &str = "info";

/// Pick the filter: `RUST_LOG` wins, then `flag`, then [`DEFAULT_FILTER`].
pub fn build_filter(rust_log: Option<&str>, flag: Option<&str>) -> EnvFilter {
    let directives = rust_log
        .filter(|v| !v.trim().is_empty())
        .or(flag)
        .unwrap_or(DEFAULT_FILTER);
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// ANSI colors unless `NO_COLOR` is set.
pub fn use_ansi(env: &Env) -> bool {
    !env.is_set("NO_COLOR")
}

/// Install a stderr subscriber configured from `env`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(env: &Env, flag: Option<&str>) {
    let rust_log = env.get("RUST_LOG");
    let filter = build_filter(rust_log.as_deref(), flag);

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(use_ansi(env)),
        )
        .with(filter)
        .try_init();
}
