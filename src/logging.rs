//! Tracing setup for the binary
//!
//! The library only emits events; installing a subscriber is left to the
//! caller. `RUST_LOG` wins over the configured filter, which wins over the
//! default `envelope_ledger=info`. Verbose mode adds a debug directive for
//! this crate on top of whichever filter is chosen.

use std::sync::Once;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter used when neither `RUST_LOG` nor a configured filter is set
pub const DEFAULT_DIRECTIVE: &str = "envelope_ledger=info";

const VERBOSE_DIRECTIVE: &str = "envelope_ledger=debug";

/// Install the global subscriber, writing to stderr. Later calls are no-ops.
pub fn init_tracing(verbose: bool, configured: Option<&str>) {
    TRACING_INIT.call_once(|| {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = build_filter(env.as_deref(), configured, verbose);

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Pick and build the filter from the environment value, the configured
/// value and the verbose flag
pub fn build_filter(env: Option<&str>, configured: Option<&str>, verbose: bool) -> EnvFilter {
    let spec = [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE);

    let filter = EnvFilter::try_new(spec).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    match (verbose, VERBOSE_DIRECTIVE.parse::<Directive>()) {
        (true, Ok(directive)) => filter.add_directive(directive),
        _ => filter,
    }
}
