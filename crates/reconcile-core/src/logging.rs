//! Tracing setup for processes that embed the reconciler
//!
//! The library only emits `tracing` events. An orchestrator calls [`init`]
//! once at startup to print them; test binaries call [`init_for_tests`] so
//! output is captured per test.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "reconcile_core=info,reconcile_fs=info";

/// Directives used by [`init_for_tests`] when `RUST_LOG` is unset.
pub const TEST_DIRECTIVES: &str = "reconcile_core=debug,reconcile_fs=debug";

/// Filter from `RUST_LOG`, falling back to `default_directives`.
///
/// An unset or unparsable `RUST_LOG` yields the fallback; an invalid
/// fallback is an error.
pub fn env_filter(default_directives: &str) -> Result<EnvFilter, ParseError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_directives),
    }
}

/// Install a compact stderr subscriber filtered by [`env_filter`] with
/// [`DEFAULT_DIRECTIVES`].
///
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVES)?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Install a subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call in a process installs.
pub fn init_for_tests() {
    let Ok(filter) = env_filter(TEST_DIRECTIVES) else {
        return;
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer().compact())
        .try_init();
}
