//! Logging initialization
//!
//! The library only emits `tracing` events. Binaries and tests call [`init`]
//! once to install a subscriber.

use std::sync::Once;

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output at debug level
    Development,
    /// Warnings and errors only
    Quiet,
    /// No output; a bare registry so spans still work
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` overrides the profile's filter.
/// Later calls are ignored.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("classenv=debug")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Quiet => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
