//! Tracing setup for the `gilt` binary.
//!
//! The subscriber is only initialised when `GILT_LOG` (or `RUST_LOG`) is
//! set. Output goes to stderr so it never mixes with the property tables
//! printed on stdout.
//!
//! ```bash
//! GILT_LOG=debug gilt run decls.json
//! GILT_LOG=gilt_engine::decorate=trace GILT_LOG_FORMAT=json gilt run decls.json
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    /// Flat text lines (default)
    Text,
    /// Newline-delimited JSON objects
    Json,
}

impl LogFormat {
    /// Parse from `GILT_LOG_FORMAT`
    fn from_env() -> Self {
        match std::env::var("GILT_LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Build an `EnvFilter` from `GILT_LOG`, falling back to `RUST_LOG`
fn build_filter() -> EnvFilter {
    match std::env::var("GILT_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Initialise the global tracing subscriber, if requested
pub fn init_tracing() {
    if std::env::var_os("GILT_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
