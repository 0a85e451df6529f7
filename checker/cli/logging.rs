//! Opt-in tracing output for debugging a run.
//!
//! `SCHEMAFIELD_LOG` (falling back to `RUST_LOG`) takes an `EnvFilter`
//! directive such as `debug` or `checker__driver=debug`. Setting
//! `SCHEMAFIELD_LOG_FORMAT=json` switches from text lines to one JSON object
//! per event. Output always goes to stderr.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VARIABLE: &str = "SCHEMAFIELD_LOG";
const LOG_FORMAT_VARIABLE: &str = "SCHEMAFIELD_LOG_FORMAT";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var(LOG_FORMAT_VARIABLE)
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Installs the global subscriber. Does nothing unless `SCHEMAFIELD_LOG` or
/// `RUST_LOG` is set.
pub(crate) fn init_tracing() {
    let filter = match std::env::var(LOG_VARIABLE) {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };

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
