// ── Core error types ──
//
// Discovery and metrics failures. Protocol and transport errors from
// `daikin-api` pass through unchanged so callers can still match on them.

use std::io;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Discovery errors ─────────────────────────────────────────────
    /// A named interface filter matched no usable address.
    #[error("no usable broadcast interface named {name:?}")]
    NoSuchInterface { name: String },

    /// Interface enumeration or socket setup failed. Fatal to discovery.
    #[error("network error while {context}: {source}")]
    Network {
        context: String,
        #[source]
        source: io::Error,
    },

    // ── Metrics errors ───────────────────────────────────────────────
    #[error("metrics error: {0}")]
    Metrics(String),

    // ── API errors (passed through) ──────────────────────────────────
    #[error(transparent)]
    Api(#[from] daikin_api::Error),
}

impl CoreError {
    pub(crate) fn network(context: impl Into<String>, source: io::Error) -> Self {
        Self::Network {
            context: context.into(),
            source,
        }
    }
}

impl From<prometheus::Error> for CoreError {
    fn from(err: prometheus::Error) -> Self {
        Self::Metrics(err.to_string())
    }
}
