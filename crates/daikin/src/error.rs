//! CLI error types with miette diagnostics.
//!
//! Maps api, core and config errors into user-facing errors with
//! actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use daikin_config::ConfigError;
use daikin_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Discovery ────────────────────────────────────────────────────
    #[error("No aircon found")]
    #[diagnostic(
        code(daikin::no_devices),
        help(
            "Check that the aircon is powered and on the same network.\n\
             Try: daikin discover --poll-count 3, or pass --address"
        )
    )]
    NoDevices,

    #[error("Network interface '{name}' has no usable broadcast address")]
    #[diagnostic(
        code(daikin::no_such_interface),
        help("The interface must be up with broadcast and multicast enabled and carry an IPv4 address.")
    )]
    NoSuchInterface { name: String },

    #[error("Network error while {context}")]
    #[diagnostic(
        code(daikin::network),
        help("Discovery binds UDP port 30000; make sure no other discovery is running.")
    )]
    Network {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // ── Device ───────────────────────────────────────────────────────
    #[error("Aircon at {address} rejected the request (ret={ret})")]
    #[diagnostic(
        code(daikin::rejected),
        help("Check the requested temperature, mode and fan values for this unit.")
    )]
    Rejected { address: String, ret: String },

    #[error("Could not reach aircon at {address}")]
    #[diagnostic(
        code(daikin::unreachable),
        help("Check that {address} is the adapter's address and that it is online.")
    )]
    Unreachable {
        address: String,
        #[source]
        source: daikin_api::Error,
    },

    #[error("Request to {address} timed out")]
    #[diagnostic(code(daikin::timeout), help("Increase the timeout with --timeout."))]
    Timeout {
        address: String,
        #[source]
        source: daikin_api::Error,
    },

    #[error("Unexpected reply from aircon at {address}")]
    #[diagnostic(
        code(daikin::protocol),
        help("Inspect the raw reply with: daikin raw <endpoint> --address {address}")
    )]
    Protocol {
        address: String,
        #[source]
        source: daikin_api::Error,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(daikin::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(daikin::config),
        help("Fix the configuration file or the DAIKIN_* environment variables.")
    )]
    Config(#[from] ConfigError),

    // ── Output ───────────────────────────────────────────────────────
    #[error("Failed to render output: {0}")]
    #[diagnostic(code(daikin::output))]
    Render(String),

    #[error("Failed to render metrics: {0}")]
    #[diagnostic(code(daikin::metrics))]
    Metrics(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoDevices => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Network { .. } | Self::Unreachable { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NoSuchInterface { .. } | Self::Validation { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Attribute a device client error to `address`.
    pub fn device(address: &str, err: daikin_api::Error) -> Self {
        let address = address.to_owned();
        match err {
            daikin_api::Error::DeviceRejected { ret } => Self::Rejected { address, ret },
            daikin_api::Error::Transport(ref e) if e.is_timeout() => Self::Timeout {
                address,
                source: err,
            },
            daikin_api::Error::Transport(_) | daikin_api::Error::Http { .. } => {
                Self::Unreachable {
                    address,
                    source: err,
                }
            }
            _ => Self::Protocol {
                address,
                source: err,
            },
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoSuchInterface { name } => Self::NoSuchInterface { name },
            CoreError::Network { context, source } => Self::Network { context, source },
            CoreError::Metrics(message) => Self::Metrics(message),
            CoreError::Api(e) => Self::device("(unknown)", e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Render(err.to_string())
    }
}
