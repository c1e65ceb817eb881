use thiserror::Error;

/// Top-level error type for the `daikin-api` crate.
///
/// Covers every failure mode of the adapter's HTTP/CSV protocol: wire
/// value decoding, reply parsing, device-side rejection, and transport.
/// `daikin-core` wraps these unchanged.
#[derive(Debug, Error)]
pub enum Error {
    // ── Wire values ─────────────────────────────────────────────────
    /// A wire token does not parse as the field's underlying primitive.
    #[error("malformed value for {field}: {value:?} ({reason})")]
    MalformedValue {
        field: String,
        value: String,
        reason: String,
    },

    /// A wire token parsed, but is outside the field's closed set.
    #[error("unknown {field} value: {value:?}")]
    UnknownEnumValue { field: String, value: String },

    // ── Replies ─────────────────────────────────────────────────────
    /// The reply body is not exactly one line of `key=value` tokens.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// The device answered with `ret` other than `OK` (typically `PARAM NG`).
    #[error("device returned error ret={ret}")]
    DeviceRejected { ret: String },

    /// A write was attempted before the record it serializes was fetched.
    #[error("{record} has not been fetched from the device")]
    NotPopulated { record: &'static str },

    // ── Transport ───────────────────────────────────────────────────
    /// Non-success HTTP status from the adapter.
    #[error("HTTP {status} from {path}")]
    Http { status: u16, path: String },

    /// HTTP transport error (connection refused, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl Error {
    pub(crate) fn malformed(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedValue {
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unknown(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownEnumValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if the device itself refused the request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::DeviceRejected { .. })
    }

    /// Returns `true` if the failure came from decoding the device's data
    /// rather than from reaching it.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Self::MalformedValue { .. }
                | Self::UnknownEnumValue { .. }
                | Self::MalformedResponse { .. }
        )
    }

    /// Returns `true` if this is a transient transport error.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
