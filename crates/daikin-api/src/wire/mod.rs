// ── Typed wire values ──
//
// Every field the adapter exchanges is a `key=value` token. The types in
// this module bind a field name to a validated domain value and convert
// in both directions: `decode` from the raw token, `encode` back to it.

mod control;
mod named;

use std::fmt;

pub use control::{Fan, FanDir, Mode, Power};
pub use named::{
    Celsius, EnergyKwh, Firmware, Humidity, KWattHours, Name, Named, RelativeHumidity,
    Temperature, Text, UrlEscaped, Verbatim, Version, WireKind,
};

use crate::error::Error;

/// Display string for a field the device reported as "no reading".
pub const NOT_AVAILABLE: &str = "N/A";

/// Numeric value a sentinel token decodes to.
pub(crate) const SENTINEL_VALUE: i32 = -1;

/// A domain value bound to a wire field name.
///
/// `Display` renders the human string; [`encode`](WireValue::encode)
/// renders the wire token.
pub trait WireValue: Sized + fmt::Display {
    /// Parse a raw wire token for the field `param`.
    fn decode(param: &str, token: &str) -> Result<Self, Error>;

    /// The wire field name this value is bound to.
    fn param(&self) -> &str;

    /// The wire token for this value.
    fn encode(&self) -> String;

    /// Numeric projection for metrics.
    fn as_f64(&self) -> f64;

    /// `param=token`, ready for a query string.
    fn query_pair(&self) -> String {
        format!("{}={}", self.param(), self.encode())
    }
}

/// Absent-reading tokens: `-`, `--`, or nothing at all.
pub(crate) fn is_sentinel(token: &str) -> bool {
    matches!(token, "" | "-" | "--")
}

/// Parse an integer wire code, reporting failures against `param`.
pub(crate) fn parse_code(param: &str, token: &str) -> Result<i32, Error> {
    token
        .parse::<i32>()
        .map_err(|e| Error::malformed(param, token, e))
}
