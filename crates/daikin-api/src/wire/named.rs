// ── Named wire values ──
//
// One generic wrapper for every "value + field name" pair the adapter
// reports. The field name is bound once, at construction or decode, and
// `encode` always emits that name: `Temperature` is reused for `htemp`,
// `otemp` and `stemp`.

use std::fmt;
use std::marker::PhantomData;

use serde::{Serialize, Serializer};

use super::{NOT_AVAILABLE, SENTINEL_VALUE, WireValue, is_sentinel};
use crate::error::Error;

/// Parsing and rendering rules for one family of named values.
pub trait WireKind {
    type Value: Clone + fmt::Debug + PartialEq + Serialize;

    /// Parse a raw token. Sentinel substitution happens here.
    fn parse(param: &str, token: &str) -> Result<Self::Value, Error>;

    /// Render the wire token.
    fn encode(value: &Self::Value) -> String;

    /// Render the human string.
    fn display(value: &Self::Value) -> String;

    fn project(value: &Self::Value) -> f64;

    /// Value held before the field has been reported.
    fn absent() -> Self::Value;
}

/// A domain value bound to its wire field name.
#[derive(Debug, Clone, PartialEq)]
pub struct Named<K: WireKind> {
    value: K::Value,
    param: String,
    kind: PhantomData<K>,
}

impl<K: WireKind> Named<K> {
    pub fn new(param: impl Into<String>, value: K::Value) -> Self {
        Self {
            value,
            param: param.into(),
            kind: PhantomData,
        }
    }

    /// A value for `param` that the device has not reported yet.
    pub fn absent(param: impl Into<String>) -> Self {
        Self::new(param, K::absent())
    }

    pub fn value(&self) -> &K::Value {
        &self.value
    }

    pub fn is_absent(&self) -> bool {
        self.value == K::absent()
    }
}

impl<K: WireKind> WireValue for Named<K> {
    fn decode(param: &str, token: &str) -> Result<Self, Error> {
        Ok(Self::new(param, K::parse(param, token)?))
    }

    fn param(&self) -> &str {
        &self.param
    }

    fn encode(&self) -> String {
        K::encode(&self.value)
    }

    fn as_f64(&self) -> f64 {
        K::project(&self.value)
    }
}

impl<K: WireKind> fmt::Display for Named<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&K::display(&self.value))
    }
}

impl<K: WireKind> Serialize for Named<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

// ── Numeric kinds ───────────────────────────────────────────────────

fn absent_f64() -> f64 {
    f64::from(SENTINEL_VALUE)
}

fn is_absent_f64(value: f64) -> bool {
    (value - absent_f64()).abs() < f64::EPSILON
}

fn parse_f64(param: &str, token: &str) -> Result<f64, Error> {
    if is_sentinel(token) {
        return Ok(absent_f64());
    }
    token
        .parse::<f64>()
        .map_err(|e| Error::malformed(param, token, e))
}

fn display_f64(value: f64) -> String {
    if is_absent_f64(value) {
        NOT_AVAILABLE.to_owned()
    } else {
        format!("{value:.1}")
    }
}

/// Degrees Celsius. `--` means no reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius;

impl WireKind for Celsius {
    type Value = f64;

    fn parse(param: &str, token: &str) -> Result<f64, Error> {
        parse_f64(param, token)
    }

    fn encode(value: &f64) -> String {
        display_f64(*value)
    }

    fn display(value: &f64) -> String {
        display_f64(*value)
    }

    fn project(value: &f64) -> f64 {
        *value
    }

    fn absent() -> f64 {
        absent_f64()
    }
}

/// Integer relative humidity in percent. `-` or `--` means no reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeHumidity;

impl WireKind for RelativeHumidity {
    type Value = i32;

    fn parse(param: &str, token: &str) -> Result<i32, Error> {
        if is_sentinel(token) {
            return Ok(SENTINEL_VALUE);
        }
        token
            .parse::<i32>()
            .map_err(|e| Error::malformed(param, token, e))
    }

    fn encode(value: &i32) -> String {
        Self::display(value)
    }

    fn display(value: &i32) -> String {
        if *value == SENTINEL_VALUE {
            NOT_AVAILABLE.to_owned()
        } else {
            value.to_string()
        }
    }

    fn project(value: &i32) -> f64 {
        f64::from(*value)
    }

    fn absent() -> i32 {
        SENTINEL_VALUE
    }
}

/// Accumulated energy in kWh. `-` means no reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyKwh;

impl WireKind for EnergyKwh {
    type Value = f64;

    fn parse(param: &str, token: &str) -> Result<f64, Error> {
        parse_f64(param, token)
    }

    fn encode(value: &f64) -> String {
        display_f64(*value)
    }

    fn display(value: &f64) -> String {
        display_f64(*value)
    }

    fn project(value: &f64) -> f64 {
        *value
    }

    fn absent() -> f64 {
        absent_f64()
    }
}

// ── Text kinds ──────────────────────────────────────────────────────
//
// Text has no meaningful numeric projection; it projects to NaN.

/// Percent-encoded on the wire, plain text in memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UrlEscaped;

impl WireKind for UrlEscaped {
    type Value = String;

    fn parse(param: &str, token: &str) -> Result<String, Error> {
        urlencoding::decode(token)
            .map(std::borrow::Cow::into_owned)
            .map_err(|e| Error::malformed(param, token, e))
    }

    fn encode(value: &String) -> String {
        urlencoding::encode(value).into_owned()
    }

    fn display(value: &String) -> String {
        value.clone()
    }

    fn project(_: &String) -> f64 {
        f64::NAN
    }

    fn absent() -> String {
        String::new()
    }
}

/// Firmware version: the adapter separates components with `_`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firmware;

impl WireKind for Firmware {
    type Value = String;

    fn parse(_: &str, token: &str) -> Result<String, Error> {
        Ok(token.replace('_', "."))
    }

    fn encode(value: &String) -> String {
        value.clone()
    }

    fn display(value: &String) -> String {
        value.clone()
    }

    fn project(_: &String) -> f64 {
        f64::NAN
    }

    fn absent() -> String {
        String::new()
    }
}

/// Free-form text, stored as received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verbatim;

impl WireKind for Verbatim {
    type Value = String;

    fn parse(_: &str, token: &str) -> Result<String, Error> {
        Ok(token.to_owned())
    }

    fn encode(value: &String) -> String {
        value.clone()
    }

    fn display(value: &String) -> String {
        value.clone()
    }

    fn project(_: &String) -> f64 {
        f64::NAN
    }

    fn absent() -> String {
        String::new()
    }
}

pub type Temperature = Named<Celsius>;
pub type Humidity = Named<RelativeHumidity>;
pub type KWattHours = Named<EnergyKwh>;
pub type Name = Named<UrlEscaped>;
pub type Version = Named<Firmware>;
pub type Text = Named<Verbatim>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn temperature_keeps_its_field_name() {
        let home = Temperature::decode("htemp", "23.5").unwrap();
        let set = Temperature::decode("stemp", "21").unwrap();
        assert_eq!(home.query_pair(), "htemp=23.5");
        assert_eq!(set.query_pair(), "stemp=21.0");
    }

    #[test]
    fn temperature_display_rounds_to_one_decimal() {
        let t = Temperature::decode("otemp", "12.34").unwrap();
        assert_eq!(t.to_string(), "12.3");
        assert_eq!(t.as_f64(), 12.34);
    }

    #[test]
    fn sentinels_decode_to_not_available() {
        for token in ["--", "-"] {
            let t = Temperature::decode("htemp", token).unwrap();
            assert_eq!(t.to_string(), NOT_AVAILABLE);
            assert_eq!(t.as_f64(), -1.0);

            let h = Humidity::decode("hhum", token).unwrap();
            assert_eq!(h.to_string(), NOT_AVAILABLE);
            assert_eq!(h.as_f64(), -1.0);

            let e = KWattHours::decode("curr_day_cool", token).unwrap();
            assert_eq!(e.to_string(), NOT_AVAILABLE);
            assert_eq!(e.as_f64(), -1.0);
        }
    }

    #[test]
    fn sentinel_encodes_as_display_string() {
        let h = Humidity::decode("shum", "--").unwrap();
        assert_eq!(h.encode(), NOT_AVAILABLE);
        assert!(h.is_absent());
    }

    #[test]
    fn malformed_number_carries_field_and_token() {
        let err = Humidity::decode("hhum", "4x").unwrap_err();
        match err {
            Error::MalformedValue { field, value, .. } => {
                assert_eq!(field, "hhum");
                assert_eq!(value, "4x");
            }
            other => panic!("expected MalformedValue, got {other:?}"),
        }
    }

    #[test]
    fn humidity_round_trips() {
        let h = Humidity::decode("shum", "45").unwrap();
        assert_eq!(Humidity::decode("shum", &h.encode()).unwrap(), h);
    }

    #[test]
    fn name_is_percent_decoded_and_escaped() {
        let n = Name::decode("name", "%4c%69%76%69%6e%67%20%52%6f%6f%6d").unwrap();
        assert_eq!(n.to_string(), "Living Room");
        assert_eq!(n.query_pair(), "name=Living%20Room");
        assert_eq!(Name::decode("name", &n.encode()).unwrap(), n);
    }

    #[test]
    fn version_replaces_underscores() {
        let v = Version::decode("ver", "1_14_48").unwrap();
        assert_eq!(v.to_string(), "1.14.48");
        assert_eq!(v.param(), "ver");
    }

    #[test]
    fn absent_values_are_bound_to_their_field() {
        let t = Temperature::absent("otemp");
        assert_eq!(t.param(), "otemp");
        assert_eq!(t.to_string(), NOT_AVAILABLE);
        assert!(Text::absent("rev").to_string().is_empty());
    }

    #[test]
    fn serializes_as_the_bare_value() {
        let t = Temperature::decode("htemp", "22.0").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "22.0");
        let v = Version::decode("ver", "3_3_6").unwrap();
        assert_eq!(serde_json::to_string(&v).unwrap(), "\"3.3.6\"");
    }
}
