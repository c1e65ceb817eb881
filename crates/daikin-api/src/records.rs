// ── Device records ──
//
// Each record groups the fields of one adapter endpoint and knows how to
// populate itself from a parsed reply. Population is fail-fast: the first
// field that does not decode aborts it, leaving earlier fields updated.
// Callers should replace the whole record on error.

use std::fmt;

use serde::Serialize;

use crate::error::Error;
use crate::response::{FieldMap, check_ret};
use crate::wire::{
    Fan, FanDir, Humidity, KWattHours, Mode, Name, Power, Temperature, Text, Version, WireValue,
};

/// Number of hourly readings in a day's power history.
pub const HOURS_PER_DAY: usize = 24;

/// Decode `token` into `slot`, keeping the field name bound at construction.
fn decode_into<T: WireValue>(slot: &mut T, key: &str, token: &str) -> Result<(), Error> {
    *slot = T::decode(key, token)?;
    Ok(())
}

// ── Basic info ──────────────────────────────────────────────────────

/// Identity of the adapter (`/common/basic_info`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicInfo {
    pub name: Name,
    pub version: Version,
    pub revision: Text,
    #[serde(rename = "type")]
    pub kind: Text,
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self {
            name: Name::absent("name"),
            version: Version::absent("ver"),
            revision: Text::absent("rev"),
            kind: Text::absent("type"),
        }
    }
}

impl BasicInfo {
    pub fn populate(&mut self, fields: &FieldMap) -> Result<(), Error> {
        check_ret(fields)?;
        for (key, value) in fields {
            match key.as_str() {
                "name" => decode_into(&mut self.name, key, value)?,
                "ver" => decode_into(&mut self.version, key, value)?,
                "rev" => decode_into(&mut self.revision, key, value)?,
                "type" => decode_into(&mut self.kind, key, value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl fmt::Display for BasicInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f, "Firmware Version: {}", self.version)?;
        write!(f, "Revision: {}", self.revision)
    }
}

// ── Control info ────────────────────────────────────────────────────

/// Current control settings (`/aircon/get_control_info`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlInfo {
    pub power: Power,
    pub mode: Mode,
    pub fan: Fan,
    pub fan_dir: FanDir,
    pub temperature: Temperature,
    pub humidity: Humidity,
}

impl Default for ControlInfo {
    fn default() -> Self {
        Self {
            power: Power::default(),
            mode: Mode::default(),
            fan: Fan::default(),
            fan_dir: FanDir::default(),
            temperature: Temperature::absent("stemp"),
            humidity: Humidity::absent("shum"),
        }
    }
}

impl ControlInfo {
    pub fn populate(&mut self, fields: &FieldMap) -> Result<(), Error> {
        check_ret(fields)?;
        for (key, value) in fields {
            match key.as_str() {
                "pow" => decode_into(&mut self.power, key, value)?,
                "mode" => decode_into(&mut self.mode, key, value)?,
                "f_rate" => decode_into(&mut self.fan, key, value)?,
                "f_dir" => decode_into(&mut self.fan_dir, key, value)?,
                "stemp" => decode_into(&mut self.temperature, key, value)?,
                "shum" => decode_into(&mut self.humidity, key, value)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Serialize the settings for `/aircon/set_control_info`.
    pub fn query_string(&self) -> String {
        [
            self.power.query_pair(),
            self.mode.query_pair(),
            self.fan.query_pair(),
            self.fan_dir.query_pair(),
            self.temperature.query_pair(),
            self.humidity.query_pair(),
        ]
        .join("&")
    }
}

impl fmt::Display for ControlInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Power: {}", self.power)?;
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "Set temperature: {}", self.temperature)?;
        writeln!(f, "Set humidity: {}", self.humidity)?;
        writeln!(f, "Fan speed: {}", self.fan)?;
        write!(f, "Fan louvre: {}", self.fan_dir)
    }
}

// ── Sensor info ─────────────────────────────────────────────────────

/// Current sensor readings (`/aircon/get_sensor_info`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorInfo {
    pub home_temperature: Temperature,
    pub outside_temperature: Temperature,
    pub humidity: Humidity,
}

impl Default for SensorInfo {
    fn default() -> Self {
        Self {
            home_temperature: Temperature::absent("htemp"),
            outside_temperature: Temperature::absent("otemp"),
            humidity: Humidity::absent("hhum"),
        }
    }
}

impl SensorInfo {
    pub fn populate(&mut self, fields: &FieldMap) -> Result<(), Error> {
        check_ret(fields)?;
        for (key, value) in fields {
            match key.as_str() {
                "htemp" => decode_into(&mut self.home_temperature, key, value)?,
                "otemp" => decode_into(&mut self.outside_temperature, key, value)?,
                "hhum" => decode_into(&mut self.humidity, key, value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl fmt::Display for SensorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inside temperature: {}", self.home_temperature)?;
        writeln!(f, "Inside humidity: {}", self.humidity)?;
        write!(f, "Outside temperature: {}", self.outside_temperature)
    }
}

// ── Power info ──────────────────────────────────────────────────────

/// Today's energy use (`/aircon/get_day_power_ex`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerInfo {
    pub day_heat: KWattHours,
    pub day_cool: KWattHours,
}

impl Default for PowerInfo {
    fn default() -> Self {
        Self {
            day_heat: KWattHours::absent("curr_day_heat"),
            day_cool: KWattHours::absent("curr_day_cool"),
        }
    }
}

impl PowerInfo {
    pub fn populate(&mut self, fields: &FieldMap) -> Result<(), Error> {
        check_ret(fields)?;
        for (key, value) in fields {
            match key.as_str() {
                "curr_day_heat" => self.day_heat = day_total(key, value)?,
                "curr_day_cool" => self.day_cool = day_total(key, value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Sum a `/`-joined list of 24 hourly readings in 0.1 kWh units.
fn day_total(key: &str, value: &str) -> Result<KWattHours, Error> {
    let hours: Vec<&str> = value.split('/').collect();
    if hours.len() != HOURS_PER_DAY {
        return Err(Error::malformed(
            key,
            value,
            format!(
                "expected {HOURS_PER_DAY} hourly readings, got {}",
                hours.len()
            ),
        ));
    }

    let mut tenths: i64 = 0;
    for (hour, reading) in hours.iter().enumerate() {
        let n: i64 = reading
            .parse()
            .map_err(|e| Error::malformed(key, value, format!("hour {hour}: {reading:?}: {e}")))?;
        tenths = tenths
            .checked_add(n)
            .ok_or_else(|| Error::malformed(key, value, format!("hour {hour}: total overflows")))?;
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    let kwh = tenths as f64 / 10.0;
    KWattHours::decode(key, &format!("{kwh:.1}"))
}

impl fmt::Display for PowerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Power consumption cooling: {} kWh", self.day_cool)?;
        write!(f, "Power consumption heating: {} kWh", self.day_heat)
    }
}
