// ── Closed-set control values ──
//
// Power, mode, fan rate and louvre direction. Each variant carries its
// wire code as the discriminant (or, for the fan, a fixed code string);
// display text is never used to recover the code.

use std::fmt;

use serde::Serialize;
use strum::EnumIter;

use super::{WireValue, parse_code};
use crate::error::Error;

/// Power state of the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumIter)]
pub enum Power {
    #[default]
    Off = 0,
    On = 1,
}

impl Power {
    pub const PARAM: &'static str = "pow";

    #[allow(clippy::as_conversions)]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl WireValue for Power {
    fn decode(param: &str, token: &str) -> Result<Self, Error> {
        match parse_code(param, token)? {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            _ => Err(Error::unknown(param, token)),
        }
    }

    fn param(&self) -> &str {
        Self::PARAM
    }

    fn encode(&self) -> String {
        self.code().to_string()
    }

    fn as_f64(&self) -> f64 {
        f64::from(self.code())
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "Off",
            Self::On => "On",
        })
    }
}

/// Operating mode. Codes 0, 1 and 7 are all reported as "Auto" but
/// remain distinct on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumIter)]
pub enum Mode {
    #[default]
    Auto = 0,
    Auto1 = 1,
    Dehumidify = 2,
    Cool = 3,
    Heat = 4,
    Fan = 6,
    Auto7 = 7,
}

impl Mode {
    pub const PARAM: &'static str = "mode";

    #[allow(clippy::as_conversions)]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl WireValue for Mode {
    fn decode(param: &str, token: &str) -> Result<Self, Error> {
        match parse_code(param, token)? {
            0 => Ok(Self::Auto),
            1 => Ok(Self::Auto1),
            2 => Ok(Self::Dehumidify),
            3 => Ok(Self::Cool),
            4 => Ok(Self::Heat),
            6 => Ok(Self::Fan),
            7 => Ok(Self::Auto7),
            _ => Err(Error::unknown(param, token)),
        }
    }

    fn param(&self) -> &str {
        Self::PARAM
    }

    fn encode(&self) -> String {
        self.code().to_string()
    }

    fn as_f64(&self) -> f64 {
        f64::from(self.code())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto | Self::Auto1 | Self::Auto7 => "Auto",
            Self::Dehumidify => "Dehumidify",
            Self::Cool => "Cool",
            Self::Heat => "Heat",
            Self::Fan => "Fan",
        })
    }
}

/// Fan rate. Numbered speeds 1-5 travel as codes `3`-`7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumIter)]
pub enum Fan {
    #[default]
    Auto,
    Silent,
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
}

impl Fan {
    pub const PARAM: &'static str = "f_rate";

    pub fn code(self) -> &'static str {
        match self {
            Self::Auto => "A",
            Self::Silent => "B",
            Self::Level1 => "3",
            Self::Level2 => "4",
            Self::Level3 => "5",
            Self::Level4 => "6",
            Self::Level5 => "7",
        }
    }
}

impl WireValue for Fan {
    fn decode(param: &str, token: &str) -> Result<Self, Error> {
        match token {
            "A" => Ok(Self::Auto),
            "B" => Ok(Self::Silent),
            "3" => Ok(Self::Level1),
            "4" => Ok(Self::Level2),
            "5" => Ok(Self::Level3),
            "6" => Ok(Self::Level4),
            "7" => Ok(Self::Level5),
            _ => Err(Error::unknown(param, token)),
        }
    }

    fn param(&self) -> &str {
        Self::PARAM
    }

    fn encode(&self) -> String {
        self.code().to_owned()
    }

    /// Auto and Silent sit below the numbered speeds so the projection
    /// stays monotonic.
    fn as_f64(&self) -> f64 {
        match self {
            Self::Auto => -1.0,
            Self::Silent => 0.0,
            Self::Level1 => 1.0,
            Self::Level2 => 2.0,
            Self::Level3 => 3.0,
            Self::Level4 => 4.0,
            Self::Level5 => 5.0,
        }
    }
}

impl fmt::Display for Fan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "Auto",
            Self::Silent => "Silent",
            Self::Level1 => "1",
            Self::Level2 => "2",
            Self::Level3 => "3",
            Self::Level4 => "4",
            Self::Level5 => "5",
        })
    }
}

/// Louvre swing setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, EnumIter)]
pub enum FanDir {
    #[default]
    Stopped = 0,
    Vertical = 1,
    Horizontal = 2,
    Both = 3,
}

impl FanDir {
    pub const PARAM: &'static str = "f_dir";

    #[allow(clippy::as_conversions)]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl WireValue for FanDir {
    fn decode(param: &str, token: &str) -> Result<Self, Error> {
        match parse_code(param, token)? {
            0 => Ok(Self::Stopped),
            1 => Ok(Self::Vertical),
            2 => Ok(Self::Horizontal),
            3 => Ok(Self::Both),
            _ => Err(Error::unknown(param, token)),
        }
    }

    fn param(&self) -> &str {
        Self::PARAM
    }

    fn encode(&self) -> String {
        self.code().to_string()
    }

    fn as_f64(&self) -> f64 {
        f64::from(self.code())
    }
}

impl fmt::Display for FanDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stopped => "Stopped",
            Self::Vertical => "Vertical",
            Self::Horizontal => "Horizontal",
            Self::Both => "Both",
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn assert_round_trip<T>()
    where
        T: WireValue + IntoEnumIterator + PartialEq + fmt::Debug,
    {
        for value in T::iter() {
            let token = value.encode();
            let decoded = T::decode(value.param(), &token).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(decoded.encode(), token);
        }
    }

    #[test]
    fn every_variant_round_trips() {
        assert_round_trip::<Power>();
        assert_round_trip::<Mode>();
        assert_round_trip::<Fan>();
        assert_round_trip::<FanDir>();
    }

    #[test]
    fn power_rejects_other_codes() {
        assert!(matches!(
            Power::decode("pow", "2"),
            Err(Error::UnknownEnumValue { .. })
        ));
        assert!(matches!(
            Power::decode("pow", "on"),
            Err(Error::MalformedValue { .. })
        ));
    }

    #[test]
    fn mode_auto_aliases_share_display_but_not_code() {
        let auto1 = Mode::decode("mode", "1").unwrap();
        let auto7 = Mode::decode("mode", "7").unwrap();
        assert_eq!(auto1.to_string(), "Auto");
        assert_eq!(auto7.to_string(), "Auto");
        assert_eq!(auto1.encode(), "1");
        assert_eq!(auto7.encode(), "7");
    }

    #[test]
    fn mode_rejects_unknown_code() {
        let err = Mode::decode("mode", "5").unwrap_err();
        assert!(matches!(err, Error::UnknownEnumValue { ref field, .. } if field == "mode"));
    }

    #[test]
    fn fan_projection_orders_auto_and_silent_below_speeds() {
        let projected: Vec<f64> = ["A", "B", "3", "4", "5", "6", "7"]
            .iter()
            .map(|t| Fan::decode("f_rate", t).unwrap().as_f64())
            .collect();
        assert_eq!(projected, vec![-1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn fan_rejects_unknown_code() {
        assert!(matches!(
            Fan::decode("f_rate", "Z"),
            Err(Error::UnknownEnumValue { .. })
        ));
    }

    #[test]
    fn query_pairs_use_fixed_field_names() {
        assert_eq!(Power::On.query_pair(), "pow=1");
        assert_eq!(Mode::Heat.query_pair(), "mode=4");
        assert_eq!(Fan::Silent.query_pair(), "f_rate=B");
        assert_eq!(FanDir::Both.query_pair(), "f_dir=3");
    }
}
