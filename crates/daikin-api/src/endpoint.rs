// Fixed HTTP paths served by the adapter.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One adapter HTTP endpoint.
///
/// The string form (`basic_info`, `day_power_ex`, ...) is the short name
/// accepted on the command line; [`path`](Endpoint::path) is the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Endpoint {
    BasicInfo,
    RemoteMethod,
    ModelInfo,
    ControlInfo,
    SensorInfo,
    Timer,
    Price,
    Target,
    DayPowerEx,
    WeekPower,
    YearPower,
    Program,
    ScdlTimer,
    Notify,
    SetControlInfo,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::BasicInfo => "/common/basic_info",
            Self::RemoteMethod => "/common/get_remote_method",
            Self::ModelInfo => "/aircon/get_model_info",
            Self::ControlInfo => "/aircon/get_control_info",
            Self::SensorInfo => "/aircon/get_sensor_info",
            Self::Timer => "/aircon/get_timer",
            Self::Price => "/aircon/get_price",
            Self::Target => "/aircon/get_target",
            Self::DayPowerEx => "/aircon/get_day_power_ex",
            Self::WeekPower => "/aircon/get_week_power",
            Self::YearPower => "/aircon/get_year_power",
            Self::Program => "/aircon/get_program",
            Self::ScdlTimer => "/aircon/get_scdltimer",
            Self::Notify => "/aircon/get_notify",
            Self::SetControlInfo => "/aircon/set_control_info",
        }
    }

    /// `true` for endpoints that only read state.
    pub fn is_read(self) -> bool {
        !matches!(self, Self::SetControlInfo)
    }

    /// Every read-only endpoint, in declaration order.
    pub fn reads() -> impl Iterator<Item = Self> {
        Self::iter().filter(|e| e.is_read())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn fourteen_read_paths() {
        assert_eq!(Endpoint::reads().count(), 14);
        assert!(Endpoint::reads().all(|e| e.path().contains("/get_") || e == Endpoint::BasicInfo));
    }

    #[test]
    fn short_names_parse() {
        assert_eq!(Endpoint::from_str("day_power_ex").unwrap(), Endpoint::DayPowerEx);
        assert_eq!(Endpoint::from_str("Control_Info").unwrap(), Endpoint::ControlInfo);
        assert_eq!(Endpoint::ScdlTimer.to_string(), "scdl_timer");
        assert!(Endpoint::from_str("nope").is_err());
    }
}
