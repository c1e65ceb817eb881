// ── Device record ──

use std::fmt;

use serde::Serialize;

use crate::records::{BasicInfo, ControlInfo, PowerInfo, SensorInfo};

/// Everything known about one adapter, keyed by its network address.
///
/// Sub-records stay `None` until the matching fetch succeeds; an absent
/// record is a normal state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Device {
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<BasicInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_info: Option<ControlInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_info: Option<SensorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_info: Option<PowerInfo>,
}

impl Device {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// `true` once any sub-record has been fetched.
    pub fn is_populated(&self) -> bool {
        self.basic_info.is_some()
            || self.control_info.is_some()
            || self.sensor_info.is_some()
            || self.power_info.is_some()
    }
}

/// Multi-line dump of the populated records, basic info first.
impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections: [Option<&dyn fmt::Display>; 4] = [
            self.basic_info.as_ref().map(|r| r as &dyn fmt::Display),
            self.control_info.as_ref().map(|r| r as &dyn fmt::Display),
            self.sensor_info.as_ref().map(|r| r as &dyn fmt::Display),
            self.power_info.as_ref().map(|r| r as &dyn fmt::Display),
        ];
        let mut first = true;
        for section in sections.into_iter().flatten() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{section}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::response::parse;

    #[test]
    fn empty_device_renders_nothing() {
        let device = Device::new("10.0.0.5");
        assert!(!device.is_populated());
        assert_eq!(device.to_string(), "");
    }

    #[test]
    fn dump_skips_absent_records_and_keeps_order() {
        let mut sensor = SensorInfo::default();
        sensor
            .populate(&parse("ret=OK,htemp=21.5,hhum=40,otemp=8.0").unwrap())
            .unwrap();
        let mut basic = BasicInfo::default();
        basic
            .populate(&parse("ret=OK,type=aircon,ver=3_3_6,rev=1,name=%4b%69%74%63%68%65%6e").unwrap())
            .unwrap();

        let device = Device {
            address: "10.0.0.5".into(),
            basic_info: Some(basic),
            sensor_info: Some(sensor),
            ..Device::default()
        };

        assert_eq!(
            device.to_string(),
            "Name: Kitchen\nType: aircon\nFirmware Version: 3.3.6\nRevision: 1\n\
             Inside temperature: 21.5\nInside humidity: 40\nOutside temperature: 8.0"
        );
    }

    #[test]
    fn serializes_only_populated_records() {
        let device = Device::new("10.0.0.5");
        assert_eq!(
            serde_json::to_value(&device).unwrap(),
            serde_json::json!({ "address": "10.0.0.5" })
        );
    }
}
