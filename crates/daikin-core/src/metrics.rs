// ── Prometheus projection ──
//
// Turns fetched device records into one text exposition snapshot. A fresh
// registry is built per call, so nothing is retained between scrapes.

use daikin_api::{Device, WireValue};
use prometheus::{Encoder, GaugeVec, Opts, TextEncoder};

use crate::error::CoreError;

pub const NAMESPACE: &str = "daikin_ac";

struct Gauges {
    registry: prometheus::Registry,
}

impl Gauges {
    fn new() -> Self {
        Self {
            registry: prometheus::Registry::new(),
        }
    }

    fn gauge(&self, name: &str, help: &str, labels: &[&str]) -> Result<GaugeVec, CoreError> {
        let gauge = GaugeVec::new(Opts::new(name, help).namespace(NAMESPACE), labels)?;
        self.registry.register(Box::new(gauge.clone()))?;
        Ok(gauge)
    }

    /// Register a `target`-labelled gauge and set one sample per device.
    fn project<'a, V, F>(
        &self,
        name: &str,
        help: &str,
        devices: &'a [Device],
        value: F,
    ) -> Result<(), CoreError>
    where
        V: WireValue + 'a,
        F: Fn(&'a Device) -> Option<&'a V>,
    {
        let gauge = self.gauge(name, help, &["target"])?;
        for device in devices {
            if let Some(v) = value(device) {
                gauge
                    .with_label_values(&[device.address.as_str()])
                    .set(v.as_f64());
            }
        }
        Ok(())
    }

    fn encode(&self) -> Result<String, CoreError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| CoreError::Metrics(e.to_string()))
    }
}

/// Render the metrics of `devices` in Prometheus text format.
///
/// Records that have not been fetched contribute no samples.
pub fn render(devices: &[Device]) -> Result<String, CoreError> {
    let gauges = Gauges::new();

    let info = gauges.gauge(
        "device_info",
        "device info, name and firmware",
        &["target", "type", "name", "version", "revision"],
    )?;
    for device in devices {
        if let Some(basic) = &device.basic_info {
            let (kind, name) = (basic.kind.to_string(), basic.name.to_string());
            let (version, revision) = (basic.version.to_string(), basic.revision.to_string());
            info.with_label_values(&[
                device.address.as_str(),
                kind.as_str(),
                name.as_str(),
                version.as_str(),
                revision.as_str(),
            ])
            .set(0.0);
        }
    }

    gauges.project("htemp", "sensor info, inside temperature (htemp)", devices, |d| {
        d.sensor_info.as_ref().map(|s| &s.home_temperature)
    })?;
    gauges.project("hhum", "sensor info, inside humidity (hhum)", devices, |d| {
        d.sensor_info.as_ref().map(|s| &s.humidity)
    })?;
    gauges.project("otemp", "sensor info, outside temperature (otemp)", devices, |d| {
        d.sensor_info.as_ref().map(|s| &s.outside_temperature)
    })?;

    gauges.project("pow", "control info, power (pow)", devices, |d| {
        d.control_info.as_ref().map(|c| &c.power)
    })?;
    gauges.project("mode", "control info, mode", devices, |d| {
        d.control_info.as_ref().map(|c| &c.mode)
    })?;
    gauges.project("stemp", "control info, target temperature (stemp)", devices, |d| {
        d.control_info.as_ref().map(|c| &c.temperature)
    })?;
    gauges.project("shum", "control info, target humidity (shum)", devices, |d| {
        d.control_info.as_ref().map(|c| &c.humidity)
    })?;
    gauges.project("f_rate", "control info, fan rate mode (f_rate)", devices, |d| {
        d.control_info.as_ref().map(|c| &c.fan)
    })?;
    gauges.project("f_dir", "control info, fan direction (f_dir)", devices, |d| {
        d.control_info.as_ref().map(|c| &c.fan_dir)
    })?;

    gauges.project("curr_day_cool", "power info, today's cooling energy in kWh", devices, |d| {
        d.power_info.as_ref().map(|p| &p.day_cool)
    })?;
    gauges.project("curr_day_heat", "power info, today's heating energy in kWh", devices, |d| {
        d.power_info.as_ref().map(|p| &p.day_heat)
    })?;

    gauges.encode()
}
