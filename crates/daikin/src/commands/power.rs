use daikin_api::{Device, Fan, Mode, Power, Temperature, WireValue};
use daikin_config::Config;
use tracing::warn;

use crate::cli::{GlobalOpts, OnArgs};
use crate::error::CliError;
use crate::output;

/// Control changes requested on the command line, already decoded.
#[derive(Debug, Default, PartialEq)]
pub struct Overrides {
    pub temperature: Option<Temperature>,
    pub mode: Option<Mode>,
    pub fan: Option<Fan>,
}

impl Overrides {
    /// Decode the raw flag values with the same rules as device replies.
    pub fn parse(args: &OnArgs) -> Result<Self, CliError> {
        Ok(Self {
            temperature: decode_flag("temperature", "stemp", args.temperature.as_deref())?,
            mode: decode_flag("mode", Mode::PARAM, args.mode.as_deref())?,
            fan: decode_flag("fan", Fan::PARAM, args.fan.as_deref())?,
        })
    }

    fn apply(&self, device: &mut Device) {
        let Some(control) = device.control_info.as_mut() else {
            return;
        };
        if let Some(temperature) = &self.temperature {
            control.temperature = temperature.clone();
        }
        if let Some(mode) = self.mode {
            control.mode = mode;
        }
        if let Some(fan) = self.fan {
            control.fan = fan;
        }
    }
}

fn decode_flag<T: WireValue>(flag: &str, param: &str, raw: Option<&str>) -> Result<Option<T>, CliError> {
    raw.map(|token| {
        T::decode(param, token).map_err(|e| CliError::Validation {
            field: format!("--{flag}"),
            reason: e.to_string(),
        })
    })
    .transpose()
}

pub async fn handle_on(args: &OnArgs, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let overrides = Overrides::parse(args)?;
    switch(Power::On, &overrides, config, global).await
}

pub async fn handle_off(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    switch(Power::Off, &Overrides::default(), config, global).await
}

/// Fetch, modify and write back the control settings of every device.
///
/// A device whose settings cannot be read is skipped; a rejected write
/// aborts.
async fn switch(
    power: Power,
    overrides: &Overrides,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = super::client(config)?;
    let devices = super::discover_devices(config).await?;

    for mut device in devices {
        if let Err(e) = client.get_control_info(&mut device).await {
            warn!(address = %device.address, error = %e, "skipping aircon");
            continue;
        }

        let verb = match power {
            Power::On => "on",
            Power::Off => "off",
        };
        output::print_output(&format!("Switching {} {verb}", device.address), global.quiet)?;

        if let Some(control) = device.control_info.as_mut() {
            control.power = power;
        }
        overrides.apply(&mut device);

        client
            .set_control_info(&device)
            .await
            .map_err(|e| CliError::device(&device.address, e))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use daikin_api::ControlInfo;

    use super::*;

    fn args(temperature: Option<&str>, mode: Option<&str>, fan: Option<&str>) -> OnArgs {
        OnArgs {
            temperature: temperature.map(Into::into),
            mode: mode.map(Into::into),
            fan: fan.map(Into::into),
        }
    }

    #[test]
    fn overrides_decode_like_device_fields() {
        let overrides = Overrides::parse(&args(Some("23.5"), Some("4"), Some("B"))).unwrap();
        assert_eq!(overrides.mode, Some(Mode::Heat));
        assert_eq!(overrides.fan, Some(Fan::Silent));
        let temperature = overrides.temperature.unwrap();
        assert_eq!(temperature.as_f64(), 23.5);
        assert_eq!(temperature.param(), "stemp");
    }

    #[test]
    fn invalid_override_names_the_flag() {
        let err = Overrides::parse(&args(None, Some("5"), None)).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "--mode"));
    }

    #[test]
    fn overrides_only_touch_given_fields() {
        let mut device = Device {
            control_info: Some(ControlInfo::default()),
            ..Device::new("10.0.0.2")
        };
        Overrides::parse(&args(None, None, Some("7")))
            .unwrap()
            .apply(&mut device);

        let control = device.control_info.unwrap();
        assert_eq!(control.fan, Fan::Level5);
        assert_eq!(control.mode, Mode::Auto);
        assert!(control.temperature.is_absent());
    }
}
