//! CLI flag overrides on top of `daikin_config`.
//!
//! Precedence: flag > environment > file > default.

use daikin_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the configuration and apply any flags given on the command line.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut config = daikin_config::load_config(global.config.as_deref())?;
    apply_overrides(&mut config, global);
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, global: &GlobalOpts) {
    if let Some(address) = &global.address {
        config.address = Some(address.clone());
    }
    if let Some(interface) = &global.interface {
        config.interface = Some(interface.clone());
    }
    if let Some(ms) = global.poll_interval {
        config.poll_interval_ms = ms;
    }
    if let Some(count) = global.poll_count {
        config.poll_count = count;
    }
    if let Some(secs) = global.timeout {
        config.timeout = secs;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn flags_override_loaded_values() {
        let cli = Cli::try_parse_from([
            "daikin",
            "discover",
            "--interface",
            "eth1",
            "--poll-count",
            "3",
            "--poll-interval",
            "200",
            "--timeout",
            "4",
        ])
        .unwrap();
        let mut config = Config {
            interface: Some("eth0".into()),
            ..Config::default()
        };

        apply_overrides(&mut config, &cli.global);

        assert_eq!(config.interface.as_deref(), Some("eth1"));
        assert_eq!(config.poll_count, 3);
        assert_eq!(config.poll_interval_ms, 200);
        assert_eq!(config.timeout, 4);
        assert_eq!(config.address, None);
    }

    #[test]
    fn absent_flags_keep_loaded_values() {
        let cli = Cli::try_parse_from(["daikin", "info"]).unwrap();
        let mut config = Config {
            address: Some("10.0.0.3".into()),
            ..Config::default()
        };

        apply_overrides(&mut config, &cli.global);

        assert_eq!(config.address.as_deref(), Some("10.0.0.3"));
    }
}
