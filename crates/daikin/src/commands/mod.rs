//! Command dispatch: discovery, device fetches and output formatting.

pub mod discover;
pub mod info;
pub mod metrics;
pub mod power;
pub mod raw;

use daikin_api::{DaikinClient, Device};
use daikin_config::Config;
use daikin_core::Discovery;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Discover => discover::handle(config, global).await,
        Command::Info => info::handle(config, global).await,
        Command::On(args) => power::handle_on(&args, config, global).await,
        Command::Off => power::handle_off(config, global).await,
        Command::Raw(args) => raw::handle(args.endpoint, config, global).await,
        Command::Metrics => metrics::handle(config, global).await,
        // Completions never reach the network
        Command::Completions(_) => Ok(()),
    }
}

// ── Shared helpers ───────────────────────────────────────────────────

pub(crate) fn client(config: &Config) -> Result<DaikinClient, CliError> {
    DaikinClient::new(&config.transport_config()).map_err(|e| CliError::Validation {
        field: "timeout".into(),
        reason: e.to_string(),
    })
}

/// Run discovery and return the bare device records, sorted by address.
pub(crate) async fn discover_devices(config: &Config) -> Result<Vec<Device>, CliError> {
    let registry = Discovery::new(config.discovery_config()).run().await?;
    if registry.is_empty() {
        return Err(CliError::NoDevices);
    }
    debug!(devices = registry.len(), "discovery complete");
    Ok(registry.into_devices())
}

/// Fetch all four records of every device concurrently.
///
/// Devices that fail are logged and left out. If every device fails, the
/// first failure is returned instead.
pub(crate) async fn fetch_all(
    client: &DaikinClient,
    devices: Vec<Device>,
) -> Result<Vec<Device>, CliError> {
    let mut tasks = JoinSet::new();
    for mut device in devices {
        let client = client.clone();
        tasks.spawn(async move {
            let result = client.refresh(&mut device).await;
            (device, result)
        });
    }

    let mut fetched = Vec::new();
    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
        let Ok((device, result)) = joined else {
            warn!("device fetch task aborted");
            continue;
        };
        match result {
            Ok(()) => fetched.push(device),
            Err(e) => {
                warn!(address = %device.address, error = %e, "skipping aircon");
                first_error.get_or_insert_with(|| CliError::device(&device.address, e));
            }
        }
    }

    if fetched.is_empty() {
        if let Some(err) = first_error {
            return Err(err);
        }
    }
    fetched.sort_by(|a, b| a.address.cmp(&b.address));
    Ok(fetched)
}
