use daikin_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::client(config)?;
    let devices = super::discover_devices(config).await?;
    let devices = super::fetch_all(&client, devices).await?;

    let out = output::render_text(global.output, &devices, |d| {
        format!("Current {}:\n{d}", d.address)
    })?;
    output::print_output(&out, global.quiet)
}
