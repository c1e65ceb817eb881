use daikin_api::Device;
use daikin_config::Config;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct AddressRow {
    #[tabled(rename = "Address")]
    address: String,
}

pub async fn handle(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let devices: Vec<Device> = super::discover_devices(config).await?;
    let out = output::render_list(
        global.output,
        &devices,
        |d| AddressRow {
            address: d.address.clone(),
        },
        |d| d.address.clone(),
    )?;
    output::print_output(&out, global.quiet)
}
