use daikin_api::{Endpoint, FieldMap};
use daikin_config::Config;
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct RawReply {
    address: String,
    fields: FieldMap,
}

#[derive(Tabled)]
struct FieldRow<'a> {
    #[tabled(rename = "Field")]
    field: &'a str,
    #[tabled(rename = "Value")]
    value: &'a str,
}

pub async fn handle(endpoint: Endpoint, config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let client = super::client(config)?;
    let devices = super::discover_devices(config).await?;

    let mut replies = Vec::with_capacity(devices.len());
    let mut first_error = None;
    for device in devices {
        match client.query(&device.address, endpoint).await {
            Ok(fields) => replies.push(RawReply {
                address: device.address,
                fields,
            }),
            Err(e) => {
                warn!(address = %device.address, %endpoint, error = %e, "query failed");
                first_error.get_or_insert_with(|| CliError::device(&device.address, e));
            }
        }
    }
    if replies.is_empty() {
        if let Some(err) = first_error {
            return Err(err);
        }
    }

    let out = if global.output == OutputFormat::Plain {
        output::render_text(global.output, &replies, |r| {
            r.fields
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("\n")
        })?
    } else {
        output::render_text(global.output, &replies, |r| {
            let rows: Vec<FieldRow<'_>> = r
                .fields
                .iter()
                .map(|(field, value)| FieldRow { field, value })
                .collect();
            format!("{} {}:\n{}", r.address, endpoint.path(), output::render_table(&rows))
        })?
    };
    output::print_output(&out, global.quiet)
}
