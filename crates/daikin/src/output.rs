//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Plain => Ok(data.iter().map(id_fn).collect::<Vec<_>>().join("\n")),
        structured => render_structured(structured, data),
    }
}

/// Render a list whose human form is free text rather than a table.
///
/// `Table` and `Plain` both use `text_fn`, joined with blank-line
/// separators; structured formats serialize `data`.
pub fn render_text<T>(
    format: OutputFormat,
    data: &[T],
    text_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table | OutputFormat::Plain => {
            Ok(data.iter().map(text_fn).collect::<Vec<_>>().join("\n\n"))
        }
        structured => render_structured(structured, data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) -> Result<(), CliError> {
    if quiet || output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_structured<T: serde::Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        _ => serde_json::to_string_pretty(data)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        address: String,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Address")]
        address: String,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                address: "10.0.0.1".into(),
            },
            Item {
                address: "10.0.0.2".into(),
            },
        ]
    }

    fn render(format: OutputFormat) -> String {
        render_list(
            format,
            &items(),
            |i| Row {
                address: i.address.clone(),
            },
            |i| i.address.clone(),
        )
        .unwrap()
    }

    #[test]
    fn plain_is_one_id_per_line() {
        assert_eq!(render(OutputFormat::Plain), "10.0.0.1\n10.0.0.2");
    }

    #[test]
    fn table_has_header() {
        let table = render(OutputFormat::Table);
        assert!(table.contains("Address"));
        assert!(table.contains("10.0.0.2"));
    }

    #[test]
    fn compact_json_is_one_line() {
        assert_eq!(
            render(OutputFormat::JsonCompact),
            r#"[{"address":"10.0.0.1"},{"address":"10.0.0.2"}]"#
        );
    }

    #[test]
    fn yaml_lists_items() {
        assert!(render(OutputFormat::Yaml).contains("- address: 10.0.0.1"));
    }

    #[test]
    fn text_blocks_are_separated() {
        let text = render_text(OutputFormat::Table, &items(), |i| format!("Current {}:", i.address))
            .unwrap();
        assert_eq!(text, "Current 10.0.0.1:\n\nCurrent 10.0.0.2:");
    }
}
