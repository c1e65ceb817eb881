//! Clap derive structures for the `daikin` CLI.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use daikin_api::Endpoint;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// daikin -- find and drive Daikin air conditioners on the local network
#[derive(Debug, Parser)]
#[command(
    name = "daikin",
    version,
    about = "Discover and control Daikin air conditioners",
    long_about = "Searches the local network for Daikin WiFi adapters via UDP broadcast\n\
        and reads or changes their state over the adapter's HTTP interface.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Aircon address (skips discovery)
    #[arg(long, short = 'a', global = true)]
    pub address: Option<String>,

    /// Configuration file
    #[arg(long, short = 'c', env = "DAIKIN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Only search on this network interface
    #[arg(long, short = 'i', global = true)]
    pub interface: Option<String>,

    /// Discovery read deadline in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub poll_interval: Option<u64>,

    /// Discovery rounds per broadcast address
    #[arg(long, global = true, value_name = "N")]
    pub poll_count: Option<u32>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "DAIKIN_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Don't print any informative messages
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables and status dumps (default)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the addresses of all aircons that answer discovery
    #[command(alias = "ls")]
    Discover,

    /// Current status of every aircon
    #[command(alias = "status")]
    Info,

    /// Power on and optionally change temperature, mode or fan speed
    On(OnArgs),

    /// Power off
    Off,

    /// Print the raw reply of any read endpoint
    Raw(RawArgs),

    /// Print Prometheus metrics for every aircon once
    Metrics,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct OnArgs {
    /// Target temperature
    #[arg(long, short = 't')]
    pub temperature: Option<String>,

    /// Operating mode (0=Auto, 2=Dehumidify, 3=Cool, 4=Heat, 6=Fan)
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    /// Fan speed (A=Auto, B=Silent, 3=Fan1, 4=Fan2, 5=Fan3, 6=Fan4, 7=Fan5)
    #[arg(long, short = 'f')]
    pub fan: Option<String>,
}

#[derive(Debug, Args)]
pub struct RawArgs {
    /// Endpoint name, e.g. basic_info, control_info, day_power_ex
    #[arg(value_parser = parse_read_endpoint)]
    pub endpoint: Endpoint,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

fn parse_read_endpoint(s: &str) -> Result<Endpoint, String> {
    let known = || {
        Endpoint::reads()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    match Endpoint::from_str(s) {
        Ok(endpoint) if endpoint.is_read() => Ok(endpoint),
        Ok(_) => Err(format!("'{s}' changes device state; expected one of: {}", known())),
        Err(_) => Err(format!("unknown endpoint '{s}'; expected one of: {}", known())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn raw_accepts_only_read_endpoints() {
        assert_eq!(parse_read_endpoint("sensor_info").unwrap(), Endpoint::SensorInfo);
        assert!(parse_read_endpoint("set_control_info").is_err());
        assert!(parse_read_endpoint("bogus").unwrap_err().contains("basic_info"));
    }

    #[test]
    fn status_is_an_alias_for_info() {
        let cli = Cli::try_parse_from(["daikin", "status", "-a", "10.0.0.2"]).unwrap();
        assert!(matches!(cli.command, Command::Info));
        assert_eq!(cli.global.address.as_deref(), Some("10.0.0.2"));
    }
}
