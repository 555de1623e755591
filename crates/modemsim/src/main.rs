mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use modemsim_frame::FrameConfig;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "modemsim", version, about = "Simulated modem framing CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "MODEMSIM_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    /// Maximum payload size in bytes.
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = modemsim_frame::MAX_PAYLOAD,
        env = "MODEMSIM_MAX_PAYLOAD",
        global = true
    )]
    max_payload: u16,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let config = FrameConfig {
        max_payload_size: cli.max_payload,
    };
    let result = cmd::run(cli.command, config, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
