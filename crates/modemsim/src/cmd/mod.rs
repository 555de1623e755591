use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use modemsim_frame::{FrameConfig, PayloadKind};

use crate::exit::{io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod run;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send the built-in text and binary vectors through the link.
    Run(RunArgs),
    /// Send a single payload through the link.
    Send(SendArgs),
    /// Build a frame and print its wire bytes as hex.
    Encode(EncodeArgs),
    /// Decode a hex-encoded wire buffer.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Run(args) => run::run(args, config, format),
        Command::Send(args) => send::run(args, config, format),
        Command::Encode(args) => encode::run(args, config, format),
        Command::Decode(args) => decode::run(args, config, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Text,
    Binary,
}

impl From<KindArg> for PayloadKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Text => PayloadKind::Text,
            KindArg::Binary => PayloadKind::Binary,
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Flip this bit of each wire buffer in transit (bit 0 = LSB of byte 0).
    #[arg(long, value_name = "BIT")]
    pub corrupt_bit: Option<usize>,
    /// Only corrupt the Nth message (1-based). Default: every message.
    #[arg(long, value_name = "N", requires = "corrupt_bit")]
    pub corrupt_item: Option<usize>,
    /// Only send vectors of this kind.
    #[arg(long, value_name = "KIND")]
    pub only: Option<KindArg>,
}

#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Text payload.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub text: Option<String>,
    /// Hex-encoded payload bytes.
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub hex: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["text", "hex"])]
    pub file: Option<PathBuf>,
    /// Payload kind. Default: text for --text, binary otherwise.
    #[arg(long, value_name = "KIND")]
    pub kind: Option<KindArg>,
}

impl PayloadArgs {
    /// Payload bytes and the kind to frame them as.
    pub fn resolve(&self) -> CliResult<(PayloadKind, Vec<u8>)> {
        let (default_kind, bytes) = if let Some(text) = &self.text {
            (KindArg::Text, text.as_bytes().to_vec())
        } else if let Some(encoded) = &self.hex {
            (KindArg::Binary, parse_hex(encoded)?)
        } else if let Some(path) = &self.file {
            let bytes = fs::read(path)
                .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
            (KindArg::Binary, bytes)
        } else {
            return Err(CliError::new(
                USAGE,
                "one of --text, --hex or --file is required",
            ));
        };
        Ok((self.kind.unwrap_or(default_kind).into(), bytes))
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Flip this bit of the wire buffer in transit.
    #[arg(long, value_name = "BIT")]
    pub flip_bit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Message ID to stamp on the frame.
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub id: u16,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Wire buffer as hex (whitespace ignored).
    pub wire: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Parse hex, ignoring whitespace and an optional `0x` prefix.
pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);
    hex::decode(cleaned).map_err(|err| CliError::new(USAGE, format!("invalid hex: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_variants() {
        assert_eq!(parse_hex("DEADBEEF").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(parse_hex("0xde ad").unwrap(), vec![0xDE, 0xAD]);
        assert_eq!(parse_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert_eq!(parse_hex("zz").unwrap_err().code, USAGE);
        assert_eq!(parse_hex("abc").unwrap_err().code, USAGE);
    }

    #[test]
    fn payload_kind_defaults() {
        let text = PayloadArgs {
            text: Some("hi".to_string()),
            hex: None,
            file: None,
            kind: None,
        };
        assert_eq!(text.resolve().unwrap(), (PayloadKind::Text, b"hi".to_vec()));

        let hex = PayloadArgs {
            text: None,
            hex: Some("00FF".to_string()),
            file: None,
            kind: None,
        };
        assert_eq!(hex.resolve().unwrap(), (PayloadKind::Binary, vec![0x00, 0xFF]));

        let forced = PayloadArgs {
            text: Some("hi".to_string()),
            hex: None,
            file: None,
            kind: Some(KindArg::Binary),
        };
        assert_eq!(forced.resolve().unwrap().0, PayloadKind::Binary);
    }

    #[test]
    fn payload_required() {
        let none = PayloadArgs {
            text: None,
            hex: None,
            file: None,
            kind: None,
        };
        assert_eq!(none.resolve().unwrap_err().code, USAGE);
    }
}
