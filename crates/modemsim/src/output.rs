use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use modemsim_frame::{Frame, FrameError, Payload, Transfer};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One received (or rejected) message, as reported to the user.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TransferRow {
    pub message_id: Option<u16>,
    pub kind: Option<&'static str>,
    pub checksum: Option<String>,
    pub length: Option<u16>,
    pub valid: bool,
    pub content: Option<String>,
    pub error: Option<String>,
}

impl TransferRow {
    pub fn from_outcome(
        sent_id: Option<u16>,
        sent_checksum: Option<u32>,
        outcome: &Result<Frame, FrameError>,
    ) -> Self {
        match outcome {
            Ok(frame) => Self {
                message_id: Some(frame.message_id()),
                kind: Some(frame.kind().name()),
                checksum: Some(format_checksum(frame.checksum())),
                length: Some(frame.payload_len()),
                valid: true,
                content: Some(payload_preview(frame.payload())),
                error: None,
            },
            Err(err) => Self {
                message_id: sent_id,
                kind: None,
                checksum: sent_checksum.map(format_checksum),
                length: None,
                valid: false,
                content: None,
                error: Some(err.to_string()),
            },
        }
    }
}

impl From<&Transfer> for TransferRow {
    fn from(transfer: &Transfer) -> Self {
        Self::from_outcome(transfer.sent_id, transfer.sent_checksum, &transfer.outcome)
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    schema_id: &'a str,
    total: usize,
    failures: usize,
    transfers: &'a [TransferRow],
}

pub fn print_report(rows: &[TransferRow], format: OutputFormat) {
    let failures = rows.iter().filter(|r| !r.valid).count();
    match format {
        OutputFormat::Json => {
            let out = ReportOutput {
                schema_id: "https://schemas.3leaps.dev/modemsim/cli/v1/transfer-report.schema.json",
                total: rows.len(),
                failures,
                transfers: rows,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "KIND", "CRC", "LEN", "STATUS", "CONTENT"]);
            for row in rows {
                table.add_row(vec![
                    opt_cell(row.message_id),
                    row.kind.unwrap_or("-").to_string(),
                    row.checksum.clone().unwrap_or_else(|| "-".to_string()),
                    opt_cell(row.length),
                    if row.valid { "ok" } else { "REJECTED" }.to_string(),
                    row.content
                        .clone()
                        .or_else(|| row.error.clone())
                        .unwrap_or_default(),
                ]);
            }
            println!("{table}");
            println!("{} message(s), {} failure(s)", rows.len(), failures);
        }
        OutputFormat::Pretty => {
            for row in rows {
                println!("{}", pretty_line(row));
            }
        }
    }
}

pub fn pretty_line(row: &TransferRow) -> String {
    let id = opt_cell(row.message_id);
    if row.valid {
        format!(
            "Message #{} (CRC: {}, {:>3} bytes, {}): {}",
            id,
            row.checksum.as_deref().unwrap_or("-"),
            row.length.unwrap_or(0),
            row.kind.unwrap_or("-"),
            row.content.as_deref().unwrap_or("")
        )
    } else {
        format!(
            "Message #{} rejected: {}",
            id,
            row.error.as_deref().unwrap_or("unknown error")
        )
    }
}

#[derive(Serialize)]
struct WireOutput<'a> {
    schema_id: &'a str,
    message_id: u16,
    kind: &'a str,
    length: u16,
    checksum: String,
    wire: String,
}

pub fn print_wire(frame: &Frame, wire: &[u8], format: OutputFormat) {
    let wire_hex = hex::encode_upper(wire);
    match format {
        OutputFormat::Json => {
            let out = WireOutput {
                schema_id: "https://schemas.3leaps.dev/modemsim/cli/v1/encoded-frame.schema.json",
                message_id: frame.message_id(),
                kind: frame.kind().name(),
                length: frame.payload_len(),
                checksum: format_checksum(frame.checksum()),
                wire: wire_hex,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "KIND", "LEN", "CRC", "WIRE"])
                .add_row(vec![
                    frame.message_id().to_string(),
                    frame.kind().name().to_string(),
                    frame.payload_len().to_string(),
                    format_checksum(frame.checksum()),
                    wire_hex,
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{wire_hex}");
        }
    }
}

pub fn format_checksum(checksum: u32) -> String {
    format!("0x{checksum:08X}")
}

fn payload_preview(payload: &Payload) -> String {
    match payload {
        Payload::Text(text) => text.escape_debug().to_string(),
        Payload::Binary(bytes) => hex::encode_upper(bytes),
    }
}

fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
