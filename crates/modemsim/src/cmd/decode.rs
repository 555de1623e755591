use modemsim_frame::{FrameConfig, FrameDecoder};

use crate::cmd::{parse_hex, DecodeArgs};
use crate::exit::{failure_count_code, CliResult};
use crate::output::{print_report, OutputFormat, TransferRow};

pub fn run(args: DecodeArgs, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let raw = parse_hex(&args.wire)?;
    let outcome = FrameDecoder::with_config(config).decode(&raw);

    let row = TransferRow::from_outcome(None, None, &outcome);
    let failures = usize::from(!row.valid);
    print_report(&[row], format);
    Ok(failure_count_code(failures))
}
