use modemsim_frame::{
    transfer, BitFlip, Channel, FrameBuilder, FrameConfig, FrameDecoder, Loopback,
};

use crate::cmd::SendArgs;
use crate::exit::{failure_count_code, CliResult};
use crate::output::{print_report, OutputFormat, TransferRow};

pub fn run(args: SendArgs, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let (kind, bytes) = args.payload.resolve()?;

    let mut channel: Box<dyn Channel> = match args.flip_bit {
        Some(bit) => Box::new(BitFlip { bit }),
        None => Box::new(Loopback),
    };
    let result = transfer(
        &FrameBuilder::with_config(config),
        &mut channel,
        &FrameDecoder::with_config(config),
        kind,
        &bytes,
    );

    let failures = usize::from(!result.is_valid());
    print_report(&[TransferRow::from(&result)], format);
    Ok(failure_count_code(failures))
}
