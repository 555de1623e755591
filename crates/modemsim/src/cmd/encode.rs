use std::sync::Arc;

use modemsim_frame::{FrameBuilder, FrameConfig, MessageCounter};

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_wire, OutputFormat};

pub fn run(args: EncodeArgs, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let (kind, bytes) = args.payload.resolve()?;

    let counter = Arc::new(MessageCounter::starting_at(args.id));
    let builder = FrameBuilder::with_counter(counter, config);
    let frame = builder
        .build(&bytes, kind)
        .map_err(|err| frame_error("build failed", err))?;

    print_wire(&frame, &frame.serialize(), format);
    Ok(SUCCESS)
}
