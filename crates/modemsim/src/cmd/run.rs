use bytes::Bytes;
use modemsim::vectors;
use modemsim_frame::{
    run_batch, BitFlip, Channel, FrameBuilder, FrameConfig, FrameDecoder, Loopback,
};

use crate::cmd::RunArgs;
use crate::exit::{failure_count_code, CliResult};
use crate::output::{print_report, OutputFormat, TransferRow};

pub fn run(args: RunArgs, config: FrameConfig, format: OutputFormat) -> CliResult<i32> {
    let items = match args.only {
        Some(kind) => vectors::of_kind(kind.into()),
        None => vectors::all(),
    };

    let builder = FrameBuilder::with_config(config);
    let decoder = FrameDecoder::with_config(config);
    let mut channel = FaultInjector {
        flip: args.corrupt_bit.map(|bit| BitFlip { bit }),
        only_item: args.corrupt_item,
        sent: 0,
    };

    let report = run_batch(&builder, &mut channel, &decoder, items);
    tracing::info!(
        total = report.transfers.len(),
        failures = report.failures(),
        "batch complete"
    );

    let rows: Vec<TransferRow> = report.transfers.iter().map(TransferRow::from).collect();
    print_report(&rows, format);
    Ok(failure_count_code(report.failures()))
}

/// Loopback link that optionally flips a bit, on every message or on one.
struct FaultInjector {
    flip: Option<BitFlip>,
    only_item: Option<usize>,
    sent: usize,
}

impl Channel for FaultInjector {
    fn transmit(&mut self, wire: &[u8]) -> Bytes {
        self.sent += 1;
        let hit = self.only_item.is_none_or(|n| n == self.sent);
        match self.flip.as_mut() {
            Some(flip) if hit => flip.transmit(wire),
            _ => Loopback.transmit(wire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injector_without_fault_is_loopback() {
        let mut channel = FaultInjector {
            flip: None,
            only_item: None,
            sent: 0,
        };
        assert_eq!(channel.transmit(&[1, 2, 3]).as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn injector_targets_one_item() {
        let mut channel = FaultInjector {
            flip: Some(BitFlip { bit: 0 }),
            only_item: Some(2),
            sent: 0,
        };
        assert_eq!(channel.transmit(&[0]).as_ref(), &[0]);
        assert_eq!(channel.transmit(&[0]).as_ref(), &[1]);
        assert_eq!(channel.transmit(&[0]).as_ref(), &[0]);
    }

    #[test]
    fn run_counts_failures() {
        let args = RunArgs {
            corrupt_bit: Some(40),
            corrupt_item: Some(3),
            only: None,
        };
        let code = run(args, FrameConfig::default(), OutputFormat::Json).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn clean_run_exits_zero() {
        let args = RunArgs {
            corrupt_bit: None,
            corrupt_item: None,
            only: None,
        };
        assert_eq!(run(args, FrameConfig::default(), OutputFormat::Json).unwrap(), 0);
    }
}
