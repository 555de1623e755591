//! Build → transmit → decode, one message at a time.

use crate::builder::FrameBuilder;
use crate::channel::Channel;
use crate::codec::Frame;
use crate::decoder::FrameDecoder;
use crate::error::{FrameError, Result};
use crate::payload::PayloadKind;

/// Lifecycle stage of a single message. `Valid` and `Invalid` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Built,
    Serialized,
    InTransit,
    Valid,
    Invalid,
}

/// The result of moving one message across a channel.
#[derive(Debug, Clone)]
pub struct Transfer {
    /// ID assigned by the builder, if the build got that far.
    pub sent_id: Option<u16>,
    /// Checksum stamped by the builder.
    pub sent_checksum: Option<u32>,
    /// Bytes handed to the decoder.
    pub received_len: usize,
    pub stage: Stage,
    pub outcome: Result<Frame>,
}

impl Transfer {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    fn rejected_at_build(err: FrameError) -> Self {
        Self {
            sent_id: None,
            sent_checksum: None,
            received_len: 0,
            stage: Stage::Invalid,
            outcome: Err(err),
        }
    }
}

/// Move one payload through `channel`.
///
/// Never panics on bad input: build and decode failures both end up in
/// [`Transfer::outcome`].
pub fn transfer<C: Channel>(
    builder: &FrameBuilder,
    channel: &mut C,
    decoder: &FrameDecoder,
    kind: PayloadKind,
    bytes: &[u8],
) -> Transfer {
    let frame = match builder.build(bytes, kind) {
        Ok(frame) => frame,
        Err(err) => {
            tracing::debug!(error = %err, "build rejected payload");
            return Transfer::rejected_at_build(err);
        }
    };
    let message_id = frame.message_id();
    tracing::trace!(message_id, stage = ?Stage::Built);

    let wire = frame.serialize();
    tracing::trace!(message_id, stage = ?Stage::Serialized, len = wire.len());

    let received = channel.transmit(&wire);
    tracing::trace!(message_id, stage = ?Stage::InTransit, len = received.len());

    let outcome = decoder.decode(&received);
    let stage = if outcome.is_ok() {
        Stage::Valid
    } else {
        Stage::Invalid
    };
    tracing::trace!(message_id, stage = ?stage);

    Transfer {
        sent_id: Some(message_id),
        sent_checksum: Some(frame.checksum()),
        received_len: received.len(),
        stage,
        outcome,
    }
}

/// Transfers for a batch, in input order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub transfers: Vec<Transfer>,
}

impl BatchReport {
    pub fn failures(&self) -> usize {
        self.transfers.iter().filter(|t| !t.is_valid()).count()
    }

    pub fn successes(&self) -> usize {
        self.transfers.len() - self.failures()
    }
}

/// Transfer every item in order. A failed item never stops the batch.
pub fn run_batch<'a, C, I>(
    builder: &FrameBuilder,
    channel: &mut C,
    decoder: &FrameDecoder,
    items: I,
) -> BatchReport
where
    C: Channel,
    I: IntoIterator<Item = (PayloadKind, &'a [u8])>,
{
    let transfers = items
        .into_iter()
        .map(|(kind, bytes)| transfer(builder, channel, decoder, kind, bytes))
        .collect();
    BatchReport { transfers }
}
