use std::sync::Arc;

use crate::codec::{Frame, FrameConfig};
use crate::counter::MessageCounter;
use crate::error::Result;
use crate::payload::{Payload, PayloadKind};

/// Builds checksummed frames, numbering them from its own counter.
///
/// Builders that should share one ID sequence can be created with
/// [`FrameBuilder::with_counter`].
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    counter: Arc<MessageCounter>,
    config: FrameConfig,
}

impl FrameBuilder {
    /// Create a frame builder with default configuration and a fresh counter.
    pub fn new() -> Self {
        Self::with_config(FrameConfig::default())
    }

    /// Create a frame builder with explicit configuration and a fresh counter.
    pub fn with_config(config: FrameConfig) -> Self {
        Self::with_counter(Arc::new(MessageCounter::new()), config)
    }

    /// Create a frame builder drawing IDs from an existing counter.
    pub fn with_counter(counter: Arc<MessageCounter>, config: FrameConfig) -> Self {
        Self { counter, config }
    }

    /// Build a frame from raw payload bytes of the given kind.
    ///
    /// The payload is validated before an ID is drawn, so a rejected payload
    /// leaves the counter untouched.
    pub fn build(&self, bytes: &[u8], kind: PayloadKind) -> Result<Frame> {
        let payload = Payload::encode(kind, bytes, &self.config)?;
        let message_id = self.counter.next_id()?;
        let frame = Frame::seal(message_id, payload);

        tracing::debug!(
            message_id,
            kind = kind.name(),
            len = frame.payload_len(),
            checksum = format_args!("0x{:08X}", frame.checksum()),
            "frame built"
        );
        Ok(frame)
    }

    pub fn build_text(&self, text: &str) -> Result<Frame> {
        self.build(text.as_bytes(), PayloadKind::Text)
    }

    pub fn build_binary(&self, bytes: &[u8]) -> Result<Frame> {
        self.build(bytes, PayloadKind::Binary)
    }

    /// The counter this builder draws IDs from.
    pub fn counter(&self) -> &Arc<MessageCounter> {
        &self.counter
    }

    /// Current builder configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}
