/// Errors that can occur while building or decoding frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds the capacity for its kind.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Text payload bytes are not valid UTF-8.
    #[error("text payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidText { valid_up_to: usize },

    /// The message counter has already issued its last ID.
    #[error("message ID space exhausted")]
    IdsExhausted,

    /// The received buffer is structurally invalid.
    #[error("malformed frame: {0}")]
    Malformed(#[from] Malformed),

    /// The CRC-32 trailer does not match the received header and payload.
    #[error("CRC mismatch on message #{message_id} (embedded 0x{embedded:08X}, computed 0x{computed:08X})")]
    CrcMismatch {
        message_id: u16,
        embedded: u32,
        computed: u32,
    },
}

impl FrameError {
    /// True for errors raised while receiving, as opposed to building.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, FrameError::Malformed(_) | FrameError::CrcMismatch { .. })
    }
}

/// Structural problems found before (or instead of) checksum verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    /// Fewer bytes than an empty frame needs.
    #[error("buffer holds {len} bytes, minimum frame is {min}")]
    TooShort { len: usize, min: usize },

    /// Declared payload length is above the configured capacity.
    #[error("declared payload length {declared} exceeds maximum {max}")]
    LengthOverLimit { declared: usize, max: usize },

    /// Declared payload length disagrees with the buffer size.
    #[error("declared payload length {declared} implies {expected} bytes, buffer holds {actual}")]
    LengthMismatch {
        declared: usize,
        expected: usize,
        actual: usize,
    },

    /// Payload kind tag is neither text nor binary.
    #[error("unknown payload kind tag 0x{0:02X}")]
    UnknownKind(u8),

    /// Text frame whose payload is not valid UTF-8.
    #[error("text payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidText { valid_up_to: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
