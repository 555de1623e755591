//! Length-prefixed, CRC-32 checked message framing for a simulated modem link.
//!
//! Every message is framed with:
//! - A 2-byte little-endian message ID drawn from a [`MessageCounter`]
//! - A 1-byte payload kind tag (0 = text, 1 = binary)
//! - A 2-byte little-endian payload length
//! - The payload itself
//! - A 4-byte little-endian CRC-32 trailer over everything before it
//!
//! The length is always explicit. Nothing scans for terminators and nothing
//! depends on in-memory struct layout.

pub mod builder;
pub mod channel;
pub mod checksum;
pub mod codec;
pub mod counter;
pub mod decoder;
pub mod error;
pub mod link;
pub mod payload;

pub use builder::FrameBuilder;
pub use channel::{BitFlip, Channel, Loopback, Overwrite, Truncate};
pub use checksum::{crc32, Crc32};
pub use codec::{
    encode_frame, Frame, FrameConfig, HEADER_SIZE, MAX_FRAME_SIZE, MAX_PAYLOAD, TRAILER_SIZE,
};
pub use counter::MessageCounter;
pub use decoder::{decode_frame, FrameDecoder};
pub use error::{FrameError, Malformed, Result};
pub use link::{run_batch, transfer, BatchReport, Stage, Transfer};
pub use payload::{Payload, PayloadKind};
