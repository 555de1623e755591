use bytes::{BufMut, Bytes, BytesMut};

use crate::checksum::Crc32;
use crate::payload::{Payload, PayloadKind};

/// Frame header: message ID (2) + kind (1) + length (2) = 5 bytes.
pub const HEADER_SIZE: usize = 5;

/// Frame trailer: CRC-32 (4 bytes).
pub const TRAILER_SIZE: usize = 4;

/// Default maximum payload size, in bytes.
pub const MAX_PAYLOAD: u16 = 110;

/// Largest frame produced under the default configuration.
pub const MAX_FRAME_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD as usize + TRAILER_SIZE;

/// A framed message.
///
/// Frames are immutable. `payload_len` is always the payload's own length and
/// `checksum` always covers the header and payload as they go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    message_id: u16,
    payload: Payload,
    checksum: u32,
}

impl Frame {
    /// Assemble a frame and stamp its checksum.
    ///
    /// Callers are responsible for the payload fitting in a `u16` length.
    pub(crate) fn seal(message_id: u16, payload: Payload) -> Self {
        let checksum = frame_checksum(message_id, payload.kind(), payload.as_bytes());
        Self {
            message_id,
            payload,
            checksum,
        }
    }

    /// Used by the decoder once `checksum` has been verified.
    pub(crate) fn from_verified(message_id: u16, payload: Payload, checksum: u32) -> Self {
        Self {
            message_id,
            payload,
            checksum,
        }
    }

    pub fn message_id(&self) -> u16 {
        self.message_id
    }

    pub fn kind(&self) -> PayloadKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn payload_len(&self) -> u16 {
        // Bounded by FrameConfig::max_payload_size, which is a u16.
        self.payload.len() as u16
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// The total wire size of this frame (header + payload + trailer).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len() + TRAILER_SIZE
    }

    /// Serialize into a fresh buffer.
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_size());
        encode_frame(self, &mut buf);
        buf.freeze()
    }
}

/// Encode a frame into the wire format.
///
/// Wire format (all integers little-endian):
/// ```text
/// ┌────────────┬──────────┬────────────┬──────────────────┬────────────┐
/// │ Message ID │ Kind     │ Length     │ Payload          │ CRC-32     │
/// │ (2B LE)    │ (1B)     │ (2B LE)    │ (Length bytes)   │ (4B LE)    │
/// └────────────┴──────────┴────────────┴──────────────────┴────────────┘
/// ```
///
/// The CRC covers the header and payload, never the trailer itself.
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) {
    dst.reserve(frame.wire_size());
    dst.put_slice(&header_bytes(
        frame.message_id,
        frame.kind().tag(),
        frame.payload_len(),
    ));
    dst.put_slice(frame.payload.as_bytes());
    dst.put_u32_le(frame.checksum);
}

pub(crate) fn header_bytes(message_id: u16, kind_tag: u8, payload_len: u16) -> [u8; HEADER_SIZE] {
    let id = message_id.to_le_bytes();
    let len = payload_len.to_le_bytes();
    [id[0], id[1], kind_tag, len[0], len[1]]
}

fn frame_checksum(message_id: u16, kind: PayloadKind, payload: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(&header_bytes(message_id, kind.tag(), payload.len() as u16));
    crc.update(payload);
    crc.finalize()
}

/// Configuration shared by the frame builder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: [`MAX_PAYLOAD`].
    pub max_payload_size: u16,
}

impl FrameConfig {
    /// Largest frame this configuration admits.
    pub fn max_frame_size(&self) -> usize {
        HEADER_SIZE + usize::from(self.max_payload_size) + TRAILER_SIZE
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::crc32;

    #[test]
    fn header_layout_is_little_endian() {
        assert_eq!(header_bytes(0x0102, 1, 0x0304), [0x02, 0x01, 0x01, 0x04, 0x03]);
    }

    #[test]
    fn serialized_layout() {
        let frame = Frame::seal(7, Payload::Binary(Bytes::from_static(&[0xAA, 0xBB])));
        let wire = frame.serialize();

        assert_eq!(wire.len(), HEADER_SIZE + 2 + TRAILER_SIZE);
        assert_eq!(&wire[..HEADER_SIZE], &[0x07, 0x00, 0x01, 0x02, 0x00]);
        assert_eq!(&wire[HEADER_SIZE..HEADER_SIZE + 2], &[0xAA, 0xBB]);

        let trailer = u32::from_le_bytes(wire[HEADER_SIZE + 2..].try_into().unwrap());
        assert_eq!(trailer, frame.checksum());
        assert_eq!(trailer, crc32(&wire[..HEADER_SIZE + 2]));
    }

    #[test]
    fn checksum_tracks_payload_length_not_capacity() {
        let frame = Frame::seal(1, Payload::Text("hi".to_string()));
        let wire = frame.serialize();
        assert_eq!(frame.checksum(), crc32(&wire[..HEADER_SIZE + 2]));
        assert_eq!(wire.len(), frame.wire_size());
    }

    #[test]
    fn empty_payload() {
        let frame = Frame::seal(9, Payload::Text(String::new()));
        assert_eq!(frame.payload_len(), 0);
        assert_eq!(frame.wire_size(), HEADER_SIZE + TRAILER_SIZE);
    }

    #[test]
    fn kind_changes_checksum() {
        let text = Frame::seal(1, Payload::Text("abc".to_string()));
        let binary = Frame::seal(1, Payload::Binary(Bytes::from_static(b"abc")));
        assert_ne!(text.checksum(), binary.checksum());
    }

    #[test]
    fn encode_appends_to_existing_buffer() {
        let mut buf = BytesMut::new();
        let first = Frame::seal(1, Payload::Text("one".to_string()));
        let second = Frame::seal(2, Payload::Text("two".to_string()));
        encode_frame(&first, &mut buf);
        encode_frame(&second, &mut buf);
        assert_eq!(buf.len(), first.wire_size() + second.wire_size());
        assert_eq!(&buf[first.wire_size()..], second.serialize().as_ref());
    }

    #[test]
    fn default_config_frame_size() {
        assert_eq!(FrameConfig::default().max_frame_size(), MAX_FRAME_SIZE);
        assert_eq!(MAX_FRAME_SIZE, 5 + 110 + 4);
    }
}
