use bytes::Bytes;

use crate::checksum::crc32;
use crate::codec::{Frame, FrameConfig, HEADER_SIZE, TRAILER_SIZE};
use crate::error::{FrameError, Malformed, Result};
use crate::payload::{Payload, PayloadKind};

/// Decodes received buffers into verified frames.
#[derive(Debug, Clone, Default)]
pub struct FrameDecoder {
    config: FrameConfig,
}

impl FrameDecoder {
    /// Create a frame decoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame decoder with explicit configuration.
    pub fn with_config(config: FrameConfig) -> Self {
        Self { config }
    }

    /// Decode one complete frame.
    pub fn decode(&self, raw: &[u8]) -> Result<Frame> {
        decode_frame(raw, &self.config)
    }

    /// Current decoder configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

/// Decode a buffer holding exactly one frame.
///
/// Structure is validated before the checksum: a buffer whose length field
/// disagrees with its size is `Malformed`, never `CrcMismatch`. The kind tag
/// and text encoding are only interpreted once the checksum has passed.
pub fn decode_frame(raw: &[u8], config: &FrameConfig) -> Result<Frame> {
    let min = HEADER_SIZE + TRAILER_SIZE;
    if raw.len() < min {
        return Err(Malformed::TooShort { len: raw.len(), min }.into());
    }

    let message_id = u16::from_le_bytes([raw[0], raw[1]]);
    let kind_tag = raw[2];
    let declared = usize::from(u16::from_le_bytes([raw[3], raw[4]]));

    let max = usize::from(config.max_payload_size);
    if declared > max {
        return Err(Malformed::LengthOverLimit { declared, max }.into());
    }

    let expected = HEADER_SIZE + declared + TRAILER_SIZE;
    if raw.len() != expected {
        return Err(Malformed::LengthMismatch {
            declared,
            expected,
            actual: raw.len(),
        }
        .into());
    }

    let body_end = HEADER_SIZE + declared;
    let computed = crc32(&raw[..body_end]);
    let embedded = u32::from_le_bytes([
        raw[body_end],
        raw[body_end + 1],
        raw[body_end + 2],
        raw[body_end + 3],
    ]);
    if computed != embedded {
        tracing::warn!(
            message_id,
            embedded = format_args!("0x{embedded:08X}"),
            computed = format_args!("0x{computed:08X}"),
            "CRC mismatch, discarding frame"
        );
        return Err(FrameError::CrcMismatch {
            message_id,
            embedded,
            computed,
        });
    }

    let kind = PayloadKind::from_tag(kind_tag).ok_or(Malformed::UnknownKind(kind_tag))?;
    let payload = Payload::decode(kind, Bytes::copy_from_slice(&raw[HEADER_SIZE..body_end]))?;

    tracing::debug!(message_id, kind = kind.name(), len = declared, "frame decoded");
    Ok(Frame::from_verified(message_id, payload, computed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FrameBuilder;
    use crate::checksum::Crc32;
    use crate::codec::header_bytes;

    fn wire_with(message_id: u16, kind_tag: u8, payload: &[u8]) -> Vec<u8> {
        let header = header_bytes(message_id, kind_tag, payload.len() as u16);
        let mut crc = Crc32::new();
        crc.update(&header);
        crc.update(payload);

        let mut wire = header.to_vec();
        wire.extend_from_slice(payload);
        wire.extend_from_slice(&crc.finalize().to_le_bytes());
        wire
    }

    #[test]
    fn decode_roundtrip() {
        let frame = FrameBuilder::new().build_text("hello, modem!").unwrap();
        let decoded = FrameDecoder::new().decode(&frame.serialize()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn too_short() {
        let err = FrameDecoder::new().decode(&[0x01, 0x00, 0x00]).unwrap_err();
        assert_eq!(
            err,
            FrameError::Malformed(Malformed::TooShort { len: 3, min: 9 })
        );
    }

    #[test]
    fn empty_buffer() {
        let err = FrameDecoder::new().decode(&[]).unwrap_err();
        assert!(matches!(err, FrameError::Malformed(Malformed::TooShort { len: 0, .. })));
    }

    #[test]
    fn declared_length_longer_than_buffer() {
        let mut raw = vec![0u8; 50];
        raw[0] = 1;
        raw[2] = PayloadKind::Binary.tag();
        raw[3..5].copy_from_slice(&200u16.to_le_bytes());

        let config = FrameConfig {
            max_payload_size: 255,
        };
        let err = decode_frame(&raw, &config).unwrap_err();
        assert_eq!(
            err,
            FrameError::Malformed(Malformed::LengthMismatch {
                declared: 200,
                expected: 209,
                actual: 50,
            })
        );
    }

    #[test]
    fn declared_length_over_limit() {
        let mut raw = wire_with(1, 1, &[0u8; 8]);
        raw[3..5].copy_from_slice(&200u16.to_le_bytes());
        let err = FrameDecoder::new().decode(&raw).unwrap_err();
        assert_eq!(
            err,
            FrameError::Malformed(Malformed::LengthOverLimit {
                declared: 200,
                max: 110,
            })
        );
    }

    #[test]
    fn trailing_garbage_is_malformed() {
        let mut raw = FrameBuilder::new().build_binary(b"abc").unwrap().serialize().to_vec();
        raw.push(0x00);
        let err = FrameDecoder::new().decode(&raw).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Malformed(Malformed::LengthMismatch { declared: 3, .. })
        ));
    }

    #[test]
    fn corrupted_payload_reports_both_checksums() {
        let frame = FrameBuilder::new().build_text("checksum me").unwrap();
        let mut raw = frame.serialize().to_vec();
        raw[HEADER_SIZE] ^= 0x20;

        match FrameDecoder::new().decode(&raw).unwrap_err() {
            FrameError::CrcMismatch {
                message_id,
                embedded,
                computed,
            } => {
                assert_eq!(message_id, 1);
                assert_eq!(embedded, frame.checksum());
                assert_eq!(computed, crc32(&raw[..raw.len() - TRAILER_SIZE]));
                assert_ne!(embedded, computed);
            }
            other => panic!("expected CrcMismatch, got {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_with_valid_crc() {
        let raw = wire_with(4, 0x07, b"??");
        let err = FrameDecoder::new().decode(&raw).unwrap_err();
        assert_eq!(err, FrameError::Malformed(Malformed::UnknownKind(0x07)));
    }

    #[test]
    fn invalid_utf8_text_with_valid_crc() {
        let raw = wire_with(5, PayloadKind::Text.tag(), &[b'h', 0xFF, b'i']);
        let err = FrameDecoder::new().decode(&raw).unwrap_err();
        assert_eq!(
            err,
            FrameError::Malformed(Malformed::InvalidText { valid_up_to: 1 })
        );
    }

    #[test]
    fn decoded_frame_carries_recomputed_checksum() {
        let raw = wire_with(9, PayloadKind::Binary.tag(), &[0x00, 0x01]);
        let frame = FrameDecoder::new().decode(&raw).unwrap();
        assert_eq!(frame.checksum(), crc32(&raw[..HEADER_SIZE + 2]));
        assert_eq!(frame.message_id(), 9);
    }

    #[test]
    fn decoder_rejects_frames_above_its_own_limit() {
        let frame = FrameBuilder::new().build_binary(&[0u8; 20]).unwrap();
        let decoder = FrameDecoder::with_config(FrameConfig {
            max_payload_size: 16,
        });
        let err = decoder.decode(&frame.serialize()).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Malformed(Malformed::LengthOverLimit { declared: 20, max: 16 })
        ));
    }
}
