use bytes::Bytes;

use crate::codec::FrameConfig;
use crate::error::{FrameError, Malformed, Result};

/// How the payload bytes of a frame are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PayloadKind {
    Text = 0,
    Binary = 1,
}

impl PayloadKind {
    /// Wire tag for this kind.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Parse a wire tag.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PayloadKind::Text),
            1 => Some(PayloadKind::Binary),
            _ => None,
        }
    }

    /// Largest payload of this kind a frame may carry under `config`.
    ///
    /// Text keeps one byte in reserve so a display terminator always fits.
    pub fn capacity(self, config: &FrameConfig) -> usize {
        let max = usize::from(config.max_payload_size);
        match self {
            PayloadKind::Text => max.saturating_sub(1),
            PayloadKind::Binary => max,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PayloadKind::Text => "text",
            PayloadKind::Binary => "binary",
        }
    }
}

/// A typed frame payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Bytes),
}

impl Payload {
    /// Validate `bytes` as a payload of `kind` for transmission.
    pub fn encode(kind: PayloadKind, bytes: &[u8], config: &FrameConfig) -> Result<Self> {
        let max = kind.capacity(config);
        if bytes.len() > max {
            return Err(FrameError::PayloadTooLarge {
                size: bytes.len(),
                max,
            });
        }
        match kind {
            PayloadKind::Text => std::str::from_utf8(bytes)
                .map(|text| Payload::Text(text.to_owned()))
                .map_err(|err| FrameError::InvalidText {
                    valid_up_to: err.valid_up_to(),
                }),
            PayloadKind::Binary => Ok(Payload::Binary(Bytes::copy_from_slice(bytes))),
        }
    }

    /// Interpret exactly `bytes` as a payload of `kind`.
    ///
    /// Length checks belong to the frame decoder; this never truncates.
    pub fn decode(kind: PayloadKind, bytes: Bytes) -> std::result::Result<Self, Malformed> {
        match kind {
            PayloadKind::Text => String::from_utf8(bytes.to_vec())
                .map(Payload::Text)
                .map_err(|err| Malformed::InvalidText {
                    valid_up_to: err.utf8_error().valid_up_to(),
                }),
            PayloadKind::Binary => Ok(Payload::Binary(bytes)),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Text(_) => PayloadKind::Text,
            Payload::Binary(_) => PayloadKind::Binary,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Binary(bytes) => bytes.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Binary(_) => None,
        }
    }

    /// Payload bytes followed by a single NUL, for C-style display consumers.
    ///
    /// Never sent on the wire.
    pub fn display_terminated(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len() + 1);
        out.extend_from_slice(self.as_bytes());
        out.push(0);
        out
    }
}
