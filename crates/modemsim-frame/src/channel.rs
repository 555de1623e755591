//! Simulated transmission channels.
//!
//! A channel takes the serialized bytes handed over by the sender and returns
//! what the receiver sees. [`Loopback`] is a perfect link; the others inject
//! faults for exercising the decoder.

use bytes::{Bytes, BytesMut};

/// A one-shot, in-memory link between frame builder and frame decoder.
pub trait Channel {
    /// Carry `wire` across the link.
    fn transmit(&mut self, wire: &[u8]) -> Bytes;
}

impl<C: Channel + ?Sized> Channel for &mut C {
    fn transmit(&mut self, wire: &[u8]) -> Bytes {
        (**self).transmit(wire)
    }
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn transmit(&mut self, wire: &[u8]) -> Bytes {
        (**self).transmit(wire)
    }
}

/// Delivers bytes unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Loopback;

impl Channel for Loopback {
    fn transmit(&mut self, wire: &[u8]) -> Bytes {
        Bytes::copy_from_slice(wire)
    }
}

/// Flips a single bit. Bit 0 is the least significant bit of byte 0.
///
/// The index wraps around the buffer's bit length, so any index hits some
/// bit of a non-empty buffer.
#[derive(Debug, Clone, Copy)]
pub struct BitFlip {
    pub bit: usize,
}

impl Channel for BitFlip {
    fn transmit(&mut self, wire: &[u8]) -> Bytes {
        let mut out = BytesMut::from(wire);
        if !out.is_empty() {
            let bit = self.bit % (out.len() * 8);
            out[bit / 8] ^= 1 << (bit % 8);
            tracing::trace!(bit, "channel flipped bit");
        }
        out.freeze()
    }
}

/// Delivers at most the first `len` bytes.
#[derive(Debug, Clone, Copy)]
pub struct Truncate {
    pub len: usize,
}

impl Channel for Truncate {
    fn transmit(&mut self, wire: &[u8]) -> Bytes {
        Bytes::copy_from_slice(&wire[..self.len.min(wire.len())])
    }
}

/// Overwrites bytes starting at `offset`. Writes past the end are dropped.
#[derive(Debug, Clone)]
pub struct Overwrite {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl Channel for Overwrite {
    fn transmit(&mut self, wire: &[u8]) -> Bytes {
        let mut out = BytesMut::from(wire);
        for (i, byte) in self.bytes.iter().enumerate() {
            if let Some(slot) = out.get_mut(self.offset + i) {
                *slot = *byte;
            }
        }
        out.freeze()
    }
}
