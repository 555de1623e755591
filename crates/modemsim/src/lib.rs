//! Frame, transmit and verify messages over a simulated modem link.
//!
//! # Crate Structure
//!
//! - [`frame`] — Frame builder and decoder, CRC-32, payload codec, simulated channels
//! - [`vectors`] — The canned text and binary payloads the `run` command sends

/// Re-export frame types.
pub mod frame {
    pub use modemsim_frame::*;
}

pub mod vectors;
