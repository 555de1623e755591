//! Canned payloads for exercising the link end to end.

use modemsim_frame::PayloadKind;

pub const TEXT_VECTORS: [&str; 4] = [
    "Now is the winter of our discontent.",
    "The quick brown fox jumps over the lazy dog.",
    "We are the music makers, and we are the dreamers of dreams...",
    "Two roads diverged in a wood, and I, I took the one less traveled by, And that has made all the difference..",
];

pub const BINARY_VECTORS: [&[u8]; 4] = [
    &[0xDE, 0xAD, 0xBE, 0xEF],
    &[0xA5, 0x5A, 0xA5, 0x5A, 0xA5, 0x5A],
    &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08],
    &[
        0x01, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x02, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0x03, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x04, 0xFF, 0x00, 0xFF, 0xFF,
        0xFF, 0xFF,
    ],
];

/// All vectors as `(kind, bytes)`, text first.
pub fn all() -> Vec<(PayloadKind, &'static [u8])> {
    let text = TEXT_VECTORS
        .into_iter()
        .map(|s| (PayloadKind::Text, s.as_bytes()));
    let binary = BINARY_VECTORS
        .into_iter()
        .map(|b| (PayloadKind::Binary, b));
    text.chain(binary).collect()
}

/// Vectors of one kind only.
pub fn of_kind(kind: PayloadKind) -> Vec<(PayloadKind, &'static [u8])> {
    all().into_iter().filter(|(k, _)| *k == kind).collect()
}

#[cfg(test)]
mod tests {
    use modemsim_frame::{run_batch, FrameBuilder, FrameDecoder, Loopback, MAX_PAYLOAD};

    use super::*;

    #[test]
    fn vectors_fit_default_capacity() {
        for s in TEXT_VECTORS {
            assert!(s.len() < usize::from(MAX_PAYLOAD));
        }
        for b in BINARY_VECTORS {
            assert!(b.len() <= usize::from(MAX_PAYLOAD));
        }
    }

    #[test]
    fn binary_vector_lengths() {
        let lens: Vec<usize> = BINARY_VECTORS.iter().map(|b| b.len()).collect();
        assert_eq!(lens, vec![4, 6, 9, 32]);
    }

    #[test]
    fn all_vectors_transfer_cleanly() {
        let report = run_batch(
            &FrameBuilder::new(),
            &mut Loopback,
            &FrameDecoder::new(),
            all(),
        );
        assert_eq!(report.transfers.len(), 8);
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn filter_by_kind() {
        assert_eq!(of_kind(PayloadKind::Text).len(), 4);
        assert!(of_kind(PayloadKind::Binary)
            .iter()
            .all(|(k, _)| *k == PayloadKind::Binary));
    }
}
