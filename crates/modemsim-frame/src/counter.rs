use std::sync::atomic::{AtomicU16, Ordering};

use crate::error::{FrameError, Result};

/// Source of message IDs.
///
/// IDs start at 1 and strictly increase. Once `u16::MAX` has been handed out the
/// counter is exhausted; it never wraps back to an ID it already issued.
#[derive(Debug)]
pub struct MessageCounter {
    // Next ID to hand out; 0 means exhausted.
    next: AtomicU16,
}

impl MessageCounter {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// A counter whose first ID is `first`. `0` yields an exhausted counter.
    pub fn starting_at(first: u16) -> Self {
        Self {
            next: AtomicU16::new(first),
        }
    }

    /// Take the next ID.
    pub fn next_id(&self) -> Result<u16> {
        let issued = self
            .next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                if next == 0 {
                    None
                } else {
                    // u16::MAX is issued last; 0 marks the counter spent.
                    Some(next.checked_add(1).unwrap_or(0))
                }
            })
            .map_err(|_| FrameError::IdsExhausted)?;
        Ok(issued)
    }

    /// The ID the next call to [`next_id`](Self::next_id) would return.
    pub fn peek(&self) -> Option<u16> {
        match self.next.load(Ordering::Acquire) {
            0 => None,
            id => Some(id),
        }
    }
}

impl Default for MessageCounter {
    fn default() -> Self {
        Self::new()
    }
}
