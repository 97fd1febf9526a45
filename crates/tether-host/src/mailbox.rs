//! Lock-free control-rate mailbox.
//!
//! The audio-block context posts the control values of each block into a
//! fixed set of atomic slots and raises a pending flag. The message context
//! drains the slots on its own schedule and clears the flag. Posting never
//! waits for the drain: if the previous values have not been delivered yet,
//! they are overwritten and only the latest block is reported.

use std::sync::atomic::{AtomicBool, Ordering};

use atomic_float::AtomicF32;
use tether_core::{Atom, Sample};

/// Single-slot mailbox for one block's worth of control values.
#[derive(Debug)]
pub struct ControlMailbox {
    slots: Box<[AtomicF32]>,
    pending: AtomicBool,
}

impl ControlMailbox {
    /// Mailbox with `channels` slots. Allocates; call from the message context.
    pub fn new(channels: usize) -> Self {
        Self {
            slots: (0..channels).map(|_| AtomicF32::new(0.0)).collect(),
            pending: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.slots.len()
    }

    /// Store the latest values. Extra values are ignored.
    ///
    /// Returns `true` if the mailbox was empty, meaning a drain has to be
    /// scheduled; `false` if a drain is already pending.
    ///
    /// Real-time safe: no allocation, no locking.
    #[inline]
    pub fn post(&self, values: &[Sample]) -> bool {
        for (slot, value) in self.slots.iter().zip(values) {
            slot.store(*value, Ordering::Relaxed);
        }
        !self.pending.swap(true, Ordering::AcqRel)
    }

    /// Whether values are waiting to be drained.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Take the staged values as host atoms.
    ///
    /// Returns `None` if nothing was posted since the last drain.
    pub fn drain(&self) -> Option<Vec<Atom>> {
        if !self.pending.swap(false, Ordering::AcqRel) {
            return None;
        }
        Some(
            self.slots
                .iter()
                .map(|slot| Atom::from(slot.load(Ordering::Relaxed)))
                .collect(),
        )
    }
}
