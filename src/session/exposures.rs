// SPDX-License-Identifier: GPL-3.0-only

//! Film-style exposure counter

use crate::constants::exposures::MAX_EXPOSURES;

/// Remaining shots on the roll
///
/// Consumed by captures and returned by deletes, never above `max`. This is a
/// returnable resource rather than an inventory: each delete gives back one
/// exposure regardless of how many photos were ever taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exposures {
    remaining: u32,
    max: u32,
}

impl Exposures {
    /// Full roll of `max` exposures, capped at [`MAX_EXPOSURES`]
    pub fn new(max: u32) -> Self {
        let max = max.min(MAX_EXPOSURES);
        Self {
            remaining: max,
            max,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Consume one exposure; false if the roll is empty
    pub fn take(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    /// Give one exposure back; false if already at the cap
    pub fn restore(&mut self) -> bool {
        if self.remaining >= self.max {
            return false;
        }
        self.remaining += 1;
        true
    }
}

impl Default for Exposures {
    fn default() -> Self {
        Self::new(MAX_EXPOSURES)
    }
}
