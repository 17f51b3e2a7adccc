//! Epoch-stamped visited sets for taxonomy traversals.
//!
//! Clearing is O(1): instead of zeroing every flag, the set bumps its epoch and
//! treats any stamp from an older epoch as "not visited". A query that touches
//! a few dozen ancestors of a 300k-vertex taxonomy therefore never pays for a
//! full reset.

/// A dense, slot-indexed visited set with O(1) clearing.
#[derive(Debug, Clone)]
pub(crate) struct VisitedSet {
    stamps: Vec<u32>,
    epoch: u32,
}

impl Default for VisitedSet {
    fn default() -> Self {
        Self::new(0)
    }
}

impl VisitedSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            stamps: vec![0; len],
            epoch: 1,
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.stamps.len()
    }

    /// Forgets every mark and makes room for `len` slots.
    pub(crate) fn reset(&mut self, len: usize) {
        if self.stamps.len() < len {
            self.stamps.resize(len, 0);
        }
        self.clear();
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        if self.epoch == u32::MAX {
            self.stamps.iter_mut().for_each(|s| *s = 0);
            self.epoch = 1;
        } else {
            self.epoch += 1;
        }
    }

    /// Returns `true` iff this call observed the slot as not-yet-visited and marks it visited.
    #[inline(always)]
    pub(crate) fn try_visit(&mut self, slot: usize) -> bool {
        let stamp = &mut self.stamps[slot];
        if *stamp == self.epoch {
            false
        } else {
            *stamp = self.epoch;
            true
        }
    }

    #[inline(always)]
    pub(crate) fn is_visited(&self, slot: usize) -> bool {
        self.stamps.get(slot).is_some_and(|&s| s == self.epoch)
    }
}
