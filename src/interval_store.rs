//! Per-section sorted interval store used by the greedy scheduler (C2).
//!
//! One store exists per section for the lifetime of a single `schedule()`
//! call; it is never shared across sections or across calls.

/// One already-placed occupancy, `[entry, exit)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub entry: u64,
    pub exit: u64,
}

/// Sorted (by `entry`), non-overlapping occupancy list for one section.
#[derive(Debug, Clone, Default)]
pub struct IntervalStore {
    items: Vec<Interval>,
}

impl IntervalStore {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The smallest `entry >= start` such that `[entry, entry+traverse)`
    /// avoids every block window and clears headway against every stored
    /// interval on both sides.
    ///
    /// Scan-and-shift: a forward shift of `entry` can uncover an earlier
    /// neighbor or step into a block that a smaller `entry` had already
    /// cleared, so every shift restarts the scan from the beginning. Each
    /// restart strictly increases `entry`, bounded by the combined count of
    /// stored intervals and block windows — the loop always terminates.
    #[must_use]
    pub fn find_earliest(
        &self,
        start: u64,
        headway: u64,
        traverse: u64,
        blocks: &[(u64, u64)],
    ) -> u64 {
        let mut entry = start;
        loop {
            let mut moved_for_block = false;
            for &(a, b) in blocks {
                if !(entry + traverse <= a || entry >= b) {
                    entry = b;
                    moved_for_block = true;
                }
            }
            if moved_for_block {
                continue;
            }

            let mut restarted = false;
            for cur in &self.items {
                let earliest_after_prev = cur.exit + headway;
                let clears_before = entry + traverse + headway <= cur.entry;
                let clears_after = entry >= earliest_after_prev;
                if !clears_before && !clears_after {
                    entry = entry.max(earliest_after_prev);
                    restarted = true;
                    break;
                }
            }
            if restarted {
                continue;
            }
            break;
        }
        entry
    }

    /// Insert an interval, keeping the list sorted by `entry`.
    pub fn insert(&mut self, interval: Interval) {
        let idx = self
            .items
            .partition_point(|existing| existing.entry <= interval.entry);
        self.items.insert(idx, interval);
    }
}
