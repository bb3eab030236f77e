use std::ops::Range;

use log::debug;
use rand::{Rng, seq::SliceRandom};

/// The order in which a generator visits the rows of its data pack.
///
/// Holds one permutation of `0..num_instances` per epoch, redrawn from its own rng
/// when shuffling, and a cursor over the batches of that permutation.
#[derive(Debug)]
pub struct IndexOrder<R: Rng> {
    rng: R,
    shuffle: bool,
    indices: Vec<usize>,

    batch_index: usize,
    total_batches_seen: usize,
    epochs_seen: usize,
}

impl<R: Rng> IndexOrder<R> {
    /// Creates a new `IndexOrder` and draws its first permutation.
    ///
    /// # Arguments
    /// * `num_instances` - The amount of rows to order.
    /// * `shuffle` - Whether to permute the rows on every epoch.
    /// * `rng` - A random number generator.
    pub fn new(num_instances: usize, shuffle: bool, rng: R) -> Self {
        let mut order = Self {
            rng,
            shuffle,
            indices: Vec::with_capacity(num_instances),
            batch_index: 0,
            total_batches_seen: 0,
            epochs_seen: 0,
        };

        order.indices.extend(0..num_instances);
        order.redraw();
        order
    }

    /// Draws the permutation for a new epoch, a no-op when not shuffling.
    pub fn redraw(&mut self) {
        if !self.shuffle {
            return;
        }

        self.indices.shuffle(&mut self.rng);
        debug!(num_instances = self.indices.len(); "redrew index order");
    }

    /// The current permutation.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Returns the range of `indices` for the `idx`-th batch of `batch_size` rows.
    ///
    /// The last batch may be shorter, positions past the end give an empty range.
    pub fn batch_range(&self, idx: usize, batch_size: usize) -> Range<usize> {
        let len = self.indices.len();
        let start = idx.saturating_mul(batch_size).min(len);
        let end = start.saturating_add(batch_size).min(len);
        start..end
    }

    /// Moves the cursor back to the first batch of an epoch.
    #[inline]
    pub fn reset(&mut self) {
        self.batch_index = 0;
    }

    /// Returns the range of `indices` under the cursor and advances it.
    ///
    /// Redraws the permutation whenever the cursor is at the start of an epoch and
    /// wraps around after the last batch.
    pub fn advance(&mut self, batch_size: usize) -> Range<usize> {
        if self.batch_index == 0 {
            self.redraw();
        }

        let range = self.batch_range(self.batch_index, batch_size);
        if range.end < self.indices.len() {
            self.batch_index += 1;
        } else {
            self.batch_index = 0;
            self.epochs_seen += 1;
            debug!(epochs_seen = self.epochs_seen; "epoch finished");
        }

        self.total_batches_seen += 1;
        range
    }

    /// The position of the next batch the cursor will yield.
    #[cfg(test)]
    fn batch_index(&self) -> usize {
        self.batch_index
    }

    #[inline]
    pub fn total_batches_seen(&self) -> usize {
        self.total_batches_seen
    }

    #[inline]
    pub fn epochs_seen(&self) -> usize {
        self.epochs_seen
    }
}
