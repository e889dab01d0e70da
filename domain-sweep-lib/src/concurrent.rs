//! Batch scheduling for the availability checker.
//!
//! Domains are split into fixed-size batches. Each batch runs concurrently,
//! batches run one after another, and a pause separates consecutive batches.

use std::ops::Range;

/// How a list of `len` domains is cut into batches of `batch_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    len: usize,
    batch_size: usize,
}

impl BatchPlan {
    /// Plan batches for `len` items. A zero batch size is treated as 1.
    pub fn new(len: usize, batch_size: usize) -> Self {
        Self {
            len,
            batch_size: batch_size.max(1),
        }
    }

    /// Number of batches: `ceil(len / batch_size)`.
    pub fn batch_count(&self) -> usize {
        self.len.div_ceil(self.batch_size)
    }

    /// Index range of batch `index` into the domain list.
    pub fn range(&self, index: usize) -> Range<usize> {
        let start = (index * self.batch_size).min(self.len);
        let end = (start + self.batch_size).min(self.len);
        start..end
    }

    /// Whether a pause follows batch `index`. Never true for the last batch.
    pub fn pause_after(&self, index: usize) -> bool {
        index + 1 < self.batch_count()
    }

    /// Number of pauses a full run takes.
    pub fn pause_count(&self) -> usize {
        self.batch_count().saturating_sub(1)
    }

    /// All batch ranges in order.
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.batch_count()).map(move |i| self.range(i))
    }
}
