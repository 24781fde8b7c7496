//! Storage growth strategies for appends that run past capacity.

use crate::index::WORD_BITS;

/// Largest word count whose bit capacity still fits in `usize`.
const MAX_WORDS: usize = usize::MAX / WORD_BITS;

/// How [`BitVector`](crate::BitVector) reallocates when an append needs more
/// words than are allocated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GrowthPolicy {
    /// At least double the word count, giving amortized O(1) appends.
    #[default]
    Doubling,
    /// Grow to exactly the word boundary the new size requires.
    Exact,
}

impl GrowthPolicy {
    /// Word count to grow to from `current` words when `required` are needed.
    ///
    /// Never less than `required`.
    pub fn next_len(self, current: usize, required: usize) -> usize {
        match self {
            GrowthPolicy::Doubling => required.max(current.saturating_mul(2).min(MAX_WORDS)),
            GrowthPolicy::Exact => required,
        }
    }
}
