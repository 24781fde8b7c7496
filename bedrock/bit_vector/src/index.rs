//! Logical bit addressing over MSB-first 64-bit words.

/// Bits held by one storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Position of a bit across the whole vector, independent of word boundaries.
///
/// Bit `i` lives in word `i / 64`, counted from the most-significant end of
/// that word.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitIndex(pub usize);

impl BitIndex {
    /// Index of the word holding this bit.
    #[inline]
    pub const fn word(self) -> usize {
        self.0 / WORD_BITS
    }

    /// Distance from the most-significant bit of the word.
    #[inline]
    pub const fn offset(self) -> usize {
        self.0 % WORD_BITS
    }

    /// Single-bit mask selecting this bit inside its word.
    #[inline]
    pub const fn mask(self) -> u64 {
        1u64 << (WORD_BITS - 1 - self.offset())
    }
}

/// Number of words needed to back `bits` bits.
#[inline]
pub const fn words_for(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}
