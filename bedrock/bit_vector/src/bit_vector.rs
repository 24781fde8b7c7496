//! Growable MSB-first bit vector backed by 64-bit words.
//!
//! # Examples
//!
//! ## Appending variable-width values
//!
//! ```rust
//! use bit_vector::BitVector;
//!
//! let mut bits = BitVector::new(128);
//! bits.append(0b101, 3).unwrap();
//! bits.append(0xFF, 8).unwrap();
//!
//! assert_eq!(bits.size(), 11);
//! assert_eq!(bits.fetch(0, 3).unwrap(), 0b101);
//! assert_eq!(bits.fetch(3, 8).unwrap(), 0xFF);
//! ```
//!
//! ## Random access
//!
//! ```rust
//! use bit_vector::BitVector;
//!
//! let mut bits = BitVector::new(128);
//! bits.set(64, true).unwrap();
//! assert!(bits.get(64).unwrap());
//! assert_eq!(bits.dump()[1], 1 << 63);
//!
//! // random access does not move the append position
//! assert_eq!(bits.size(), 0);
//! ```
//!
use core::fmt;

use crate::bit_ops;
use crate::growth::GrowthPolicy;
use crate::index::{BitIndex, WORD_BITS, words_for};
use crate::{BitVectorError, Result};

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// A growable sequence of bits packed MSB-first into `u64` words.
///
/// Two counters are kept apart: the capacity bounds random access through
/// [`get`](Self::get), [`set`](Self::set) and [`fetch`](Self::fetch), while
/// the size is the append position advanced only by [`append`](Self::append)
/// and [`append_bit`](Self::append_bit).
#[derive(Debug, Clone)]
pub struct BitVector {
    pub(crate) words: Vec<u64>,
    pub(crate) capacity_bits: usize,
    pub(crate) size_bits: usize,
    growth: GrowthPolicy,
}

/// Rejects bit counts outside `1..=64`.
#[inline(always)]
fn validate_width(bit_count: usize) -> Result<()> {
    if (1..=WORD_BITS).contains(&bit_count) {
        Ok(())
    } else {
        Err(BitVectorError::InvalidArgument(bit_count))
    }
}

impl BitVector {
    /// Creates an empty vector with room for `capacity_bits` bits, rounded up
    /// to a whole word. All bits start cleared.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails, like [`Vec::with_capacity`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_vector::BitVector;
    ///
    /// let bits = BitVector::new(100);
    /// assert_eq!(bits.capacity(), 128);
    /// assert_eq!(bits.size(), 0);
    /// ```
    pub fn new(capacity_bits: usize) -> Self {
        Self::with_growth(capacity_bits, GrowthPolicy::default())
    }

    pub fn with_growth(capacity_bits: usize, growth: GrowthPolicy) -> Self {
        let words = vec![0u64; words_for(capacity_bits)];
        Self {
            capacity_bits: words.len() * WORD_BITS,
            words,
            size_bits: 0,
            growth,
        }
    }

    /// Copies `words` into a fully populated vector: size and capacity both
    /// equal `words.len() * 64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_vector::BitVector;
    ///
    /// let bits = BitVector::from_words(&[1, 1, 1]);
    /// assert!(bits.get(63).unwrap());
    /// assert_eq!(bits.fetch64(64).unwrap(), 1);
    /// ```
    pub fn from_words(words: &[u64]) -> Self {
        Self::from_vec(words.to_vec())
    }

    pub fn from_word_iter<I: IntoIterator<Item = u64>>(words: I) -> Self {
        Self::from_vec(words.into_iter().collect())
    }

    fn from_vec(words: Vec<u64>) -> Self {
        let size_bits = words.len() * WORD_BITS;
        Self::from_parts(words, size_bits)
    }

    /// Packs `bytes` into words eight at a time, most-significant byte first.
    ///
    /// A trailing group shorter than eight bytes is left-aligned in the last
    /// word and the unused low bits stay zero. The size is `bytes.len() * 8`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_vector::BitVector;
    ///
    /// let bits = BitVector::from_bytes(&[0x80, 0x01]);
    /// assert_eq!(bits.size(), 16);
    /// assert_eq!(bits.capacity(), 64);
    /// assert!(bits.get(0).unwrap());
    /// assert!(bits.get(15).unwrap());
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_byte_iter(bytes.iter().copied())
    }

    pub fn from_byte_iter<I: IntoIterator<Item = u8>>(bytes: I) -> Self {
        let mut words = Vec::new();
        let mut current = 0u64;
        let mut filled = 0usize;
        let mut size_bits = 0usize;

        for byte in bytes {
            current = (current << 8) | u64::from(byte);
            filled += 1;
            size_bits += 8;
            if filled == 8 {
                words.push(current);
                current = 0;
                filled = 0;
            }
        }
        if filled > 0 {
            words.push(current << ((8 - filled) * 8));
        }

        Self::from_parts(words, size_bits)
    }

    pub(crate) fn from_parts(words: Vec<u64>, size_bits: usize) -> Self {
        debug_assert!(size_bits <= words.len() * WORD_BITS);
        Self {
            capacity_bits: words.len() * WORD_BITS,
            words,
            size_bits,
            growth: GrowthPolicy::default(),
        }
    }

    /// Number of bits appended so far.
    #[inline]
    pub fn size(&self) -> usize {
        self.size_bits
    }

    /// Number of randomly addressable bits currently allocated.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity_bits
    }

    pub fn is_empty(&self) -> bool {
        self.size_bits == 0
    }

    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// The backing words in storage order.
    pub fn dump(&self) -> &[u64] {
        &self.words
    }

    /// Native-endian byte view of the backing words.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }

    /// Appends the low `bit_count` bits of `value`, most-significant first.
    ///
    /// Storage grows according to the vector's [`GrowthPolicy`] when the run
    /// does not fit. On error the vector is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`BitVectorError::InvalidArgument`] if `bit_count` is not in `1..=64`.
    /// - [`BitVectorError::AllocationFailed`] if growth cannot reserve memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_vector::BitVector;
    ///
    /// let mut bits = BitVector::new(0);
    /// bits.append(0b11, 2).unwrap();
    /// assert_eq!(bits.dump()[0], 0b11 << 62);
    /// ```
    pub fn append(&mut self, value: u64, bit_count: usize) -> Result<()> {
        validate_width(bit_count)?;
        let end = self
            .size_bits
            .checked_add(bit_count)
            .ok_or(BitVectorError::CapacityOverflow)?;
        self.ensure_capacity(end)?;

        bit_ops::set_bits(&mut self.words, self.size_bits, bit_count, value);
        self.size_bits = end;
        Ok(())
    }

    /// Appends `repeat_count` copies of `bit`.
    pub fn append_bit(&mut self, bit: bool, repeat_count: usize) -> Result<()> {
        let end = self
            .size_bits
            .checked_add(repeat_count)
            .ok_or(BitVectorError::CapacityOverflow)?;
        self.ensure_capacity(end)?;

        let fill = if bit { u64::MAX } else { 0 };
        let mut offset = self.size_bits;
        while offset < end {
            let width = (end - offset).min(WORD_BITS - BitIndex(offset).offset());
            bit_ops::set_bits(&mut self.words, offset, width, fill);
            offset += width;
        }
        self.size_bits = end;
        Ok(())
    }

    /// Appends every bit yielded by `bits`. On error the vector is left
    /// unchanged.
    pub fn extend_from_bits<I: IntoIterator<Item = bool>>(&mut self, bits: I) -> Result<()> {
        let bits = bits.into_iter();
        let mut staged = BitVector::with_growth(0, self.growth);
        staged.reserve(bits.size_hint().0)?;
        for bit in bits {
            staged.append_bit(bit, 1)?;
        }
        self.append_from(&staged)
    }

    /// Appends the first `size()` bits of `other`. Capacity is reserved up
    /// front, so nothing is written unless the whole run fits.
    fn append_from(&mut self, other: &BitVector) -> Result<()> {
        self.reserve(other.size_bits)?;
        let full = other.size_bits / WORD_BITS;
        for &word in &other.words[..full] {
            self.append(word, WORD_BITS)?;
        }
        let rem = other.size_bits % WORD_BITS;
        if rem > 0 {
            self.append(other.words[full] >> (WORD_BITS - rem), rem)?;
        }
        Ok(())
    }

    /// Grows capacity so that `additional_bits` more bits can be appended
    /// without reallocating.
    pub fn reserve(&mut self, additional_bits: usize) -> Result<()> {
        let required = self
            .size_bits
            .checked_add(additional_bits)
            .ok_or(BitVectorError::CapacityOverflow)?;
        self.ensure_capacity(required)
    }

    fn ensure_capacity(&mut self, required_bits: usize) -> Result<()> {
        if required_bits <= self.capacity_bits {
            return Ok(());
        }
        let target = self
            .growth
            .next_len(self.words.len(), words_for(required_bits));
        self.grow_to(target)
    }

    fn grow_to(&mut self, target_words: usize) -> Result<()> {
        let capacity_bits = target_words
            .checked_mul(WORD_BITS)
            .ok_or(BitVectorError::CapacityOverflow)?;
        let additional = target_words - self.words.len();
        self.words
            .try_reserve_exact(additional)
            .map_err(|_| BitVectorError::AllocationFailed)?;
        self.words.resize(target_words, 0);
        self.capacity_bits = capacity_bits;

        tracing::trace!(
            words = target_words,
            capacity_bits,
            policy = ?self.growth,
            "grew bit vector storage"
        );
        Ok(())
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<BitIndex> {
        if index < self.capacity_bits {
            Ok(BitIndex(index))
        } else {
            Err(BitVectorError::IndexOutOfRange {
                index,
                capacity: self.capacity_bits,
            })
        }
    }

    /// Sets the bit at `index`. Does not change [`size`](Self::size).
    ///
    /// # Errors
    ///
    /// [`BitVectorError::IndexOutOfRange`] if `index >= capacity()`.
    pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
        let index = self.check_index(index)?;
        let word = &mut self.words[index.word()];
        if value {
            *word |= index.mask();
        } else {
            *word &= !index.mask();
        }
        Ok(())
    }

    /// Reads the bit at `index`.
    ///
    /// # Errors
    ///
    /// [`BitVectorError::IndexOutOfRange`] if `index >= capacity()`.
    pub fn get(&self, index: usize) -> Result<bool> {
        let index = self.check_index(index)?;
        Ok(self.bit(index))
    }

    #[inline]
    pub(crate) fn bit(&self, index: BitIndex) -> bool {
        self.words[index.word()] & index.mask() != 0
    }

    /// Reads `bit_count` consecutive bits starting at `bit_offset`.
    ///
    /// The result is right-aligned: the bit at `bit_offset` becomes the most
    /// significant of the returned group. The run may cross a word boundary.
    ///
    /// # Errors
    ///
    /// - [`BitVectorError::InvalidArgument`] if `bit_count` is not in `1..=64`.
    /// - [`BitVectorError::IndexOutOfRange`] if the run ends past `capacity()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bit_vector::BitVector;
    ///
    /// let mut bits = BitVector::new(128);
    /// bits.append(0, 62).unwrap();
    /// bits.append(0b1011, 4).unwrap();
    /// assert_eq!(bits.fetch(62, 4).unwrap(), 0b1011);
    /// ```
    pub fn fetch(&self, bit_offset: usize, bit_count: usize) -> Result<u64> {
        validate_width(bit_count)?;
        match bit_offset.checked_add(bit_count) {
            Some(end) if end <= self.capacity_bits => {
                Ok(bit_ops::get_bits(&self.words, bit_offset, bit_count))
            }
            _ => Err(BitVectorError::IndexOutOfRange {
                index: bit_offset.saturating_add(bit_count - 1),
                capacity: self.capacity_bits,
            }),
        }
    }

    /// Reads a full 64-bit group starting at `bit_offset`.
    pub fn fetch64(&self, bit_offset: usize) -> Result<u64> {
        self.fetch(bit_offset, WORD_BITS)
    }

    /// Resets the size to zero and clears every bit, keeping the allocation.
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.size_bits = 0;
    }
}

impl Default for BitVector {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Vectors are equal when their sizes match and the first `size()` bits
/// agree. Capacity and bits past the size are ignored.
impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        if self.size_bits != other.size_bits {
            return false;
        }
        let full = self.size_bits / WORD_BITS;
        if self.words[..full] != other.words[..full] {
            return false;
        }
        let rem = self.size_bits % WORD_BITS;
        if rem == 0 {
            return true;
        }
        let mask = !bit_ops::low_mask(WORD_BITS - rem);
        (self.words[full] ^ other.words[full]) & mask == 0
    }
}

impl Eq for BitVector {}

impl From<&[u64]> for BitVector {
    fn from(words: &[u64]) -> Self {
        Self::from_words(words)
    }
}

impl From<Vec<u64>> for BitVector {
    fn from(words: Vec<u64>) -> Self {
        Self::from_vec(words)
    }
}

impl From<&[u8]> for BitVector {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
