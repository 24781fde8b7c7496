use crate::index::{BitIndex, WORD_BITS};

/// Mask with the low `width` bits set, `width` in `0..=64`.
#[inline(always)]
pub(crate) const fn low_mask(width: usize) -> u64 {
    if width >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Writes the low `bit_width` bits of `value` starting at logical bit
/// `bit_offset`, most-significant bit first. Bits outside the run are kept.
///
/// The caller guarantees `1 <= bit_width <= 64` and that the run lies inside
/// `words`. A run touches at most two words.
#[inline]
pub(crate) fn set_bits(words: &mut [u64], bit_offset: usize, bit_width: usize, value: u64) {
    let value = value & low_mask(bit_width);
    let start = BitIndex(bit_offset);
    let word = start.word();
    let head = WORD_BITS - start.offset();

    if bit_width <= head {
        let shift = head - bit_width;
        let mask = low_mask(bit_width) << shift;
        words[word] = (words[word] & !mask) | (value << shift);
    } else {
        // high `head` bits close out this word, the rest opens the next one
        let tail = bit_width - head;
        let mask = low_mask(head);
        words[word] = (words[word] & !mask) | (value >> tail);

        let shift = WORD_BITS - tail;
        let mask = low_mask(tail) << shift;
        words[word + 1] = (words[word + 1] & !mask) | (value << shift);
    }
}

/// Reads `bit_width` bits starting at `bit_offset`, returned right-aligned
/// with the first bit most significant. Same preconditions as [`set_bits`].
#[inline]
pub(crate) fn get_bits(words: &[u64], bit_offset: usize, bit_width: usize) -> u64 {
    let start = BitIndex(bit_offset);
    let word = start.word();
    let head = WORD_BITS - start.offset();

    if bit_width <= head {
        (words[word] >> (head - bit_width)) & low_mask(bit_width)
    } else {
        let tail = bit_width - head;
        let high = words[word] & low_mask(head);
        let low = words[word + 1] >> (WORD_BITS - tail);
        (high << tail) | low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_bits() {
        let mut buf = [0u64; 2];
        set_bits(&mut buf, 3, 5, 0b10101);
        assert_eq!(get_bits(&buf, 3, 5), 0b10101);
        assert_eq!(buf[0], 0b10101 << 56);
    }

    #[test]
    fn straddles_word_boundary() {
        let mut buf = [0u64; 2];
        set_bits(&mut buf, 60, 8, 0xAB);
        assert_eq!(buf[0], 0xA);
        assert_eq!(buf[1], 0xB << 60);
        assert_eq!(get_bits(&buf, 60, 8), 0xAB);
    }

    #[test]
    fn full_width_unaligned() {
        let mut buf = [0u64; 2];
        set_bits(&mut buf, 17, 64, 0xDEAD_BEEF_0123_4567);
        assert_eq!(get_bits(&buf, 17, 64), 0xDEAD_BEEF_0123_4567);
    }

    #[test]
    fn overwrite_clears_previous_bits() {
        let mut buf = [u64::MAX; 2];
        set_bits(&mut buf, 62, 4, 0);
        assert_eq!(buf[0], u64::MAX << 2);
        assert_eq!(buf[1], u64::MAX >> 2);
    }

    #[test]
    fn value_is_truncated_to_width() {
        let mut buf = [0u64; 1];
        set_bits(&mut buf, 0, 3, 0xFF);
        assert_eq!(buf[0], 0b111 << 61);
    }
}
