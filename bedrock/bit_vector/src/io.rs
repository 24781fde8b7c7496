//! Binary serialization.
//!
//! Layout, every integer little-endian:
//!
//! | bytes        | content                                  |
//! |--------------|------------------------------------------|
//! | `0..8`       | size in bits, `u64`                      |
//! | `8..8+8*w`   | `w = ceil(size / 64)` words, `u64` each  |
//!
//! Only the words covering the appended prefix are written. A decoded vector
//! has size `size` and capacity `w * 64`.
//!
//! # Examples
//!
//! ```rust
//! use bit_vector::BitVector;
//!
//! let mut bits = BitVector::new(128);
//! bits.append(0b11111, 5).unwrap();
//!
//! let mut buf = Vec::new();
//! bits.write(&mut buf).unwrap();
//!
//! let mut restored = BitVector::default();
//! restored.read(buf.as_slice()).unwrap();
//! assert_eq!(restored, bits);
//! ```

use crate::index::{WORD_BITS, words_for};
use crate::{BitVector, BitVectorError, Result};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::io::{Read, Write};

const SIZE_HEADER: usize = 8;
const WORD_BYTES: usize = WORD_BITS / 8;

/// Validates a decoded size and returns it with the body length in bytes.
fn decode_header(raw_size: u64) -> Result<(usize, usize)> {
    let size_bits = usize::try_from(raw_size).map_err(|_| BitVectorError::CapacityOverflow)?;
    let words = words_for(size_bits);
    if words.checked_mul(WORD_BITS).is_none() {
        return Err(BitVectorError::CapacityOverflow);
    }
    Ok((size_bits, words * WORD_BYTES))
}

fn decode_words(body: &[u8]) -> Vec<u64> {
    body.chunks_exact(WORD_BYTES)
        .map(|chunk| u64::from_le(bytemuck::pod_read_unaligned(chunk)))
        .collect()
}

impl BitVector {
    fn persisted_words(&self) -> &[u64] {
        &self.words[..words_for(self.size_bits)]
    }

    /// Encodes the vector into a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let words = self.persisted_words();
        let mut out = Vec::with_capacity(SIZE_HEADER + words.len() * WORD_BYTES);
        out.extend_from_slice(&(self.size_bits as u64).to_le_bytes());
        for word in words {
            out.extend_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Decodes a vector from `bytes`. Bytes past the encoded words are
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`BitVectorError::Truncated`] if the buffer ends early.
    /// - [`BitVectorError::CapacityOverflow`] if the encoded size is not
    ///   addressable on this platform.
    pub fn from_serialized(bytes: &[u8]) -> Result<Self> {
        let header = bytes
            .get(..SIZE_HEADER)
            .ok_or(BitVectorError::Truncated {
                expected: SIZE_HEADER,
                found: bytes.len(),
            })?;
        let raw_size = u64::from_le(bytemuck::pod_read_unaligned(header));
        let (size_bits, body_len) = decode_header(raw_size)?;
        let expected = SIZE_HEADER
            .checked_add(body_len)
            .ok_or(BitVectorError::CapacityOverflow)?;
        let body = bytes
            .get(SIZE_HEADER..expected)
            .ok_or(BitVectorError::Truncated {
                expected,
                found: bytes.len(),
            })?;

        Ok(Self::from_parts(decode_words(body), size_bits))
    }

    /// Writes the encoded vector to `sink`.
    #[cfg(feature = "std")]
    pub fn write<W: Write>(&self, mut sink: W) -> Result<()> {
        sink.write_all(&(self.size_bits as u64).to_le_bytes())?;
        for word in self.persisted_words() {
            sink.write_all(&word.to_le_bytes())?;
        }
        tracing::debug!(
            size_bits = self.size_bits,
            words = words_for(self.size_bits),
            "wrote bit vector"
        );
        Ok(())
    }

    /// Replaces the contents of `self` with a vector read from `source`.
    ///
    /// Nothing is merged with the previous contents. On error `self` is left
    /// unchanged, though `source` may have been partially consumed.
    #[cfg(feature = "std")]
    pub fn read<R: Read>(&mut self, mut source: R) -> Result<()> {
        let mut header = [0u8; SIZE_HEADER];
        source.read_exact(&mut header)?;
        let (size_bits, body_len) = decode_header(u64::from_le_bytes(header))?;

        // read through `take` so a corrupt header cannot force a huge allocation
        let mut body = Vec::new();
        source.by_ref().take(body_len as u64).read_to_end(&mut body)?;
        if body.len() != body_len {
            return Err(BitVectorError::Truncated {
                expected: SIZE_HEADER + body_len,
                found: SIZE_HEADER + body.len(),
            });
        }

        self.words = decode_words(&body);
        self.capacity_bits = self.words.len() * WORD_BITS;
        self.size_bits = size_bits;
        tracing::debug!(size_bits, words = self.words.len(), "read bit vector");
        Ok(())
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn sample() -> Result<BitVector> {
        let mut bits = BitVector::new(128);
        for _ in 0..15 {
            bits.append(0b11111, 5)?;
        }
        Ok(bits)
    }

    #[test]
    fn read_and_write() -> Result<()> {
        let bits = sample()?;
        let mut buf = Vec::new();
        bits.write(&mut buf)?;

        let mut clone = BitVector::new(bits.size());
        clone.read(buf.as_slice())?;
        assert_eq!(clone, bits);
        assert_eq!(clone.size(), 75);
        assert_eq!(clone.capacity(), 128);
        Ok(())
    }

    #[test]
    fn wire_layout() -> Result<()> {
        let bits = sample()?;
        let bytes = bits.to_bytes();
        assert_eq!(bytes.len(), 8 + 2 * 8);
        assert_eq!(&bytes[..8], &75u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &u64::MAX.to_le_bytes());
        assert_eq!(&bytes[16..], &(((1u64 << 11) - 1) << 53).to_le_bytes());

        let mut streamed = Vec::new();
        bits.write(&mut streamed)?;
        assert_eq!(streamed, bytes);
        Ok(())
    }

    #[test]
    fn unused_trailing_words_are_not_persisted() -> Result<()> {
        let mut bits = BitVector::new(1024);
        bits.append(1, 1)?;
        bits.set(500, true)?;

        let restored = BitVector::from_serialized(&bits.to_bytes())?;
        assert_eq!(restored.capacity(), 64);
        assert_eq!(restored, bits);
        assert!(matches!(
            restored.get(500),
            Err(BitVectorError::IndexOutOfRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn read_replaces_previous_contents() -> Result<()> {
        let source = BitVector::from_bytes(&[0xAA]);
        let mut target = BitVector::from_words(&[u64::MAX; 4]);
        target.read(source.to_bytes().as_slice())?;
        assert_eq!(target.size(), 8);
        assert_eq!(target.dump(), &[0xAAu64 << 56]);
        Ok(())
    }

    #[test]
    fn roundtrip_raw_sources() -> Result<()> {
        for bits in [
            BitVector::from_words(&[1, 1, 1]),
            BitVector::from_bytes(&[1; 9]),
            BitVector::default(),
        ] {
            let mut buf = Vec::new();
            bits.write(&mut buf)?;
            let mut clone = BitVector::default();
            clone.read(buf.as_slice())?;
            assert_eq!(clone, bits);
        }
        Ok(())
    }

    #[test]
    fn truncated_body_leaves_target_untouched() -> Result<()> {
        let bytes = sample()?.to_bytes();
        let short = &bytes[..bytes.len() - 1];

        let mut target = BitVector::from_words(&[7]);
        let err = target.read(short).unwrap_err();
        assert!(matches!(
            err,
            BitVectorError::Truncated {
                expected: 24,
                found: 23
            }
        ));
        assert_eq!(target, BitVector::from_words(&[7]));

        assert!(matches!(
            BitVector::from_serialized(short),
            Err(BitVectorError::Truncated { .. })
        ));
        Ok(())
    }

    #[test]
    fn truncated_header() {
        let mut target = BitVector::default();
        assert!(matches!(
            target.read(&[0u8; 3][..]),
            Err(BitVectorError::Io(_))
        ));
        assert!(matches!(
            BitVector::from_serialized(&[0u8; 3]),
            Err(BitVectorError::Truncated {
                expected: 8,
                found: 3
            })
        ));
    }

    #[test]
    fn oversized_header_is_rejected_without_allocating() {
        let mut bytes = u64::MAX.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0u8; 8]);
        let mut target = BitVector::default();
        assert!(target.read(bytes.as_slice()).is_err());
        assert!(BitVector::from_serialized(&bytes).is_err());
    }
}
