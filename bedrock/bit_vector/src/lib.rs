//! # bit_vector
//!
//! A `no_std` compatible, growable bit vector packed MSB-first into 64-bit
//! words.
//!
//! ```rust
//! use bit_vector::BitVector;
//!
//! // Store a stream of 5-bit codes
//! let mut bits = BitVector::new(128);
//! for code in [3, 17, 31] {
//!     bits.append(code, 5).unwrap();
//! }
//!
//! assert_eq!(bits.size(), 15);
//! assert_eq!(bits.fetch(5, 5).unwrap(), 17);
//! ```
//!
//! ## Bit order
//!
//! Logical bit `i` lives in word `i / 64` at position `63 - i % 64`, so the
//! first bit of the vector is the most-significant bit of the first word.
//!
//! ```rust
//! use bit_vector::BitVector;
//!
//! let mut bits = BitVector::new(64);
//! bits.append(1, 1).unwrap();
//! assert_eq!(bits.dump()[0], 1 << 63);
//! ```
//!

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub use error::{BitVectorError, Result};

mod bit_ops;

pub mod bit_vector;
pub mod growth;
pub mod index;
pub mod io;
pub mod iter;

pub use bit_vector::BitVector;
pub use growth::GrowthPolicy;
pub use index::{BitIndex, WORD_BITS};
pub use iter::Iter;
