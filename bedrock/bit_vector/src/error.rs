#[cfg(feature = "std")]
use thiserror::Error;

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug)]
pub enum BitVectorError {
    #[cfg_attr(
        feature = "std",
        error("Bit index {index} is out of range for capacity {capacity}")
    )]
    IndexOutOfRange { index: usize, capacity: usize },

    #[cfg_attr(
        feature = "std",
        error("Bit count must be in the range 1..=64, got {0}")
    )]
    InvalidArgument(usize),

    #[cfg_attr(feature = "std", error("failed to allocate storage"))]
    AllocationFailed,

    #[cfg_attr(feature = "std", error("bit capacity exceeds addressable memory"))]
    CapacityOverflow,

    #[cfg_attr(
        feature = "std",
        error("serialized data truncated: expected {expected} bytes, found {found}")
    )]
    Truncated { expected: usize, found: usize },

    #[cfg(feature = "std")]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, BitVectorError>;

#[cfg(not(feature = "std"))]
impl core::fmt::Display for BitVectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BitVectorError::IndexOutOfRange { index, capacity } => write!(
                f,
                "Bit index {} is out of range for capacity {}",
                index, capacity
            ),
            BitVectorError::InvalidArgument(n) => {
                write!(f, "Bit count must be in the range 1..=64, got {}", n)
            }
            BitVectorError::AllocationFailed => write!(f, "failed to allocate storage"),
            BitVectorError::CapacityOverflow => {
                write!(f, "bit capacity exceeds addressable memory")
            }
            BitVectorError::Truncated { expected, found } => write!(
                f,
                "serialized data truncated: expected {} bytes, found {}",
                expected, found
            ),
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::error::Error for BitVectorError {}
