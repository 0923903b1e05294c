use derive_more::Error;
use std::fmt;

/// Errors raised by the enumeration engine and the kernel generators.
/// # Recoverability
/// Every variant is returned to the caller before any partially built map or
/// tensor becomes visible. Lookup misses and coordinate collisions are not
/// errors, they are `None`.
#[derive(Debug, Error)]
pub enum FermiError {
    /// A block violates `orbitals >= 1` or `particles <= orbitals`, or the
    /// configuration is empty.
    InvalidConfiguration { details: String },
    /// Two per-block vectors were given with different lengths.
    LengthMismatch { expected: usize, found: usize },
    /// The implied reduced sector `N1 - N2 + p1` is negative for a block.
    NegativeSector { block: usize },
    /// The configuration needs more orbitals than a bitfield can hold.
    BitfieldOverflow { orbitals: usize },
    /// A dimension or nonzero count does not fit in `usize`.
    DimensionOverflow,
    /// Fewer set bits than requested while decoding.
    Decode { bitfield: u64, particles: usize },
    /// A buffer does not have the length its dimensions require.
    DimensionMismatch { expected: usize, found: usize },
    /// A sparse index is out of its axis range.
    IndexOutOfBounds { axis: usize, index: usize, dim: usize },
    /// A buffer could not be allocated.
    Allocation,
    /// LAPACK reported an illegal argument.
    Lapack { info: i32 },
    /// A generated tensor does not have the expected number of entries.
    Integrity { expected: usize, found: usize },
    /// Binary buffer exchange failed.
    Io { details: String },
}

impl fmt::Display for FermiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FermiError::InvalidConfiguration { details } => {
                write!(f, "Invalid configuration: {}", details)
            }
            FermiError::LengthMismatch { expected, found } => write!(
                f,
                "Mismatched block count, expected {} blocks, found {}.",
                expected, found
            ),
            FermiError::NegativeSector { block } => write!(
                f,
                "Implied reduced sector is negative in block {}.",
                block
            ),
            FermiError::BitfieldOverflow { orbitals } => write!(
                f,
                "{} orbitals do not fit in a {}-bit bitfield.",
                orbitals,
                crate::BITFIELD_BITS
            ),
            FermiError::DimensionOverflow => write!(f, "Dimension overflows usize."),
            FermiError::Decode {
                bitfield,
                particles,
            } => write!(
                f,
                "Cannot decode {} particles from bitfield {:#b}.",
                particles, bitfield
            ),
            FermiError::DimensionMismatch { expected, found } => write!(
                f,
                "Buffer has length {}, expected {}.",
                found, expected
            ),
            FermiError::IndexOutOfBounds { axis, index, dim } => write!(
                f,
                "Index {} out of bounds on axis {} of dimension {}.",
                index, axis, dim
            ),
            FermiError::Allocation => write!(f, "Memory allocation failed."),
            FermiError::Lapack { info } => {
                write!(f, "LAPACK reported illegal argument, info = {}.", info)
            }
            FermiError::Integrity { expected, found } => write!(
                f,
                "Generated {} entries, expected {}.",
                found, expected
            ),
            FermiError::Io { details } => write!(f, "I/O error: {}", details),
        }
    }
}

impl From<std::collections::TryReserveError> for FermiError {
    fn from(_: std::collections::TryReserveError) -> Self {
        FermiError::Allocation
    }
}

impl From<std::io::Error> for FermiError {
    fn from(err: std::io::Error) -> Self {
        FermiError::Io {
            details: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FermiError>;
