extern crate num;

use num::PrimInt;
use num::traits::{WrappingAdd, WrappingNeg, WrappingSub};

/// Bit-encoded occupation of a set of orbitals.
/// # Definition
/// Bit $k$ set means orbital (or mode) $k$ is occupied. The population count
/// is the particle number. Orbital $0$ lives in the least significant bit, and
/// the numeric value of the bitfield is the canonical basis ordering.
pub type Bitfield = u64;

/// Number of orbitals a [Bitfield] can hold.
pub const BITFIELD_BITS: usize = Bitfield::BITS as usize;

/// Abstraction layer for the bit twiddling primitives of the enumeration.
/// # Purpose
/// The BitOps trait brings in scope the handful of branch-light operations the
/// Fermi and Boson maps are built on. It is implemented for every primitive
/// integer, so that the algorithms can be checked on narrow types and run on
/// [Bitfield].
pub trait BitOps:
    PrimInt +
    WrappingAdd +
    WrappingSub +
    WrappingNeg +
    std::fmt::Debug
{
    /// Number of set bits, the particle number of an occupation.
    fn pop_count(self) -> u32;
    /// Isolates the lowest set bit, `x & -x` in two's complement. Equivalent
    /// to the `BLSI` instruction.
    fn lowest_set_bit(self) -> Self;
    /// Sets all the zeros below the lowest set bit, `x | (x - 1)`. Equivalent
    /// to the `BLSFILL` instruction. Maps $0$ to all ones.
    fn fill_trailing_zeros(self) -> Self;
    /// Mask with the lowest `n` bits set. Saturates to all ones for `n` larger
    /// than the width of the type.
    fn low_mask(n: usize) -> Self;
    /// Checks that every set bit of `self` is also set in `other`.
    fn is_subset_of(self, other: Self) -> bool;
    /// Returns $(-1)^{\text{popcount}}$.
    fn parity_sign(self) -> i32;
    /// Scatters the low bits of `self` onto the set bits of `mask`, from the
    /// least significant upward. Equivalent to the `PDEP` instruction.
    fn distribute(self, mask: Self) -> Self;
}

impl<I> BitOps for I
    where I: PrimInt + WrappingAdd + WrappingSub + WrappingNeg + std::fmt::Debug
{
    #[inline(always)]
    fn pop_count(self) -> u32 {
        self.count_ones()
    }

    #[inline(always)]
    fn lowest_set_bit(self) -> Self {
        self & self.wrapping_neg()
    }

    #[inline(always)]
    fn fill_trailing_zeros(self) -> Self {
        self | self.wrapping_sub(&I::one())
    }

    #[inline(always)]
    fn low_mask(n: usize) -> Self {
        let n_bits = I::zero().count_zeros() as usize;
        if n >= n_bits {
            return !I::zero();
        }
        (I::one() << n) - I::one()
    }

    #[inline(always)]
    fn is_subset_of(self, other: Self) -> bool {
        self & other == self
    }

    #[inline(always)]
    fn parity_sign(self) -> i32 {
        1 - 2 * (self.count_ones() & 1) as i32
    }

    fn distribute(self, mask: Self) -> Self {
        let mut out = I::zero();
        let mut m = mask;
        let mut src = self;
        while m != I::zero() {
            let t = m.lowest_set_bit();
            if src & I::one() != I::zero() {
                out = out | t;
            }
            src = src >> 1;
            m = m ^ t;
        }
        out
    }
}

/// Total ordering of bitfields, by numeric value. This is the ordering of every
/// enumeration map and the one used for binary search.
#[inline(always)]
pub fn compare_bitfield<I: BitOps>(x: &I, y: &I) -> std::cmp::Ordering {
    x.cmp(y)
}
