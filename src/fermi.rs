use log::debug;

use crate::config::Configuration;
use crate::error::{FermiError, Result};
use crate::util::try_with_capacity;
use crate::{BitOps, Bitfield, BITFIELD_BITS};

/// Sets bit `x[i]` for every coordinate.
/// Repeated coordinates collapse on the same bit and coordinates beyond the
/// bitfield width set nothing, in both cases the population count of the
/// result is smaller than `x.len()`.
pub fn encode(x: &[usize]) -> Bitfield {
    x.iter()
        .filter(|&&k| k < BITFIELD_BITS)
        .fold(0, |w, &k| w | (1 << k))
}

/// Writes the positions of the first `out.len()` set bits of `w`, in
/// increasing order.
pub fn decode_into(w: Bitfield, out: &mut [usize]) -> Result<()> {
    let mut g = w;
    for slot in out.iter_mut() {
        if g == 0 {
            return Err(FermiError::Decode {
                bitfield: w,
                particles: out.len(),
            });
        }
        *slot = g.trailing_zeros() as usize;
        g ^= g.lowest_set_bit();
    }
    Ok(())
}

/// Positions of the first `n` set bits of `w`.
pub fn decode(w: Bitfield, n: usize) -> Result<Vec<usize>> {
    let mut x = vec![0; n];
    decode_into(w, &mut x)?;
    Ok(x)
}

/// Next larger integer with the same population count.
/// # Algorithm
/// The lowest run of ones is located with the trailing zero fill, its leading
/// bit moves one place up and the rest of the run is packed at the bottom.
/// Zero is a fixed point.
#[inline]
pub fn next_pattern<I: BitOps>(f: I) -> I {
    if f == I::zero() {
        return f;
    }
    let t = f.fill_trailing_zeros().wrapping_add(&I::one());
    let tz = f.trailing_zeros() as usize;
    t | ((t.lowest_set_bit().wrapping_sub(&I::one()) >> tz) >> 1)
}

/// Next pattern of a partitioned configuration, `None` once every block is
/// exhausted.
/// The lowest block advances while it can. When it holds its particles in its
/// topmost orbitals, it is reset to its initial pattern and the next block
/// advances instead.
pub fn next_config_pattern(config: &Configuration, f: Bitfield) -> Option<Bitfield> {
    let mut shift = 0;
    let mut lower_reset: Bitfield = 0;
    for block in config.blocks() {
        let g = f >> shift;
        let mask = <Bitfield>::low_mask(block.orbitals);
        if g.fill_trailing_zeros() & mask != mask {
            return Some((next_pattern(g) << shift) | lower_reset);
        }
        lower_reset |= <Bitfield>::low_mask((g & mask).pop_count() as usize) << shift;
        shift += block.orbitals;
        if shift >= BITFIELD_BITS {
            break;
        }
    }
    None
}

/// Strictly increasing list of the bitfields of a configuration.
/// # Ownership
/// The map is built once and never mutated. It keeps its configuration so
/// lookups can check the particle number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FermiMap {
    config: Configuration,
    map: Vec<Bitfield>,
}

impl FermiMap {
    /// Enumerates every pattern of `config` in increasing order.
    pub fn build(config: &Configuration) -> Result<Self> {
        let num = config.dimension()?;
        let mut map = try_with_capacity::<Bitfield>(num)?;
        let mut f = Some(config.initial_pattern());
        while let Some(w) = f {
            if map.len() == num {
                return Err(FermiError::Integrity {
                    expected: num,
                    found: num + 1,
                });
            }
            debug_assert!(map.last().map_or(true, |&l| l < w));
            map.push(w);
            f = next_config_pattern(config, w);
        }
        if map.len() != num {
            return Err(FermiError::Integrity {
                expected: num,
                found: map.len(),
            });
        }
        debug!(
            "Built Fermi map for orbitals {:?}, particles {:?}: {} states",
            config.orbitals(),
            config.particles(),
            num
        );
        Ok(FermiMap {
            config: config.clone(),
            map,
        })
    }

    /// Map of `particles` particles in `orbitals` orbitals.
    pub fn single(orbitals: usize, particles: usize) -> Result<Self> {
        FermiMap::build(&Configuration::single(orbitals, particles)?)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Total particle number of every pattern.
    pub fn particles(&self) -> usize {
        self.config.total_particles()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn as_slice(&self) -> &[Bitfield] {
        &self.map
    }

    pub fn get(&self, i: usize) -> Option<Bitfield> {
        self.map.get(i).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bitfield> {
        self.map.iter()
    }

    /// Position of a bitfield in the map.
    pub fn index_of(&self, w: Bitfield) -> Option<usize> {
        self.map
            .binary_search_by(|x| crate::compare_bitfield(x, &w))
            .ok()
    }

    /// Index of the state with orbitals `x` occupied. `None` for repeated
    /// orbitals or a pattern outside this sector.
    pub fn coords_to_index(&self, x: &[usize]) -> Option<usize> {
        let w = encode(x);
        if (w.pop_count() as usize) < x.len() {
            return None;
        }
        self.index_of(w)
    }

    /// Same as [FermiMap::coords_to_index], with the sign of the permutation
    /// sorting `x`.
    pub fn coords_to_index_with_sign(&self, x: &[usize]) -> Option<(usize, i32)> {
        let n = self.coords_to_index(x)?;
        Some((n, permutation_sign(x)))
    }

    /// Decodes state `i` into its occupied orbitals.
    pub fn coords(&self, i: usize) -> Result<Vec<usize>> {
        let w = self.get(i).ok_or(FermiError::IndexOutOfBounds {
            axis: 0,
            index: i,
            dim: self.len(),
        })?;
        decode(w, self.particles())
    }
}

impl<'a> IntoIterator for &'a FermiMap {
    type Item = &'a Bitfield;
    type IntoIter = std::slice::Iter<'a, Bitfield>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

/// Sign of the permutation sorting `x`, $(-1)^{\text{inversions}}$. Pairwise
/// distinct entries are assumed, equal entries count as ordered.
pub fn permutation_sign(x: &[usize]) -> i32 {
    let mut inversions = 0usize;
    for i in 0..x.len() {
        for j in (i + 1)..x.len() {
            if x[j] < x[i] {
                inversions += 1;
            }
        }
    }
    1 - 2 * (inversions & 1) as i32
}

/// Sorts `x` in place and returns the sign of the sorting permutation.
pub fn signed_sort(x: &mut [usize]) -> i32 {
    let mut sign = 1;
    // Insertion sort, one adjacent transposition per swap.
    for i in 1..x.len() {
        let mut k = i;
        while k > 0 && x[k] < x[k - 1] {
            x.swap(k, k - 1);
            sign = -sign;
            k -= 1;
        }
    }
    sign
}

/// Sign of annihilating the orbitals `a` from the occupation `n`.
/// # Returns
/// `0` when `a` is not a subset of `n`. Otherwise $(-1)^k$, where $k$ counts,
/// for every removed orbital, the surviving occupied orbitals below it.
pub fn annihilation_sign<I: BitOps>(n: I, a: I) -> i32 {
    if !a.is_subset_of(n) {
        return 0;
    }
    let w = n - a;
    let mut b = a;
    let mut count = 0u32;
    while b != I::zero() {
        let t = b.lowest_set_bit();
        count += (w & (t - I::one())).pop_count();
        b = b ^ t;
    }
    1 - 2 * (count & 1) as i32
}

/// Precomputed annihilation parities.
/// Bit `j` of the result is the parity of the set bits of `f` at positions
/// `<= j`, the bit itself included. Shifted left by one, it gives the parity
/// strictly below `j`.
/// ```
/// use fermifab::fermi::annihilation_sign_mask;
/// assert_eq!(annihilation_sign_mask(0b1u64), u64::MAX);
/// assert_eq!(annihilation_sign_mask(0b1u64) << 1, u64::MAX - 1);
/// assert_eq!(annihilation_sign_mask(0b101u64), 0b011);
/// ```
pub fn annihilation_sign_mask<I: BitOps>(f: I) -> I {
    let mut g = f;
    let mut m = I::zero();
    while g != I::zero() {
        let t = g.lowest_set_bit();
        m = m ^ t.wrapping_neg();
        g = g ^ t;
    }
    m
}

/// Sign of reversing a sequence of length `n`.
pub fn reverse_permutation_sign(n: usize) -> i32 {
    let pairs = n * n.saturating_sub(1) / 2;
    1 - 2 * (pairs % 2) as i32
}
