use log::debug;

use crate::error::{FermiError, Result};
use crate::fermi::{decode_into, FermiMap};
use crate::{BitOps, Bitfield, BITFIELD_BITS};

/// Multisets of `particles` modes among `modes`, ordered as their Fermi
/// encoding.
/// # Encoding
/// The sorted multiset $x_0\leq x_1\leq\dots$ maps to the Fermi pattern with
/// bits $x_i+i$ set, over $m+N-1$ virtual orbitals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BosonMap {
    modes: usize,
    particles: usize,
    fermi: FermiMap,
}

impl BosonMap {
    pub fn build(modes: usize, particles: usize) -> Result<Self> {
        if modes == 0 {
            return Err(FermiError::InvalidConfiguration {
                details: format!("boson map of {} particles has no mode", particles),
            });
        }
        // The vacuum still needs one virtual orbital to be a valid configuration.
        let orbitals = (modes + particles - 1).max(1);
        let fermi = FermiMap::single(orbitals, particles)?;
        debug!(
            "Built Boson map for {} particles in {} modes: {} states",
            particles,
            modes,
            fermi.len()
        );
        Ok(BosonMap {
            modes,
            particles,
            fermi,
        })
    }

    pub fn modes(&self) -> usize {
        self.modes
    }

    pub fn particles(&self) -> usize {
        self.particles
    }

    pub fn len(&self) -> usize {
        self.fermi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fermi.is_empty()
    }

    pub fn as_slice(&self) -> &[Bitfield] {
        self.fermi.as_slice()
    }

    /// Index of the multiset `x`, in any order. No sign, bosonic amplitudes
    /// are symmetric.
    pub fn coords_to_index(&self, x: &[usize]) -> Option<usize> {
        if x.len() != self.particles || x.iter().any(|&k| k >= self.modes) {
            return None;
        }
        self.fermi.index_of(encode(x))
    }

    /// Decodes state `i` into its sorted multiset.
    pub fn coords(&self, i: usize) -> Option<Vec<usize>> {
        let w = self.fermi.get(i)?;
        decode(w, self.particles).ok()
    }
}

/// Sorts the multiset and sets bit `x_i + i`.
pub fn encode(x: &[usize]) -> Bitfield {
    let mut y = x.to_vec();
    y.sort_unstable();
    y.iter()
        .enumerate()
        .map(|(i, &k)| k + i)
        .filter(|&b| b < BITFIELD_BITS)
        .fold(0, |w, b| w | (1 << b))
}

/// Inverse of [encode], the running index is subtracted from every set bit.
pub fn decode(w: Bitfield, n: usize) -> Result<Vec<usize>> {
    let mut x = vec![0; n];
    decode_into(w, &mut x)?;
    for (i, k) in x.iter_mut().enumerate() {
        *k -= i;
    }
    Ok(x)
}

/// Checks that a pattern is a valid encoding of `n` bosons in `modes` modes,
/// `n` set bits within the `modes + n - 1` virtual orbitals.
pub fn is_valid(w: Bitfield, modes: usize, n: usize) -> bool {
    if modes == 0 {
        return false;
    }
    let virtual_orbitals = modes + n - 1;
    w.pop_count() as usize == n && w & !Bitfield::low_mask(virtual_orbitals) == 0
}
