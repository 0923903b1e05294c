use log::info;

use crate::config::Configuration;
use crate::error::{FermiError, Result};
use crate::fermi::{decode_into, FermiMap};
use crate::rdm::reduced_sector;
use crate::sparse::SparseArray;
use crate::util::{binomial, integer_sum, try_with_capacity};
use crate::{BitOps, Bitfield};

/// Isometry from pair states into the full spin orbital space.
/// Spatial orbital `i` of the half space becomes the occupied pair
/// `(2i, 2i + 1)`. Entry `(n, m)` maps half state `m` onto full state `n`,
/// with dims `(|full|, |half|)`.
pub fn pair_map(orbs_half: usize, n_half: usize) -> Result<SparseArray<f64>> {
    if n_half == 0 {
        return Err(FermiError::InvalidConfiguration {
            details: "pair map needs at least one pair".to_owned(),
        });
    }
    let map_half = FermiMap::single(orbs_half, n_half)?;
    let map_full = FermiMap::single(2 * orbs_half, 2 * n_half)?;

    let mut x_half = vec![0usize; n_half];
    let mut x = vec![0usize; 2 * n_half];
    let mut indices: Vec<usize> = try_with_capacity(2 * map_half.len())?;
    let mut values: Vec<f64> = try_with_capacity(map_half.len())?;
    for (m, &w) in map_half.iter().enumerate() {
        decode_into(w, &mut x_half)?;
        for (i, &k) in x_half.iter().enumerate() {
            x[2 * i] = 2 * k;
            x[2 * i + 1] = 2 * k + 1;
        }
        let n = map_full.coords_to_index(&x).ok_or(FermiError::Integrity {
            expected: map_half.len(),
            found: m,
        })?;
        indices.extend_from_slice(&[n, m]);
        values.push(1.0);
    }
    SparseArray::from_entries(vec![map_full.len(), map_half.len()], indices, values)
}

/// RDM kernel restricted to pair wavefunctions.
/// Every pair `(2i, 2i + 1)` is treated as a single bosonic orbital of the
/// half space, so the kernel carries no exchange sign. Dimensions and index
/// layout follow [crate::rdm::generate_rdm_kernel] on the half space.
pub fn generate_pair_rdm_kernel(
    orbs_half: &[usize],
    p1_half: &[usize],
    n1_half: &[usize],
    n2_half: &[usize],
) -> Result<SparseArray<f64>> {
    let config_n1 = Configuration::new(orbs_half, n1_half)?;
    let config_n2 = Configuration::new(orbs_half, n2_half)?;
    let config_p1 = Configuration::new(orbs_half, p1_half)?;
    let n1_tot = integer_sum(n1_half);
    let n2_tot = integer_sum(n2_half);
    let p1_tot = integer_sum(p1_half);
    if n1_tot != n2_tot {
        return Err(FermiError::InvalidConfiguration {
            details: format!("total pair numbers differ, {} and {}", n1_tot, n2_tot),
        });
    }
    if p1_tot == 0 || p1_tot > n2_tot {
        return Err(FermiError::InvalidConfiguration {
            details: format!("reduced pair number {} out of 1..={}", p1_tot, n2_tot),
        });
    }
    if let Some(block) = p1_half.iter().zip(n2_half.iter()).position(|(p, n)| p > n) {
        return Err(FermiError::InvalidConfiguration {
            details: format!("block {} annihilates more pairs than it holds", block),
        });
    }
    let p2_half = reduced_sector(p1_half, n1_half, n2_half)?;
    let config_p2 = Configuration::new(orbs_half, &p2_half)?;
    let p2_tot = integer_sum(&p2_half);

    let map_n1 = FermiMap::build(&config_n1)?;
    let map_n2 = FermiMap::build(&config_n2)?;
    let map_p1 = FermiMap::build(&config_p1)?;
    let map_p2 = FermiMap::build(&config_p2)?;

    let mut y = vec![0usize; n1_tot];
    let mut indices = Vec::new();
    let mut values = Vec::new();
    let mut expected = 0usize;
    for (i0, &a) in map_p1.iter().enumerate() {
        for (i1, &b) in map_p2.iter().enumerate() {
            decode_into(b, &mut y[..p2_tot])?;
            expected += pair_entries(&config_n2, p1_half, a | b)?;
            for (i3, &w) in map_n2.iter().enumerate() {
                if !a.is_subset_of(w) {
                    continue;
                }
                decode_into(w - a, &mut y[p2_tot..])?;
                if let Some(i2) = map_n1.coords_to_index(&y) {
                    indices.try_reserve(4)?;
                    indices.extend_from_slice(&[i0, i1, i2, i3]);
                    values.try_reserve(1)?;
                    values.push(1.0);
                }
            }
        }
    }
    if values.len() != expected {
        return Err(FermiError::Integrity {
            expected,
            found: values.len(),
        });
    }
    let dims = vec![map_p1.len(), map_p2.len(), map_n1.len(), map_n2.len()];
    info!("Generated pair RDM kernel {:?} with {} entries", dims, values.len());
    SparseArray::from_entries(dims, indices, values)
}

/// Pair analogue of [crate::rdm::generate_annihilation] on the half space.
/// Entry $(i, k, n)$ is one when the pairs of state $i$ of the $p$ sector and
/// those of state $k$ of the $N-p$ sector together form state $n$ of the $N$
/// sector. Pairs commute, so every entry is positive.
pub fn generate_pair_annihilation(orbs_half: usize, p_half: usize, n_half: usize) -> Result<SparseArray<f64>> {
    if p_half == 0 || p_half >= n_half {
        return Err(FermiError::InvalidConfiguration {
            details: format!(
                "pair annihilation needs 1 <= p < N, got p = {}, N = {}",
                p_half, n_half
            ),
        });
    }
    let map_p = FermiMap::single(orbs_half, p_half)?;
    let map_n = FermiMap::single(orbs_half, n_half)?;
    let map_np = FermiMap::single(orbs_half, n_half - p_half)?;

    let mut indices = Vec::new();
    let mut values = Vec::new();
    for (i, &wp) in map_p.iter().enumerate() {
        for (k, &wnp) in map_np.iter().enumerate() {
            if wp & wnp != 0 {
                continue;
            }
            if let Some(m) = map_n.index_of(wp | wnp) {
                indices.try_reserve(3)?;
                indices.extend_from_slice(&[i, k, m]);
                values.try_reserve(1)?;
                values.push(1.0);
            }
        }
    }
    let expected = map_n.len() * binomial(n_half, p_half)?;
    if values.len() != expected {
        return Err(FermiError::Integrity {
            expected,
            found: values.len(),
        });
    }
    let dims = vec![map_p.len(), map_np.len(), map_n.len()];
    info!("Generated pair annihilation kernel {:?} with {} entries", dims, values.len());
    SparseArray::from_entries(dims, indices, values)
}

/// Number of `N2` states reached from the pair `(p1, p2)` patterns, the
/// remaining pairs of every block avoid the orbitals of both patterns.
fn pair_entries(config_n2: &Configuration, p1: &[usize], both: Bitfield) -> Result<usize> {
    let mut count = 1usize;
    for (i, b) in config_n2.blocks().iter().enumerate() {
        let used = (both & config_n2.block_mask(i)).pop_count() as usize;
        let c = binomial(b.orbitals - used, b.particles - p1[i])?;
        count = count.checked_mul(c).ok_or(FermiError::DimensionOverflow)?;
    }
    Ok(count)
}
