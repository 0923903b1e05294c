use log::info;

use crate::boson::BosonMap;
use crate::error::{FermiError, Result};
use crate::fermi::{decode, FermiMap};
use crate::sparse::SparseArray;
use crate::util::try_with_capacity;

/// Spin trace of a single particle in `2 * spatial` spin orbitals, ordered
/// `(0 up, 0 down, 1 up, 1 down, ...)`.
/// Entry $(a, b, 2b+\sigma, 2a+\sigma)$ is one for both spins, with dims
/// `(spatial, spatial, 2 spatial, 2 spatial)`.
pub fn spintrace_single(spatial: usize) -> Result<SparseArray<f64>> {
    if spatial == 0 {
        return Err(FermiError::InvalidConfiguration {
            details: "no spatial orbital".to_owned(),
        });
    }
    let nnz = 2 * spatial * spatial;
    let mut indices: Vec<usize> = try_with_capacity(4 * nnz)?;
    let mut values: Vec<f64> = try_with_capacity(nnz)?;
    for a in 0..spatial {
        for b in 0..spatial {
            for s in 0..2 {
                indices.extend_from_slice(&[a, b, 2 * b + s, 2 * a + s]);
                values.push(1.0);
            }
        }
    }
    SparseArray::from_entries(
        vec![spatial, spatial, 2 * spatial, 2 * spatial],
        indices,
        values,
    )
}

/// Orders the spatial orbitals of a Coulomb integral $(ab\vert cd)$ with
/// real orbitals, so that $a\leq b$, $c\leq d$, and $(a,b)\leq(c,d)$ with the
/// second entry most significant.
pub fn apply_symmetry(ab: &mut [usize; 2], cd: &mut [usize; 2]) {
    if ab[0] > ab[1] {
        ab.swap(0, 1);
    }
    if cd[0] > cd[1] {
        cd.swap(0, 1);
    }
    if ab[1] > cd[1] || (ab[1] == cd[1] && ab[0] > cd[0]) {
        std::mem::swap(ab, cd);
    }
}

/// Spin trace of the two-body Coulomb operator.
/// # Layout
/// Dims are `(|C|, |C|, |F|, |F|)`, where `C` is the Boson map of 2 particles
/// in `spatial` modes, indexing the symmetric pairs of a Coulomb integral
/// $(ab\vert cd)$, and `F` the Fermi map of 2 particles in `2 * spatial` spin
/// orbitals. The direct term contributes $+1$ when both spins match, the
/// exchange term $-1$ when the swapped spins match.
pub fn spintrace_coulomb(spatial: usize) -> Result<SparseArray<f64>> {
    if spatial == 0 {
        return Err(FermiError::InvalidConfiguration {
            details: "no spatial orbital".to_owned(),
        });
    }
    let coulomb = BosonMap::build(spatial, 2)?;
    let two = FermiMap::single(2 * spatial, 2)?;

    let mut indices = Vec::new();
    let mut values = Vec::new();
    let mut push = |ab: [usize; 2], cd: [usize; 2], i: usize, j: usize, v: f64| -> Result<()> {
        let (mut ab, mut cd) = (ab, cd);
        apply_symmetry(&mut ab, &mut cd);
        let m0 = coulomb.coords_to_index(&ab).ok_or(FermiError::Integrity {
            expected: coulomb.len(),
            found: coulomb.len() + 1,
        })?;
        let m1 = coulomb.coords_to_index(&cd).ok_or(FermiError::Integrity {
            expected: coulomb.len(),
            found: coulomb.len() + 1,
        })?;
        indices.try_reserve(4)?;
        indices.extend_from_slice(&[m0, m1, i, j]);
        values.try_reserve(1)?;
        values.push(v);
        Ok(())
    };
    for (j, &wp) in two.iter().enumerate() {
        let p = decode(wp, 2)?;
        for (i, &wq) in two.iter().enumerate() {
            let q = decode(wq, 2)?;
            if p[0] % 2 == q[0] % 2 && p[1] % 2 == q[1] % 2 {
                push([p[0] / 2, q[0] / 2], [p[1] / 2, q[1] / 2], i, j, 1.0)?;
            }
            if p[0] % 2 == q[1] % 2 && p[1] % 2 == q[0] % 2 {
                push([p[0] / 2, q[1] / 2], [p[1] / 2, q[0] / 2], i, j, -1.0)?;
            }
        }
    }
    let dims = vec![coulomb.len(), coulomb.len(), two.len(), two.len()];
    let k = SparseArray::from_entries(dims, indices, values)?;
    info!("Generated Coulomb spin trace {:?} with {} entries", k.dims(), k.nnz());
    Ok(k)
}
