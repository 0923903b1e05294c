use log::{debug, info};
use rayon::prelude::*;

use crate::config::Configuration;
use crate::error::{FermiError, Result};
use crate::fermi::{annihilation_sign, decode_into, FermiMap};
use crate::scalar::Scalar;
use crate::sparse::SparseArray;
use crate::util::{binomial, integer_product, integer_sum, try_with_capacity};

fn check_lengths(orbs: &[usize], other: &[usize]) -> Result<()> {
    if orbs.len() != other.len() {
        return Err(FermiError::LengthMismatch {
            expected: orbs.len(),
            found: other.len(),
        });
    }
    Ok(())
}

/// Particle numbers of the second reduced sector, $p_2=N_1-N_2+p_1$.
pub fn reduced_sector(p1: &[usize], n1: &[usize], n2: &[usize]) -> Result<Vec<usize>> {
    check_lengths(p1, n1)?;
    check_lengths(p1, n2)?;
    p1.iter()
        .zip(n1.iter().zip(n2.iter()))
        .enumerate()
        .map(|(block, (&p, (&a, &b)))| {
            (a + p)
                .checked_sub(b)
                .ok_or(FermiError::NegativeSector { block })
        })
        .collect()
}

/// Number of basis states of a sector, zero when a block is overfull.
fn sector_dimension(orbs: &[usize], particles: &[usize]) -> Result<usize> {
    let factors = orbs
        .iter()
        .zip(particles.iter())
        .map(|(&o, &n)| binomial(o, n))
        .collect::<Result<Vec<usize>>>()?;
    integer_product(&factors)
}

/// Closed form of the number of nonzero kernel entries,
/// $|N_2|\prod_i\binom{N_{2,i}}{p_{1,i}}\binom{o_i-N_{2,i}+p_{1,i}}{p_{2,i}}$.
pub fn expected_kernel_nnz(
    orbs: &[usize],
    p1: &[usize],
    n1: &[usize],
    n2: &[usize],
) -> Result<usize> {
    check_lengths(orbs, p1)?;
    let config_n2 = Configuration::new(orbs, n2)?;
    let p2 = reduced_sector(p1, n1, n2)?;
    let mut factors = vec![config_n2.dimension()?];
    for i in 0..orbs.len() {
        if p1[i] > n2[i] {
            return Ok(0);
        }
        factors.push(binomial(n2[i], p1[i])?);
        factors.push(binomial(orbs[i] - n2[i] + p1[i], p2[i])?);
    }
    integer_product(&factors)
}

/// Kernel of the p-body reduced density matrix.
/// # Definition
/// Entry $(i, j, n_1, n_2)$ is the matrix element
/// $\langle n_1\vert a^\dagger_{j} a_{i}\vert n_2\rangle = \pm1$, where $i$
/// indexes the $p_1$ sector, $j$ the $p_2=N_1-N_2+p_1$ sector, and $n_1$,
/// $n_2$ the full sectors. For a state $\psi$ in the $N$ sector,
/// $\langle\psi\vert K_{ij}\psi\rangle$ is the element $(i,j)$ of its
/// $p$-body reduced density matrix.
/// # Errors
/// Configurations are validated before any enumeration. The number of
/// generated entries is checked against [expected_kernel_nnz].
pub fn generate_rdm_kernel(
    orbs: &[usize],
    p1: &[usize],
    n1: &[usize],
    n2: &[usize],
) -> Result<SparseArray<f64>> {
    check_lengths(orbs, p1)?;
    check_lengths(orbs, n1)?;
    check_lengths(orbs, n2)?;
    let config_n1 = Configuration::new(orbs, n1)?;
    let config_n2 = Configuration::new(orbs, n2)?;
    let config_p1 = Configuration::new(orbs, p1)?;
    let p2 = reduced_sector(p1, n1, n2)?;

    if p1.iter().zip(n2.iter()).any(|(p, n)| p > n) {
        let dims = vec![
            config_p1.dimension()?,
            sector_dimension(orbs, &p2)?,
            config_n1.dimension()?,
            config_n2.dimension()?,
        ];
        info!("Reduced sector larger than the state, empty kernel {:?}", dims);
        return Ok(SparseArray::empty(dims));
    }
    let config_p2 = Configuration::new(orbs, &p2)?;

    let map_n1 = FermiMap::build(&config_n1)?;
    let map_n2 = FermiMap::build(&config_n2)?;
    let map_p1 = FermiMap::build(&config_p1)?;
    let map_p2 = FermiMap::build(&config_p2)?;

    let n1_tot = integer_sum(n1);
    let n2_tot = integer_sum(n2);
    let p1_tot = integer_sum(p1);
    let p2_tot = integer_sum(&p2);
    let expected = expected_kernel_nnz(orbs, p1, n1, n2)?;
    debug!(
        "RDM kernel sectors p1 {:?}, p2 {:?}, N1 {:?}, N2 {:?}, expecting {} entries",
        p1, p2, n1, n2, expected
    );

    let chunks = (0..map_p1.len())
        .into_par_iter()
        .map_init(
            || vec![0usize; n1_tot],
            |y, i0| -> Result<(Vec<usize>, Vec<f64>)> {
                let mut indices = Vec::new();
                let mut values = Vec::new();
                let a = map_p1.as_slice()[i0];
                for (i1, &w2) in map_p2.iter().enumerate() {
                    decode_into(w2, &mut y[..p2_tot])?;
                    for (i3, &w) in map_n2.iter().enumerate() {
                        let s0 = annihilation_sign(w, a);
                        if s0 == 0 {
                            continue;
                        }
                        decode_into(w - a, &mut y[p2_tot..p2_tot + n2_tot - p1_tot])?;
                        let (i2, s1) = match map_n1.coords_to_index_with_sign(&y[..]) {
                            Some(v) => v,
                            None => continue,
                        };
                        #[cfg(feature = "verbose")]
                        log::trace!("K[{}, {}, {}, {}] = {}", i0, i1, i2, i3, s0 * s1);
                        indices.try_reserve(4)?;
                        indices.extend_from_slice(&[i0, i1, i2, i3]);
                        values.try_reserve(1)?;
                        values.push((s0 * s1) as f64);
                    }
                }
                Ok((indices, values))
            },
        )
        .collect::<Result<Vec<(Vec<usize>, Vec<f64>)>>>()?;

    let found: usize = chunks.iter().map(|(_, v)| v.len()).sum();
    if found != expected {
        return Err(FermiError::Integrity { expected, found });
    }
    let mut indices: Vec<usize> = try_with_capacity(4 * found)?;
    let mut values: Vec<f64> = try_with_capacity(found)?;
    for (idx, val) in chunks {
        indices.extend(idx);
        values.extend(val);
    }
    let dims = vec![map_p1.len(), map_p2.len(), map_n1.len(), map_n2.len()];
    info!("Generated RDM kernel {:?} with {} entries", dims, found);
    SparseArray::from_entries(dims, indices, values)
}

/// Matrix of the `p`-fold annihilation in an unpartitioned space.
/// # Layout
/// Entry $(i, k, n)$ is the sign of the state $n$ of the $N$ sector built by
/// prepending the $p$ orbitals of pattern $i$ to the $N-p$ orbitals of
/// pattern $k$. Given a $p$-body wavefunction $\chi$, the contraction of its
/// coefficients over the first axis is the annihilation operator $a_\chi$
/// from the $N$ sector to the $N-p$ sector.
pub fn generate_annihilation(orbs: usize, p: usize, n: usize) -> Result<SparseArray<f64>> {
    if p == 0 || p >= n {
        return Err(FermiError::InvalidConfiguration {
            details: format!("annihilation needs 1 <= p < N, got p = {}, N = {}", p, n),
        });
    }
    let map_p = FermiMap::single(orbs, p)?;
    let map_n = FermiMap::single(orbs, n)?;
    let map_np = FermiMap::single(orbs, n - p)?;

    let mut x = vec![0usize; n];
    let mut indices = Vec::new();
    let mut values = Vec::new();
    for (i, &wp) in map_p.iter().enumerate() {
        decode_into(wp, &mut x[..p])?;
        for (k, &wnp) in map_np.iter().enumerate() {
            decode_into(wnp, &mut x[p..])?;
            if let Some((m, s)) = map_n.coords_to_index_with_sign(&x) {
                indices.try_reserve(3)?;
                indices.extend_from_slice(&[i, k, m]);
                values.try_reserve(1)?;
                values.push(s as f64);
            }
        }
    }
    let dims = vec![map_p.len(), map_np.len(), map_n.len()];
    info!("Generated annihilation kernel {:?} with {} entries", dims, values.len());
    SparseArray::from_entries(dims, indices, values)
}

/// Dense $p$-body reduced density matrix of the coefficient vector `psi`,
/// $G_{ij}=\sum\overline{\psi_{n_1}}K_{ijn_1n_2}\psi_{n_2}$, row-major.
pub fn reduced_density_matrix<T: Scalar>(
    orbs: &[usize],
    n: &[usize],
    p: &[usize],
    psi: &[T],
) -> Result<Vec<T>> {
    let kernel = generate_rdm_kernel(orbs, p, n, n)?;
    let dims = kernel.dims();
    if psi.len() != dims[3] {
        return Err(FermiError::DimensionMismatch {
            expected: dims[3],
            found: psi.len(),
        });
    }
    let dim_p = dims[0];
    let mut g: Vec<T> = try_with_capacity(dim_p * dim_p)?;
    g.resize(dim_p * dim_p, T::zero());
    for (idx, v) in kernel.iter() {
        g[idx[0] * dim_p + idx[1]] += psi[idx[2]].conj() * psi[idx[3]] * v;
    }
    Ok(g)
}

/// Dense $p$-body reduction of the $N$-body density operator `d`,
/// $G_{ij}=\sum K_{ijn_1n_2}d_{n_2n_1}$, both row-major. For
/// $d=\psi\psi^\dagger$ it equals [reduced_density_matrix] of $\psi$.
pub fn reduce_operator<T: Scalar>(orbs: &[usize], n: &[usize], p: &[usize], d: &[T]) -> Result<Vec<T>> {
    let kernel = generate_rdm_kernel(orbs, p, n, n)?;
    let dims = kernel.dims();
    let (dim_p, dim_n) = (dims[0], dims[3]);
    if d.len() != dim_n * dim_n {
        return Err(FermiError::DimensionMismatch {
            expected: dim_n * dim_n,
            found: d.len(),
        });
    }
    let mut g: Vec<T> = try_with_capacity(dim_p * dim_p)?;
    g.resize(dim_p * dim_p, T::zero());
    for (idx, v) in kernel.iter() {
        g[idx[0] * dim_p + idx[1]] += d[idx[3] * dim_n + idx[2]] * v;
    }
    Ok(g)
}

/// Lifts the $p$-body operator `h` to the $N$-body space,
/// $H=\sum_{ij}h_{ij}a^\dagger_ia_j$. Both are row-major.
pub fn p_to_n_body<T: Scalar>(orbs: &[usize], p: &[usize], h: &[T], n: &[usize]) -> Result<Vec<T>> {
    let kernel = generate_rdm_kernel(orbs, p, n, n)?;
    let dims = kernel.dims();
    let (dim_p, dim_n) = (dims[0], dims[2]);
    if h.len() != dim_p * dim_p {
        return Err(FermiError::DimensionMismatch {
            expected: dim_p * dim_p,
            found: h.len(),
        });
    }
    let mut out: Vec<T> = try_with_capacity(dim_n * dim_n)?;
    out.resize(dim_n * dim_n, T::zero());
    for (idx, v) in kernel.iter() {
        out[idx[2] * dim_n + idx[3]] += h[idx[1] * dim_p + idx[0]] * v;
    }
    Ok(out)
}
