use log::debug;

use crate::error::{FermiError, Result};
use crate::rdm::{p_to_n_body, reduce_operator};
use crate::scalar::Scalar;
use crate::util::{binomial, try_with_capacity};

/// Source of the one-body density matrix entering the conditions.
#[derive(Debug, Clone, Copy)]
pub enum OneBody<'a, T> {
    /// Dense row-major one-body RDM.
    Rdm(&'a [T]),
    /// Particle number $N$, the one-body RDM is contracted from the two-body
    /// one as $\Gamma^1=\mathrm{rdm}(\Gamma^2,1)/(N-1)$.
    Particles(usize),
}

/// One-body RDM contracted from the two-body RDM `g2` of `n` particles.
pub fn one_body_from_two_body<T: Scalar>(orbs: usize, g2: &[T], n: usize) -> Result<Vec<T>> {
    if n < 2 {
        return Err(FermiError::InvalidConfiguration {
            details: format!("two-body contraction needs at least 2 particles, got {}", n),
        });
    }
    let g1 = reduce_operator(&[orbs], &[2], &[1], g2)?;
    let scale = 1.0 / (n - 1) as f64;
    Ok(g1.into_iter().map(|v| v * scale).collect())
}

fn resolve_one_body<T: Scalar>(orbs: usize, g2: &[T], g1: OneBody<'_, T>) -> Result<Vec<T>> {
    match g1 {
        OneBody::Rdm(g) => {
            if g.len() != orbs * orbs {
                return Err(FermiError::DimensionMismatch {
                    expected: orbs * orbs,
                    found: g.len(),
                });
            }
            Ok(g.to_vec())
        }
        OneBody::Particles(n) => one_body_from_two_body(orbs, g2, n),
    }
}

/// Adds the identity to the row-major `dim` by `dim` matrix `a`.
fn add_identity<T: Scalar>(a: &mut [T], dim: usize) {
    for i in 0..dim {
        a[i * dim + i] += T::one();
    }
}

/// Operator of the Q condition on the two-particle space.
/// # Definition
///
/// $$
/// Q=\Gamma^2-\Gamma^1_{1\to2}+\mathbb{1}
/// $$
///
/// where $\Gamma^1_{1\to2}$ is the one-body RDM lifted to two particles by
/// [p_to_n_body]. A representable pair $(\Gamma^1,\Gamma^2)$ has a positive
/// semidefinite $Q$.
pub fn calc_q<T: Scalar>(orbs: usize, g2: &[T], g1: OneBody<'_, T>) -> Result<Vec<T>> {
    let dim2 = binomial(orbs, 2)?;
    if g2.len() != dim2 * dim2 {
        return Err(FermiError::DimensionMismatch {
            expected: dim2 * dim2,
            found: g2.len(),
        });
    }
    let g1 = resolve_one_body(orbs, g2, g1)?;
    let lifted = p_to_n_body(&[orbs], &[1], &g1, &[2])?;
    let mut q: Vec<T> = try_with_capacity(dim2 * dim2)?;
    q.extend(g2.iter().zip(lifted.iter()).map(|(&a, &b)| a - b));
    add_identity(&mut q, dim2);
    debug!("Q condition on {} pair states", dim2);
    Ok(q)
}

/// Operator of the T1 condition on the three-particle space,
/// $T_1=\Gamma^2_{2\to3}-\Gamma^1_{1\to3}+\mathbb{1}$.
pub fn calc_t1<T: Scalar>(orbs: usize, g2: &[T], g1: OneBody<'_, T>) -> Result<Vec<T>> {
    let dim2 = binomial(orbs, 2)?;
    if g2.len() != dim2 * dim2 {
        return Err(FermiError::DimensionMismatch {
            expected: dim2 * dim2,
            found: g2.len(),
        });
    }
    let g1 = resolve_one_body(orbs, g2, g1)?;
    let lifted2 = p_to_n_body(&[orbs], &[2], g2, &[3])?;
    let lifted1 = p_to_n_body(&[orbs], &[1], &g1, &[3])?;
    let dim3 = binomial(orbs, 3)?;
    let mut t: Vec<T> = try_with_capacity(dim3 * dim3)?;
    t.extend(lifted2.iter().zip(lifted1.iter()).map(|(&a, &b)| a - b));
    add_identity(&mut t, dim3);
    debug!("T1 condition on {} triple states", dim3);
    Ok(t)
}
