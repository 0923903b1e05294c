use log::{debug, info};
use rayon::prelude::*;

use crate::error::{FermiError, Result};
use crate::fermi::{decode_into, FermiMap};
use crate::scalar::{determinant, Scalar};
use crate::sparse::SparseArray;
use crate::util::try_with_capacity;

/// Fills the `n` by `n` minor of `a` with rows `x` and columns `y`.
/// Returns `false` when a row or a column of the minor vanishes, in which
/// case the determinant is zero and the buffer content is meaningless.
fn fill_minor<T: Scalar>(orbs: usize, a: &[T], x: &[usize], y: &[usize], minor: &mut [T]) -> bool {
    let n = x.len();
    for (k, &xk) in x.iter().enumerate() {
        let row = &a[xk * orbs..(xk + 1) * orbs];
        let mut nonzero = false;
        for (l, &yl) in y.iter().enumerate() {
            let v = row[yl];
            nonzero |= !v.is_zero();
            // Column-major for LAPACK, transposition keeps the determinant.
            minor[k * n + l] = v;
        }
        if !nonzero {
            return false;
        }
    }
    (0..n).all(|l| (0..n).any(|k| !minor[k * n + l].is_zero()))
}

/// $N$-fold antisymmetrised tensor power of the one-body operator `a`.
/// # Definition
/// `a` is the row-major `orbs` by `orbs` matrix. Entry $(i, j)$ of the result
/// is the determinant of the minor of `a` with the orbitals of state $i$ as
/// rows and those of state $j$ as columns, states taken from the Fermi map of
/// `n` particles in `orbs` orbitals. Minors with a zero row or column, or a
/// zero LU pivot, give no entry.
/// # Parallelism
/// Rows are distributed over the rayon pool, each worker owning its minor and
/// pivot buffers. Chunks are merged in row order, so the output does not
/// depend on the scheduling.
pub fn tensor_op<T: Scalar>(orbs: usize, n: usize, a: &[T]) -> Result<SparseArray<T>> {
    if a.len() != orbs * orbs {
        return Err(FermiError::DimensionMismatch {
            expected: orbs * orbs,
            found: a.len(),
        });
    }
    let map = FermiMap::single(orbs, n)?;
    let num = map.len();

    let mut coords: Vec<usize> = try_with_capacity(num * n)?;
    coords.resize(num * n, 0);
    for (i, &w) in map.iter().enumerate() {
        decode_into(w, &mut coords[i * n..(i + 1) * n])?;
    }
    debug!("Decoded {} states of {} particles in {} orbitals", num, n, orbs);

    let rows = (0..num)
        .into_par_iter()
        .map_init(
            || (vec![T::zero(); n * n], vec![0i32; n]),
            |(minor, ipiv), i| -> Result<Vec<(usize, T)>> {
                let x = &coords[i * n..(i + 1) * n];
                let mut row = Vec::new();
                for j in 0..num {
                    let y = &coords[j * n..(j + 1) * n];
                    if !fill_minor(orbs, a, x, y, minor) {
                        continue;
                    }
                    if let Some(d) = determinant(n, minor, ipiv)? {
                        row.try_reserve(1)?;
                        row.push((j, d));
                    }
                }
                Ok(row)
            },
        )
        .collect::<Result<Vec<Vec<(usize, T)>>>>()?;

    let nnz: usize = rows.iter().map(|r| r.len()).sum();
    let mut indices: Vec<usize> = try_with_capacity(2 * nnz)?;
    let mut values: Vec<T> = try_with_capacity(nnz)?;
    for (i, row) in rows.into_iter().enumerate() {
        for (j, d) in row {
            indices.extend_from_slice(&[i, j]);
            values.push(d);
        }
    }
    info!("Tensor power N = {} over {} orbitals: {} x {} with {} entries", n, orbs, num, num, nnz);
    SparseArray::from_entries(vec![num, num], indices, values)
}
