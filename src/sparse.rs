use std::cmp::Ordering;

use log::trace;

use crate::error::{FermiError, Result};
use crate::scalar::Scalar;
use crate::util::{integer_product, try_with_capacity};

/// Compares index tuples with the last axis most significant.
pub fn compare_canonical(a: &[usize], b: &[usize]) -> Ordering {
    a.iter().rev().cmp(b.iter().rev())
}

/// Coordinate list tensor.
/// # Invariants
/// Index tuples are unique, values are nonzero and entries are sorted with
/// [compare_canonical]. The flat `indices` table holds `rank` indices per
/// entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseArray<T> {
    dims: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> SparseArray<T> {
    /// Tensor without any entry.
    pub fn empty(dims: Vec<usize>) -> Self {
        SparseArray {
            dims,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Accumulates raw entries into the canonical form. Entries sharing an
    /// index tuple are summed and zero sums are dropped.
    pub fn from_entries(dims: Vec<usize>, indices: Vec<usize>, values: Vec<T>) -> Result<Self> {
        let rank = dims.len();
        let nnz = values.len();
        if indices.len() != nnz * rank {
            return Err(FermiError::DimensionMismatch {
                expected: nnz * rank,
                found: indices.len(),
            });
        }
        for (k, &i) in indices.iter().enumerate() {
            let axis = k % rank.max(1);
            if i >= dims[axis] {
                return Err(FermiError::IndexOutOfBounds {
                    axis,
                    index: i,
                    dim: dims[axis],
                });
            }
        }
        let key = |k: usize| &indices[k * rank..(k + 1) * rank];

        let mut order: Vec<usize> = try_with_capacity(nnz)?;
        order.extend(0..nnz);
        order.sort_by(|&a, &b| compare_canonical(key(a), key(b)));

        let mut out_indices: Vec<usize> = try_with_capacity(nnz * rank)?;
        let mut out_values: Vec<T> = try_with_capacity(nnz)?;
        let mut last: Option<usize> = None;
        for k in order {
            if let Some(l) = last {
                if key(l) == key(k) {
                    if let Some(v) = out_values.last_mut() {
                        *v += values[k];
                    }
                    continue;
                }
                if out_values.last().map_or(false, |v| v.is_zero()) {
                    out_values.pop();
                    out_indices.truncate(out_indices.len() - rank);
                }
            }
            out_indices.extend_from_slice(key(k));
            out_values.push(values[k]);
            last = Some(k);
        }
        if out_values.last().map_or(false, |v| v.is_zero()) {
            out_values.pop();
            out_indices.truncate(out_indices.len() - rank);
        }
        trace!(
            "Accumulated {} entries into {} nonzeros, dims {:?}",
            nnz,
            out_values.len(),
            dims
        );

        let out = SparseArray {
            dims,
            indices: out_indices,
            values: out_values,
        };
        debug_assert!((1..out.nnz())
            .all(|k| compare_canonical(out.index(k - 1), out.index(k)) == Ordering::Less));
        Ok(out)
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Index tuple of entry `k`.
    pub fn index(&self, k: usize) -> &[usize] {
        let r = self.rank();
        &self.indices[k * r..(k + 1) * r]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[usize], T)> + '_ {
        (0..self.nnz()).map(move |k| (self.index(k), self.values[k]))
    }

    /// Value at `idx`, zero when no entry is stored there.
    pub fn get(&self, idx: &[usize]) -> T {
        let (mut lo, mut hi) = (0, self.nnz());
        while lo < hi {
            let mid = (lo + hi) / 2;
            match compare_canonical(self.index(mid), idx) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return self.values[mid],
            }
        }
        T::zero()
    }

    /// Row-major dense copy.
    pub fn to_dense(&self) -> Result<Vec<T>> {
        let size = integer_product(&self.dims)?;
        let mut dense: Vec<T> = try_with_capacity(size)?;
        dense.resize(size, T::zero());
        for (idx, v) in self.iter() {
            let offset = idx
                .iter()
                .zip(self.dims.iter())
                .fold(0, |acc, (&i, &d)| acc * d + i);
            dense[offset] = v;
        }
        Ok(dense)
    }

    /// Entries `(i, j, value)` of the matrix over the two last axes, for fixed
    /// leading indices.
    pub fn matrix(&self, lead: &[usize]) -> Result<Vec<(usize, usize, T)>> {
        let r = self.rank();
        if r < 2 || lead.len() + 2 != r {
            return Err(FermiError::DimensionMismatch {
                expected: r.saturating_sub(2),
                found: lead.len(),
            });
        }
        for (axis, (&i, &d)) in lead.iter().zip(self.dims.iter()).enumerate() {
            if i >= d {
                return Err(FermiError::IndexOutOfBounds {
                    axis,
                    index: i,
                    dim: d,
                });
            }
        }
        Ok(self
            .iter()
            .filter(|(idx, _)| &idx[..r - 2] == lead)
            .map(|(idx, v)| (idx[r - 2], idx[r - 1], v))
            .collect())
    }
}
