use pyo3::exceptions::PyValueError;
use pyo3::{pyfunction, PyErr, PyResult};
use num::complex::Complex;

use crate::config::Configuration;
use crate::error::FermiError;
use crate::fermi::FermiMap;
use crate::sparse::SparseArray;

impl From<FermiError> for PyErr {
    fn from(err: FermiError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

type SparseTriplet = (Vec<usize>, Vec<f64>, Vec<Vec<usize>>);

fn to_triplet(k: &SparseArray<f64>) -> SparseTriplet {
    let ind = k.iter().map(|(idx, _)| idx.to_vec()).collect();
    (k.dims().to_vec(), k.values().to_vec(), ind)
}

/// Occupied orbitals of every state of the configuration, counted from 1.
#[pyfunction]
pub fn fermi2coords(orbs: Vec<usize>, n: Vec<usize>) -> PyResult<Vec<Vec<usize>>> {
    let map = FermiMap::build(&Configuration::new(&orbs, &n)?)?;
    let mut out = Vec::with_capacity(map.len());
    for i in 0..map.len() {
        out.push(map.coords(i)?.iter().map(|k| k + 1).collect());
    }
    Ok(out)
}

/// RDM kernel as `(dims, values, indices)`.
#[pyfunction]
pub fn gen_rdm(
    orbs: Vec<usize>,
    p1: Vec<usize>,
    n1: Vec<usize>,
    n2: Vec<usize>,
) -> PyResult<SparseTriplet> {
    let k = crate::rdm::generate_rdm_kernel(&orbs, &p1, &n1, &n2)?;
    Ok(to_triplet(&k))
}

/// Wedge power of a real row-major operator as `(dims, values, indices)`.
#[pyfunction]
pub fn tensor_op(orbs: usize, n: usize, a: Vec<f64>) -> PyResult<SparseTriplet> {
    let k = crate::tensor_op::tensor_op(orbs, n, &a)?;
    Ok(to_triplet(&k))
}

/// Wedge power of a complex operator given by its real and imaginary parts,
/// as `(dims, real values, imaginary values, indices)`.
#[pyfunction]
pub fn tensor_op_complex(
    orbs: usize,
    n: usize,
    re: Vec<f64>,
    im: Vec<f64>,
) -> PyResult<(Vec<usize>, Vec<f64>, Vec<f64>, Vec<Vec<usize>>)> {
    if re.len() != im.len() {
        return Err(FermiError::DimensionMismatch {
            expected: re.len(),
            found: im.len(),
        }
        .into());
    }
    let a: Vec<Complex<f64>> = re
        .iter()
        .zip(im.iter())
        .map(|(&x, &y)| Complex::new(x, y))
        .collect();
    let k = crate::tensor_op::tensor_op(orbs, n, &a)?;
    let ind = k.iter().map(|(idx, _)| idx.to_vec()).collect();
    Ok((
        k.dims().to_vec(),
        k.values().iter().map(|z| z.re).collect(),
        k.values().iter().map(|z| z.im).collect(),
        ind,
    ))
}
