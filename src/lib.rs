#[cfg(feature = "python-interface")]
use pyo3::prelude::*;

// LAPACK provider.
extern crate intel_mkl_src as _src;

/// Input and output file utils.
/// # Subfiles
/// * __`configuration`__ - Block configuration, in csv format, 2 column. The
/// header is `orbitals,particles`, each line is a block, the first line holding
/// the least significant orbitals.
/// * __`table`__ - Coordinate table of an enumeration map, in csv format.
pub mod parse;

// Have the bitfield primitives at the root.
include!("bitfield.rs");

/// Error type of the crate.
pub mod error;
pub use error::{FermiError, Result};

/// Helpers on counts: sums, products and binomial coefficients.
pub mod util;

/// Partition of the orbitals into blocks with fixed particle numbers.
/// # Definition
/// A configuration is a sequence of blocks $(o_i, N_i)$. The flat bitfield
/// packs them consecutively, the first block in the least significant bits.
/// The basis of a configuration is the tensor product of the $N_i$ particle
/// spaces of every block, of dimension
///
/// $$
/// \prod_i\binom{o_i}{N_i}
/// $$
pub mod config;

/// Fermionic enumeration.
/// # Definition
/// The basis state with orbitals $x_0<x_1<\dots<x_{N-1}$ occupied is
///
/// $$
/// \vert x\rangle=a^\dagger_{x_0}a^\dagger_{x_1}\cdots a^\dagger_{x_{N-1}}\vert0\rangle
/// $$
///
/// and is encoded by the bitfield $\sum_k2^{x_k}$. States are ordered by the
/// numeric value of their bitfield. Reordering the creation operators of an
/// unsorted coordinate list gives the sign of the sorting permutation.
pub mod fermi;

/// Bosonic enumeration through the stars and bars bijection.
/// # Definition
/// $N$ bosons in $m$ modes, $x_0\leq\dots\leq x_{N-1}$, are encoded as the
/// Fermi pattern of $N$ particles in $m+N-1$ orbitals with bits $x_i+i$ set.
pub mod boson;

/// Comprising two partitions of the same orbitals into a common coarser one.
pub mod comprise;

/// Matrix element types and the LU determinant.
pub mod scalar;

/// Coordinate list tensors.
/// # Ordering
/// Entries are unique, nonzero, and sorted with the last axis most
/// significant.
pub mod sparse;

/// Reduced density matrix kernels.
/// # Definition
/// For the sectors $p_1$, $p_2=N_1-N_2+p_1$, $N_1$, $N_2$, the kernel holds
///
/// $$
/// K_{ijn_1n_2}=\langle n_1\vert a^\dagger_{j}a_{i}\vert n_2\rangle
/// $$
///
/// where $a_i$ annihilates the $p_1$ orbitals of state $i$ and $a^\dagger_j$
/// creates the $p_2$ orbitals of state $j$. The $p$-body reduced density matrix
/// of $\psi$ is
///
/// $$
/// \Gamma_{ij}=\langle\psi\vert K_{ij}\vert\psi\rangle
/// $$
pub mod rdm;

/// Q and T1 representability conditions built from one- and two-body RDMs.
pub mod repr_conditions;

/// Pair structure wavefunctions, spatial orbital $i$ doubled into the spin
/// orbitals $2i$ and $2i+1$.
pub mod pairs;

/// Spin traces of one and two body operators.
/// # Ordering
/// Spin orbitals are `(0 up, 0 down, 1 up, 1 down, ...)`.
pub mod spintrace;

/// Reduced density matrices between two Slater determinants.
pub mod slater;

/// $N$-fold antisymmetrised tensor power of a one-body operator.
/// # Definition
///
/// $$
/// \langle x\vert A^{\wedge N}\vert y\rangle=\det\left[A_{x_ky_l}\right]_{k,l=0}^{N-1}
/// $$
pub mod tensor_op;

/// Raw binary buffers of doubles.
pub mod binio;

#[cfg(feature = "python-interface")]
pub mod python;

#[cfg(feature = "python-interface")]
#[pymodule]
fn fermifab(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use pyo3::wrap_pyfunction;

    m.add_function(wrap_pyfunction!(python::fermi2coords, m)?)?;
    m.add_function(wrap_pyfunction!(python::gen_rdm, m)?)?;
    m.add_function(wrap_pyfunction!(python::tensor_op, m)?)?;
    m.add_function(wrap_pyfunction!(python::tensor_op_complex, m)?)?;
    Ok(())
}
