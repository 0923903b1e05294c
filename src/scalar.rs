use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use lapack::{dgetrf, zgetrf};
use num::complex::Complex;
use num::{One, Zero};

use crate::error::{FermiError, Result};

/// Matrix element type of the generated tensors.
/// # Implementations
/// Real `f64` and `Complex<f64>`. The LAPACK routines are reached through the
/// trait so the determinant and the wedge power stay generic.
pub trait Scalar:
    Add<Output = Self> +
    AddAssign +
    Sub<Output = Self> +
    Mul<Output = Self> +
    Mul<f64, Output = Self> +
    Neg<Output = Self> +
    Zero +
    One +
    PartialEq +
    From<f64> +
    Copy +
    Display +
    Debug +
    Send +
    Sync +
    Sized
{
    fn conj(self) -> Self;
    fn abs(self) -> f64;
    /// Unit modulus factor, `self / |self|`.
    fn phase(self) -> Self;
    fn re(self) -> f64;
    fn im(self) -> f64;
    unsafe fn getrf(m: i32, n: i32, a: &mut [Self], lda: i32, ipiv: &mut [i32], info: &mut i32);
}

impl Scalar for f64 {
    fn conj(self) -> Self {
        self
    }

    fn abs(self) -> f64 {
        <f64>::abs(self)
    }

    fn phase(self) -> Self {
        self.signum()
    }

    fn re(self) -> f64 {
        self
    }

    fn im(self) -> f64 {
        0.0
    }

    unsafe fn getrf(m: i32, n: i32, a: &mut [f64], lda: i32, ipiv: &mut [i32], info: &mut i32) {
        dgetrf(m, n, a, lda, ipiv, info)
    }
}

impl Scalar for Complex<f64> {
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    fn abs(self) -> f64 {
        self.norm()
    }

    fn phase(self) -> Self {
        self / self.norm()
    }

    fn re(self) -> f64 {
        self.re
    }

    fn im(self) -> f64 {
        self.im
    }

    unsafe fn getrf(m: i32, n: i32, a: &mut [Complex<f64>], lda: i32, ipiv: &mut [i32], info: &mut i32) {
        zgetrf(m, n, a, lda, ipiv, info)
    }
}

/// Determinant of the `n` by `n` matrix `a`, destroyed in the process.
/// # Method
/// Pivoted LU from `getrf`. The sign comes from the row swaps, the magnitude
/// is summed in log space. `None` when LAPACK finds an exactly zero pivot,
/// no threshold is applied to the result.
pub fn determinant<T: Scalar>(n: usize, a: &mut [T], ipiv: &mut [i32]) -> Result<Option<T>> {
    if a.len() < n * n || ipiv.len() < n {
        return Err(FermiError::DimensionMismatch {
            expected: n * n,
            found: a.len(),
        });
    }
    if n == 0 {
        return Ok(Some(T::one()));
    }
    let m = n as i32;
    let mut info = 0;
    unsafe {
        T::getrf(m, m, &mut a[..n * n], m, &mut ipiv[..n], &mut info);
    }
    if info < 0 {
        return Err(FermiError::Lapack { info });
    }
    if info > 0 {
        return Ok(None);
    }
    let mut phase = T::one();
    let mut log_abs = 0.0;
    for i in 0..n {
        let u = a[i + i * n];
        if ipiv[i] != (i + 1) as i32 {
            phase = -phase;
        }
        phase = phase * u.phase();
        log_abs += u.abs().ln();
    }
    Ok(Some(phase * log_abs.exp()))
}

#[cfg(test)]
mod test {
    use super::*;
    use assert::close;

    #[test]
    fn test_determinant_real() {
        // Row-major and column-major give the same determinant.
        let mut a = vec![2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0];
        let mut ipiv = vec![0; 3];
        let d = determinant(3, &mut a, &mut ipiv).unwrap().unwrap();
        close(d, 18.0, 1e-12);
    }

    #[test]
    fn test_determinant_swap_sign() {
        let mut a = vec![0.0, 1.0, 1.0, 0.0];
        let mut ipiv = vec![0; 2];
        let d = determinant(2, &mut a, &mut ipiv).unwrap().unwrap();
        close(d, -1.0, 1e-14);
    }

    #[test]
    fn test_determinant_singular() {
        let mut a = vec![1.0, 2.0, 2.0, 4.0];
        let mut ipiv = vec![0; 2];
        // Exact arithmetic in the elimination yields a zero pivot.
        assert_eq!(determinant(2, &mut a, &mut ipiv).unwrap(), None);
    }

    #[test]
    fn test_determinant_complex() {
        let i = Complex::new(0.0, 1.0);
        let one = Complex::new(1.0, 0.0);
        // det [[1, i], [i, 1]] = 1 - i^2 = 2
        let mut a = vec![one, i, i, one];
        let mut ipiv = vec![0; 2];
        let d = determinant(2, &mut a, &mut ipiv).unwrap().unwrap();
        close(d.re, 2.0, 1e-14);
        close(d.im, 0.0, 1e-14);
        // det [[2i, 0], [0, 3]] = 6i
        let mut a = vec![i * 2.0, Complex::zero(), Complex::zero(), one * 3.0];
        let d = determinant(2, &mut a, &mut ipiv).unwrap().unwrap();
        close(d.re, 0.0, 1e-14);
        close(d.im, 6.0, 1e-14);
    }

    #[test]
    fn test_determinant_empty() {
        let mut a: Vec<f64> = Vec::new();
        let mut ipiv: Vec<i32> = Vec::new();
        assert_eq!(determinant(0, &mut a, &mut ipiv).unwrap(), Some(1.0));
    }
}
