use num::integer::binomial as num_binomial;

use crate::error::{FermiError, Result};

/// Sum of a slice of counts.
pub fn integer_sum(x: &[usize]) -> usize {
    x.iter().sum()
}

/// Product of a slice of counts, `DimensionOverflow` if it does not fit.
pub fn integer_product(x: &[usize]) -> Result<usize> {
    x.iter()
        .try_fold(1usize, |acc, &v| acc.checked_mul(v))
        .ok_or(FermiError::DimensionOverflow)
}

/// Binomial coefficient $\binom{n}{k}$, zero when $k > n$.
pub fn binomial(n: usize, k: usize) -> Result<usize> {
    if k > n {
        return Ok(0);
    }
    // u128 intermediate keeps every coefficient of a 64 bit space exact.
    let c: u128 = num_binomial(n as u128, k as u128);
    usize::try_from(c).map_err(|_| FermiError::DimensionOverflow)
}

/// Allocates an empty vector with room for `n` elements, reporting failure
/// instead of aborting.
pub fn try_with_capacity<T>(n: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)?;
    Ok(v)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 2).unwrap(), 6);
        assert_eq!(binomial(5, 0).unwrap(), 1);
        assert_eq!(binomial(3, 4).unwrap(), 0);
        assert_eq!(binomial(64, 32).unwrap(), 1832624140942590534);
    }

    #[test]
    fn test_integer_product_overflow() {
        assert_eq!(integer_product(&[2, 3, 4]).unwrap(), 24);
        assert_eq!(integer_product(&[]).unwrap(), 1);
        assert!(matches!(
            integer_product(&[usize::MAX, 2]),
            Err(FermiError::DimensionOverflow)
        ));
    }

    #[test]
    fn test_integer_sum() {
        assert_eq!(integer_sum(&[1, 2, 3]), 6);
        assert_eq!(integer_sum(&[]), 0);
    }
}
