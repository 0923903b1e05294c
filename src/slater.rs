use crate::error::{FermiError, Result};
use crate::fermi::{annihilation_sign_mask, next_pattern, reverse_permutation_sign};
use crate::util::{binomial, try_with_capacity};
use crate::{BitOps, Bitfield};

/// One signed contribution $\pm\vert l\rangle\langle r\vert$ to a reduced
/// density matrix, both sides given as $p$-particle patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlaterTerm {
    pub sign: i32,
    pub left: Bitfield,
    pub right: Bitfield,
}

/// Terms of the $p$-body reduced density matrix of $\vert s_1\rangle\langle s_2\vert$.
/// # Method
/// Orbitals occupied in only one determinant must be annihilated, the rest of
/// the $p$ orbitals is chosen among the common ones. The sign of each choice
/// is read from the annihilation sign masks of both determinants.
/// Empty when `p1` exceeds the particle number of `s1` or the number of
/// orbitals that must be annihilated.
pub fn slater_rdm(s1: Bitfield, s2: Bitfield, p1: usize) -> Result<Vec<SlaterTerm>> {
    let n1 = s1.pop_count() as usize;
    let n2 = s2.pop_count() as usize;
    let fmask = s1 ^ s2;
    let sforce1 = fmask & s1;
    let sforce2 = fmask & s2;
    if p1 > n1 || p1 < sforce1.pop_count() as usize {
        return Ok(Vec::new());
    }
    let nchoice = p1 - sforce1.pop_count() as usize;

    let amask1 = annihilation_sign_mask(s1) << 1;
    let amask2 = annihilation_sign_mask(s2) << 1;
    let p2 = (n2 + p1)
        .checked_sub(n1)
        .ok_or(FermiError::NegativeSector { block: 0 })?;
    let factor = reverse_permutation_sign(p1)
        * reverse_permutation_sign(p2)
        * (amask1 & sforce1).parity_sign()
        * (amask2 & sforce2).parity_sign();

    let cmask = s1 & s2;
    let num = binomial(cmask.pop_count() as usize, nchoice)?;
    let mut terms: Vec<SlaterTerm> = try_with_capacity(num)?;
    let mut t = <Bitfield>::low_mask(nchoice);
    for _ in 0..num {
        let schoice = t.distribute(cmask);
        terms.push(SlaterTerm {
            sign: factor * (amask1 & schoice).parity_sign() * (amask2 & schoice).parity_sign(),
            left: sforce1 | schoice,
            right: sforce2 | schoice,
        });
        t = next_pattern(t);
    }
    Ok(terms)
}
