use log::trace;

use crate::error::{FermiError, Result};
use crate::util::{binomial, integer_product, integer_sum};
use crate::{BitOps, Bitfield, BITFIELD_BITS};

/// Independent group of orbitals with a fixed particle number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub orbitals: usize,
    pub particles: usize,
}

impl Block {
    pub fn new(orbitals: usize, particles: usize) -> Self {
        Block {
            orbitals,
            particles,
        }
    }
}

/// Partition of the flat orbital space into [Block]s.
/// # Layout
/// Blocks are packed consecutively in the bitfield, the first block occupying
/// the least significant bits. A configuration is validated once on
/// construction: it is non-empty, every block has at least one orbital and no
/// more particles than orbitals, and the total number of orbitals fits in a
/// [Bitfield].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    blocks: Vec<Block>,
}

impl Configuration {
    /// Builds a configuration from per-block orbital and particle counts.
    pub fn new(orbitals: &[usize], particles: &[usize]) -> Result<Self> {
        if orbitals.len() != particles.len() {
            return Err(FermiError::LengthMismatch {
                expected: orbitals.len(),
                found: particles.len(),
            });
        }
        let blocks = orbitals
            .iter()
            .zip(particles.iter())
            .map(|(&o, &n)| Block::new(o, n))
            .collect();
        Configuration::from_blocks(blocks)
    }

    /// Unpartitioned space of `orbitals` orbitals holding `particles`.
    pub fn single(orbitals: usize, particles: usize) -> Result<Self> {
        Configuration::from_blocks(vec![Block::new(orbitals, particles)])
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self> {
        if blocks.is_empty() {
            return Err(FermiError::InvalidConfiguration {
                details: "configuration has no block".to_owned(),
            });
        }
        for (i, b) in blocks.iter().enumerate() {
            if b.orbitals == 0 {
                return Err(FermiError::InvalidConfiguration {
                    details: format!("block {} has no orbital", i),
                });
            }
            if b.particles > b.orbitals {
                return Err(FermiError::InvalidConfiguration {
                    details: format!(
                        "block {} holds {} particles in {} orbitals",
                        i, b.particles, b.orbitals
                    ),
                });
            }
        }
        let total: usize = blocks.iter().map(|b| b.orbitals).sum();
        if total > BITFIELD_BITS {
            return Err(FermiError::BitfieldOverflow { orbitals: total });
        }
        Ok(Configuration { blocks })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn n_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn orbitals(&self) -> Vec<usize> {
        self.blocks.iter().map(|b| b.orbitals).collect()
    }

    pub fn particles(&self) -> Vec<usize> {
        self.blocks.iter().map(|b| b.particles).collect()
    }

    pub fn total_orbitals(&self) -> usize {
        integer_sum(&self.orbitals())
    }

    pub fn total_particles(&self) -> usize {
        integer_sum(&self.particles())
    }

    /// Number of basis states, $\prod_i\binom{o_i}{N_i}$.
    pub fn dimension(&self) -> Result<usize> {
        let factors = self
            .blocks
            .iter()
            .map(|b| binomial(b.orbitals, b.particles))
            .collect::<Result<Vec<usize>>>()?;
        integer_product(&factors)
    }

    /// Same orbital partition with other particle numbers.
    pub fn with_particles(&self, particles: &[usize]) -> Result<Self> {
        Configuration::new(&self.orbitals(), particles)
    }

    /// Position of the first orbital of every block.
    pub fn block_offsets(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .scan(0, |acc, b| {
                let off = *acc;
                *acc += b.orbitals;
                Some(off)
            })
            .collect()
    }

    /// Smallest pattern of the configuration: every block has its particles
    /// packed in its lowest orbitals.
    pub fn initial_pattern(&self) -> Bitfield {
        self.blocks
            .iter()
            .zip(self.block_offsets())
            .fold(0, |f, (b, off)| f | (<Bitfield>::low_mask(b.particles) << off))
    }

    /// Mask selecting the orbitals of block `i`.
    pub fn block_mask(&self, i: usize) -> Bitfield {
        let off: usize = self.blocks[..i].iter().map(|b| b.orbitals).sum();
        <Bitfield>::low_mask(self.blocks[i].orbitals) << off
    }

    /// Merges neighbouring blocks. `merge_next[i]` joins block `i + 1` into
    /// the block holding block `i`.
    /// # Example
    /// Orbitals `[3, 4, 6]`, particles `[1, 2, 4]` merged with
    /// `[true, false]` gives orbitals `[7, 6]` and particles `[3, 4]`.
    pub fn merge(&self, merge_next: &[bool]) -> Result<Self> {
        if merge_next.len() + 1 != self.blocks.len() {
            return Err(FermiError::LengthMismatch {
                expected: self.blocks.len() - 1,
                found: merge_next.len(),
            });
        }
        let mut blocks = vec![self.blocks[0]];
        for (b, &m) in self.blocks[1..].iter().zip(merge_next.iter()) {
            if m {
                // blocks is never empty here.
                if let Some(last) = blocks.last_mut() {
                    last.orbitals += b.orbitals;
                    last.particles += b.particles;
                }
            } else {
                blocks.push(*b);
            }
        }
        trace!("Merged {:?} into {:?}", self.blocks, blocks);
        Configuration::from_blocks(blocks)
    }
}

/// Advances the distribution to the next one, moving a particle out of the
/// first occupied slot. Returns `false` once every particle sits in the last
/// slot.
fn next_distribution(conf: &mut [usize]) -> bool {
    let mut base = 0;
    loop {
        let nc = conf.len() - base;
        if nc <= 1 {
            return false;
        }
        if conf[base] > 0 {
            conf[base] -= 1;
            conf[base + 1] += 1;
            return true;
        }
        let mut i = 1;
        while conf[base + i] == 0 {
            i += 1;
            if i >= nc {
                return false;
            }
        }
        conf[base] = conf[base + i] - 1;
        conf[base + i] = 1;
        base += i;
    }
}

/// Enumerates all the ways to place `n` indistinguishable particles in
/// `slots` slots, optionally with at most `max[i]` particles in slot `i`.
/// # Ordering
/// The first distribution has every particle in slot 0 (or as many as allowed
/// from the first slot onward). Without maxima the count is
/// $\binom{s+n-1}{n}$.
pub fn particle_distributions(
    slots: usize,
    n: usize,
    max: Option<&[usize]>,
) -> Result<Vec<Vec<usize>>> {
    if slots == 0 {
        return Err(FermiError::InvalidConfiguration {
            details: "number of slots must at least be 1".to_owned(),
        });
    }
    let mut conf = vec![0; slots];
    match max {
        None => {
            conf[0] = n;
            let mut out = vec![conf.clone()];
            while next_distribution(&mut conf) {
                out.try_reserve(1)?;
                out.push(conf.clone());
            }
            Ok(out)
        }
        Some(m) => {
            if m.len() != slots {
                return Err(FermiError::LengthMismatch {
                    expected: slots,
                    found: m.len(),
                });
            }
            let mut left = n;
            for i in 0..slots {
                conf[i] = left.min(m[i]);
                left -= conf[i];
            }
            if left > 0 {
                return Ok(Vec::new());
            }
            let mut out = vec![conf.clone()];
            while next_distribution(&mut conf) {
                if conf.iter().zip(m.iter()).all(|(c, mx)| c <= mx) {
                    out.try_reserve(1)?;
                    out.push(conf.clone());
                }
            }
            Ok(out)
        }
    }
}
