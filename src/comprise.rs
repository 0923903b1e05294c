use log::debug;

use crate::config::{Block, Configuration};
use crate::error::{FermiError, Result};
use crate::fermi::FermiMap;
use crate::sparse::SparseArray;
use crate::util::try_with_capacity;

/// Common coarsening of two partitions of the same space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comprised {
    /// Merge table of the first configuration, see [Configuration::merge].
    pub merge_first: Vec<bool>,
    /// Merge table of the second configuration.
    pub merge_second: Vec<bool>,
    /// Configuration both merge into.
    pub merged: Configuration,
}

/// Finest configuration both `c1` and `c2` can be merged into.
/// # Rule
/// A block boundary survives when it is a boundary of both configurations
/// and the particle numbers below it agree.
pub fn comprise_configurations(c1: &Configuration, c2: &Configuration) -> Result<Comprised> {
    if c1.total_orbitals() != c2.total_orbitals() || c1.total_particles() != c2.total_particles() {
        return Err(FermiError::InvalidConfiguration {
            details: format!(
                "cannot comprise {} orbitals, {} particles with {} orbitals, {} particles",
                c1.total_orbitals(),
                c1.total_particles(),
                c2.total_orbitals(),
                c2.total_particles()
            ),
        });
    }
    let cumulate = |c: &Configuration| {
        c.blocks()
            .iter()
            .scan((0, 0), |acc, b| {
                acc.0 += b.orbitals;
                acc.1 += b.particles;
                Some(*acc)
            })
            .collect::<Vec<(usize, usize)>>()
    };
    let cum1 = cumulate(c1);
    let cum2 = cumulate(c2);
    let b1 = c1.blocks();

    let mut merge_first = vec![true; b1.len() - 1];
    let mut merge_second = vec![true; c2.n_blocks() - 1];
    let mut blocks = vec![b1[0]];
    let (mut j1, mut j2) = (0, 0);
    while j1 + 1 < cum1.len() {
        let next = b1[j1 + 1];
        if cum1[j1].0 < cum2[j2].0 {
            grow(&mut blocks, next);
            j1 += 1;
        } else if cum2[j2].0 < cum1[j1].0 {
            j2 += 1;
        } else {
            if cum1[j1].1 == cum2[j2].1 {
                merge_first[j1] = false;
                merge_second[j2] = false;
                blocks.push(next);
            } else {
                grow(&mut blocks, next);
            }
            j1 += 1;
            j2 += 1;
        }
    }
    let merged = Configuration::from_blocks(blocks)?;
    debug!(
        "Comprised {:?} and {:?} into {:?}",
        c1.orbitals(),
        c2.orbitals(),
        merged.orbitals()
    );
    Ok(Comprised {
        merge_first,
        merge_second,
        merged,
    })
}

fn grow(blocks: &mut [Block], next: Block) {
    if let Some(last) = blocks.last_mut() {
        last.orbitals += next.orbitals;
        last.particles += next.particles;
    }
}

/// Isometry from the basis of `config` into the basis of the configuration
/// merged with `merge_next`. Every state keeps its bitfield, so each column
/// holds a single one. Dims are `(|merged|, |config|)`.
pub fn comprise_map(config: &Configuration, merge_next: &[bool]) -> Result<SparseArray<f64>> {
    let merged = config.merge(merge_next)?;
    let map = FermiMap::build(config)?;
    let map_merged = FermiMap::build(&merged)?;

    let mut indices: Vec<usize> = try_with_capacity(2 * map.len())?;
    let mut values: Vec<f64> = try_with_capacity(map.len())?;
    for (j, &w) in map.iter().enumerate() {
        let i = map_merged.index_of(w).ok_or(FermiError::Integrity {
            expected: map.len(),
            found: j,
        })?;
        indices.extend_from_slice(&[i, j]);
        values.push(1.0);
    }
    SparseArray::from_entries(vec![map_merged.len(), map.len()], indices, values)
}
