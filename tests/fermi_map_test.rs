use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use fermifab::boson::{self, BosonMap};
use fermifab::config::Configuration;
use fermifab::fermi::{annihilation_sign, decode, encode, FermiMap};
use fermifab::util::binomial;
use fermifab::BitOps;

fn configurations() -> Vec<Configuration> {
    vec![
        Configuration::single(4, 2).unwrap(),
        Configuration::single(7, 3).unwrap(),
        Configuration::single(5, 0).unwrap(),
        Configuration::single(5, 5).unwrap(),
        Configuration::new(&[3, 4], &[1, 2]).unwrap(),
        Configuration::new(&[2, 3, 4], &[0, 2, 1]).unwrap(),
        Configuration::new(&[4, 1, 3], &[2, 1, 3]).unwrap(),
    ]
}

#[test]
fn scenario_a_four_orbitals_two_particles() {
    let map = FermiMap::single(4, 2).unwrap();
    assert_eq!(
        map.as_slice(),
        &[0b0011, 0b0101, 0b0110, 0b1001, 0b1010, 0b1100]
    );
}

#[test]
fn scenario_b_encode_decode() {
    assert_eq!(decode(0b0110, 2).unwrap(), vec![1, 2]);
    assert_eq!(encode(&[1, 2]), 0b0110);
}

#[test]
fn scenario_c_annihilation_sign() {
    assert_eq!(annihilation_sign(0b111u64, 0b010), -1);
}

#[test]
fn scenario_d_boson_map() {
    let map = BosonMap::build(2, 3).unwrap();
    assert_eq!(map.len(), binomial(2 + 3 - 1, 3).unwrap());
    let multisets: Vec<Vec<usize>> = (0..map.len()).map(|i| map.coords(i).unwrap()).collect();
    assert_eq!(
        multisets,
        vec![vec![0, 0, 0], vec![0, 0, 1], vec![0, 1, 1], vec![1, 1, 1]]
    );
    for (i, x) in multisets.iter().enumerate() {
        assert_eq!(map.coords_to_index(x), Some(i));
        assert_eq!(boson::encode(x), map.as_slice()[i]);
    }
}

#[test]
fn map_is_strictly_increasing() {
    for c in configurations() {
        let map = FermiMap::build(&c).unwrap();
        for w in map.as_slice().windows(2) {
            assert!(w[0] < w[1]);
        }
    }
}

#[test]
fn map_cardinality_is_product_of_binomials() {
    for c in configurations() {
        let map = FermiMap::build(&c).unwrap();
        let expected: usize = c
            .blocks()
            .iter()
            .map(|b| binomial(b.orbitals, b.particles).unwrap())
            .product();
        assert_eq!(map.len(), expected);
    }
}

#[test]
fn map_respects_block_particle_numbers() {
    for c in configurations() {
        let map = FermiMap::build(&c).unwrap();
        for &w in map.iter() {
            for (i, b) in c.blocks().iter().enumerate() {
                assert_eq!((w & c.block_mask(i)).pop_count() as usize, b.particles);
            }
        }
    }
}

#[test]
fn round_trip_and_index_consistency() {
    for c in configurations() {
        let map = FermiMap::build(&c).unwrap();
        let n = c.total_particles();
        for (i, &w) in map.iter().enumerate() {
            let x = decode(w, n).unwrap();
            assert_eq!(encode(&x), w);
            assert_eq!(map.coords_to_index(&x), Some(i));
            assert_eq!(map.coords_to_index_with_sign(&x), Some((i, 1)));
        }
    }
}

#[test]
fn swapping_two_coordinates_flips_the_sign() {
    let mut rng = SmallRng::seed_from_u64(42);
    let map = FermiMap::single(9, 4).unwrap();
    for _ in 0..200 {
        let i = rng.gen_range(0..map.len());
        let mut x = map.coords(i).unwrap();
        x.shuffle(&mut rng);
        let (idx, sign) = map.coords_to_index_with_sign(&x).unwrap();
        assert_eq!(idx, i);
        let a = rng.gen_range(0..4);
        let b = (a + rng.gen_range(1..4)) % 4;
        x.swap(a, b);
        let (idx2, sign2) = map.coords_to_index_with_sign(&x).unwrap();
        assert_eq!(idx2, i);
        assert_eq!(sign2, -sign);
    }
}

#[test]
fn collisions_and_misses_are_not_found() {
    let map = FermiMap::single(5, 3).unwrap();
    assert_eq!(map.coords_to_index(&[1, 1, 2]), None);
    assert_eq!(map.coords_to_index_with_sign(&[0, 4, 0]), None);
    // Right total, wrong block distribution.
    let c = Configuration::new(&[2, 3], &[1, 1]).unwrap();
    let map = FermiMap::build(&c).unwrap();
    assert_eq!(map.coords_to_index(&[0, 1]), None);
    assert_eq!(map.coords_to_index(&[3, 4]), None);
    assert!(map.coords_to_index(&[1, 4]).is_some());
}

#[test]
fn annihilation_of_non_subset_is_zero() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..1000 {
        let n = rng.gen::<u64>() & 0xffff;
        let a = rng.gen::<u64>() & 0xffff;
        let s = annihilation_sign(n, a);
        if a & n != a {
            assert_eq!(s, 0);
        } else {
            assert!(s == 1 || s == -1);
        }
    }
}
