use criterion::{black_box, criterion_group, Criterion};
use fermifab::config::Configuration;
use fermifab::fermi::{next_pattern, FermiMap};

pub fn fermi_map_single(c: &mut Criterion) {
    let config = Configuration::single(20, 10).unwrap();
    c.bench_function("Fermi map 10 particles in 20 orbitals", |b| {
        b.iter(|| FermiMap::build(black_box(&config)).unwrap())
    });
}

pub fn fermi_map_blocks(c: &mut Criterion) {
    let config = Configuration::new(&[8, 8, 8], &[4, 3, 4]).unwrap();
    c.bench_function("Fermi map 3 blocks of 8 orbitals", |b| {
        b.iter(|| FermiMap::build(black_box(&config)).unwrap())
    });
}

pub fn coords_lookup(c: &mut Criterion) {
    let map = FermiMap::single(16, 6).unwrap();
    let x: Vec<usize> = vec![13, 2, 7, 0, 11, 5];
    c.bench_function("Signed lookup 6 particles in 16 orbitals", |b| {
        b.iter(|| map.coords_to_index_with_sign(black_box(&x)))
    });
}

pub fn gosper_step(c: &mut Criterion) {
    c.bench_function("Next pattern 10000 steps", |b| {
        b.iter(|| {
            let mut w: u64 = 0b1111_1111;
            for _ in 0..10000 {
                w = next_pattern(black_box(w));
            }
            w
        })
    });
}

criterion_group!(benches, fermi_map_single, fermi_map_blocks, coords_lookup, gosper_step,);
