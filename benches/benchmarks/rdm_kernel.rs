use criterion::{black_box, criterion_group, Criterion};
use fermifab::rdm::generate_rdm_kernel;

pub fn one_body_kernel(c: &mut Criterion) {
    c.bench_function("1-RDM kernel 5 particles in 12 orbitals", |b| {
        b.iter(|| generate_rdm_kernel(black_box(&[12]), &[1], &[5], &[5]).unwrap())
    });
}

pub fn two_body_kernel(c: &mut Criterion) {
    c.bench_function("2-RDM kernel 2 blocks of 6 orbitals", |b| {
        b.iter(|| generate_rdm_kernel(black_box(&[6, 6]), &[1, 1], &[3, 2], &[3, 2]).unwrap())
    });
}

criterion_group!(benches, one_body_kernel, two_body_kernel,);
