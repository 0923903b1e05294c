use criterion::{black_box, criterion_group, Criterion};
use num::complex::Complex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use fermifab::tensor_op::tensor_op;

const ORBS: usize = 10;

pub fn tensor_op_real(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let a: Vec<f64> = (0..ORBS * ORBS).map(|_| rng.gen::<f64>()).collect();
    c.bench_function("Wedge power N=3 of 10x10 real", |b| {
        b.iter(|| tensor_op(ORBS, 3, black_box(&a)).unwrap())
    });
}

pub fn tensor_op_complex(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let a: Vec<Complex<f64>> = (0..ORBS * ORBS)
        .map(|_| Complex::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();
    c.bench_function("Wedge power N=3 of 10x10 complex", |b| {
        b.iter(|| tensor_op(ORBS, 3, black_box(&a)).unwrap())
    });
}

criterion_group!(benches, tensor_op_real, tensor_op_complex,);
