use assert::close;
use num::complex::Complex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use fermifab::config::Configuration;
use fermifab::rdm::{expected_kernel_nnz, generate_rdm_kernel, reduced_density_matrix};
use fermifab::repr_conditions::{calc_q, calc_t1, OneBody};
use fermifab::util::binomial;

const SEED: u64 = 42;

fn random_state<R: Rng>(rng: &mut R, dim: usize) -> Vec<Complex<f64>> {
    (0..dim)
        .map(|_| Complex::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5))
        .collect()
}

fn norm_sqr(psi: &[Complex<f64>]) -> f64 {
    psi.iter().map(|z| z.norm_sqr()).sum()
}

#[test]
fn kernel_entry_count_matches_closed_form() {
    let cases: Vec<(Vec<usize>, Vec<usize>, Vec<usize>, Vec<usize>)> = vec![
        (vec![5], vec![1], vec![2], vec![2]),
        (vec![5], vec![2], vec![3], vec![3]),
        (vec![6], vec![1], vec![2], vec![3]),
        (vec![4], vec![1], vec![2], vec![3]),
        (vec![3, 4], vec![1, 1], vec![1, 2], vec![1, 2]),
        (vec![3, 4], vec![0, 1], vec![2, 1], vec![2, 2]),
        (vec![2, 3, 3], vec![1, 0, 1], vec![1, 1, 2], vec![1, 1, 2]),
    ];
    for (orbs, p1, n1, n2) in cases {
        let k = generate_rdm_kernel(&orbs, &p1, &n1, &n2).unwrap();
        let expected = expected_kernel_nnz(&orbs, &p1, &n1, &n2).unwrap();
        assert_eq!(k.nnz(), expected);
        for (_, v) in k.iter() {
            assert!(v == 1.0 || v == -1.0);
        }
    }
}

#[test]
fn kernel_dims_follow_sectors() {
    let k = generate_rdm_kernel(&[4], &[1], &[2], &[3]).unwrap();
    // p2 = 0, the kernel is the annihilation from 3 to 2 particles.
    assert_eq!(k.dims(), &[4, 1, 6, 4]);
    assert_eq!(k.nnz(), 4 * 3);
}

#[test]
fn one_body_trace_is_particle_number() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let orbs = [6];
    let n = [3];
    let dim = Configuration::new(&orbs, &n).unwrap().dimension().unwrap();
    let psi = random_state(&mut rng, dim);
    let g = reduced_density_matrix(&orbs, &n, &[1], &psi).unwrap();
    let trace: Complex<f64> = (0..6).map(|i| g[i * 6 + i]).sum();
    close(trace.re, 3.0 * norm_sqr(&psi), 1e-12);
    close(trace.im, 0.0, 1e-12);
}

#[test]
fn two_body_trace_counts_pairs() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let orbs = [3, 3];
    let n = [2, 1];
    let p = [1, 1];
    let dim = Configuration::new(&orbs, &n).unwrap().dimension().unwrap();
    let psi = random_state(&mut rng, dim);
    let g = reduced_density_matrix(&orbs, &n, &p, &psi).unwrap();
    let dim_p = 9;
    assert_eq!(g.len(), dim_p * dim_p);
    let trace: Complex<f64> = (0..dim_p).map(|i| g[i * dim_p + i]).sum();
    // Every state holds two pairs with one particle in each block.
    close(trace.re, 2.0 * norm_sqr(&psi), 1e-12);
}

#[test]
fn reduced_density_matrix_is_hermitian() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let orbs = [5];
    let n = [3];
    let p = [2];
    let dim = binomial(5, 3).unwrap();
    let dim_p = binomial(5, 2).unwrap();
    let psi = random_state(&mut rng, dim);
    let g = reduced_density_matrix(&orbs, &n, &p, &psi).unwrap();
    for i in 0..dim_p {
        for j in 0..dim_p {
            let a = g[i * dim_p + j];
            let b = g[j * dim_p + i].conj();
            close(a.re, b.re, 1e-12);
            close(a.im, b.im, 1e-12);
        }
    }
    let trace: f64 = (0..dim_p).map(|i| g[i * dim_p + i].re).sum();
    close(trace, 3.0 * norm_sqr(&psi), 1e-12);
}

#[test]
fn full_body_matrix_is_projector() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let orbs = [5];
    let n = [2];
    let dim = binomial(5, 2).unwrap();
    let psi = random_state(&mut rng, dim);
    let g = reduced_density_matrix(&orbs, &n, &n, &psi).unwrap();
    for i in 0..dim {
        for j in 0..dim {
            let expected = psi[i] * psi[j].conj();
            close(g[i * dim + j].re, expected.re, 1e-14);
            close(g[i * dim + j].im, expected.im, 1e-14);
        }
    }
}

#[test]
fn wrong_state_length_is_rejected() {
    let psi = vec![1.0; 5];
    assert!(reduced_density_matrix(&[4], &[2], &[1], &psi).is_err());
}

fn max_distance(a: &[Complex<f64>], b: &[Complex<f64>]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

#[test]
fn q_condition_from_particle_number_matches_one_body_rdm() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let dim = binomial(6, 4).unwrap();
    let psi = random_state(&mut rng, dim);
    let g1 = reduced_density_matrix(&[6], &[4], &[1], &psi).unwrap();
    let g2 = reduced_density_matrix(&[6], &[4], &[2], &psi).unwrap();
    let q = calc_q(6, &g2, OneBody::Rdm(&g1)).unwrap();
    let q_from_n = calc_q(6, &g2, OneBody::Particles(4)).unwrap();
    assert_eq!(q.len(), 15 * 15);
    assert!(max_distance(&q, &q_from_n) < 1e-12);
}

#[test]
fn t1_condition_from_particle_number_matches_one_body_rdm() {
    let mut rng = SmallRng::seed_from_u64(SEED);
    let dim = binomial(6, 4).unwrap();
    let mut psi = random_state(&mut rng, dim);
    let norm = norm_sqr(&psi).sqrt();
    psi.iter_mut().for_each(|z| *z /= norm);
    let g1 = reduced_density_matrix(&[6], &[4], &[1], &psi).unwrap();
    let g2 = reduced_density_matrix(&[6], &[4], &[2], &psi).unwrap();
    let t = calc_t1(6, &g2, OneBody::Rdm(&g1)).unwrap();
    let t_from_n = calc_t1(6, &g2, OneBody::Particles(4)).unwrap();
    assert_eq!(t.len(), 20 * 20);
    assert!(max_distance(&t, &t_from_n) < 1e-12);
}
