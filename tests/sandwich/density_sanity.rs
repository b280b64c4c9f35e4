use approx::assert_abs_diff_eq;
use ndarray::{Array2, array};
use std::f64::consts::PI;

use compressinfo::InfoError;
use compressinfo::estimators::approaches::expfam::gaussian::GaussianBatch;
use compressinfo::estimators::approaches::sandwich::density::{
    conditional_density_matrix, infonce_lower_bound, infonce_lower_bound_from_log, leave_one_out_upper_bound,
    leave_one_out_upper_bound_from_log, log_conditional_density_matrix, sample_posterior, sandwich_bounds_from_posterior,
};

use crate::test_helpers::{SeedableRng, StdRng};

#[test]
fn density_matrix_matches_normal_pdf_1d() {
    // Posteriors N(0, 1) and N(1, 4); sample u = 0.5 evaluated under both
    let posterior = GaussianBatch::new(array![[0.0], [1.0]], array![[0.0], [4f64.ln()]]).unwrap();
    let samples = array![[0.5], [2.0]];
    let p = conditional_density_matrix(samples.view(), &posterior).unwrap();
    assert_eq!(p.dim(), (2, 2));

    let pdf = |u: f64, mu: f64, sigma: f64| {
        (-0.5 * ((u - mu) / sigma).powi(2)).exp() / (sigma * (2.0 * PI).sqrt())
    };
    assert_abs_diff_eq!(p[(0, 0)], pdf(0.5, 0.0, 1.0), epsilon = 1e-14);
    assert_abs_diff_eq!(p[(0, 1)], pdf(0.5, 1.0, 2.0), epsilon = 1e-14);
    assert_abs_diff_eq!(p[(1, 0)], pdf(2.0, 0.0, 1.0), epsilon = 1e-14);
    assert_abs_diff_eq!(p[(1, 1)], pdf(2.0, 1.0, 2.0), epsilon = 1e-14);
}

#[test]
fn log_density_factorises_over_dimensions() {
    let posterior = GaussianBatch::new(array![[0.0, 1.0]], array![[0.5, -0.5]]).unwrap();
    let samples = array![[0.3, 0.2]];
    let log_p = log_conditional_density_matrix(samples.view(), &posterior).unwrap();

    let log_pdf = |u: f64, mu: f64, lv: f64| {
        -0.5 * (u - mu).powi(2) / lv.exp() - 0.5 * lv - 0.5 * (2.0 * PI).ln()
    };
    let expected = log_pdf(0.3, 0.0, 0.5) + log_pdf(0.2, 1.0, -0.5);
    assert_abs_diff_eq!(log_p[(0, 0)], expected, epsilon = 1e-12);
}

#[test]
fn sample_dimension_must_match_posterior() {
    let posterior = GaussianBatch::new(array![[0.0, 1.0]], array![[0.0, 0.0]]).unwrap();
    let samples = array![[0.3]];
    assert!(matches!(
        conditional_density_matrix(samples.view(), &posterior),
        Err(InfoError::ShapeMismatch { .. })
    ));
}

#[test]
fn bounds_from_hand_density_matrix() {
    let p = array![[2.0, 1.0], [1.0, 2.0]];
    // lower: ln(2 / 1.5); upper: ln(2 / (1 / 2))
    assert_abs_diff_eq!(infonce_lower_bound(p.view()).unwrap(), (4.0f64 / 3.0).ln(), epsilon = 1e-12);
    assert_abs_diff_eq!(leave_one_out_upper_bound(p.view()).unwrap(), 4f64.ln(), epsilon = 1e-12);
}

#[test]
fn log_bounds_survive_underflowing_densities() {
    // ln of [[2, 1], [1, 2]] shifted far below the smallest positive f64
    let log_p = array![[2f64.ln(), 0.0], [0.0, 2f64.ln()]].mapv(|lp| lp - 2000.0);
    assert!(log_p.mapv(f64::exp).iter().all(|&p| p == 0.0));
    assert_abs_diff_eq!(
        infonce_lower_bound_from_log(log_p.view()).unwrap(),
        (4.0f64 / 3.0).ln(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        leave_one_out_upper_bound_from_log(log_p.view()).unwrap(),
        4f64.ln(),
        epsilon = 1e-12
    );
}

#[test]
fn log_and_linear_bounds_agree() {
    let p = array![[0.3, 0.1, 0.05], [0.2, 0.6, 0.1], [0.01, 0.02, 0.4]];
    let log_p = p.mapv(f64::ln);
    assert_abs_diff_eq!(
        infonce_lower_bound(p.view()).unwrap(),
        infonce_lower_bound_from_log(log_p.view()).unwrap(),
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        leave_one_out_upper_bound(p.view()).unwrap(),
        leave_one_out_upper_bound_from_log(log_p.view()).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn perfectly_separated_batch_saturates_lower_bound() {
    let b = 8;
    let p = Array2::from_shape_fn((b, b), |(i, j)| if i == j { 1.0 } else { 0.0 });
    assert_abs_diff_eq!(infonce_lower_bound(p.view()).unwrap(), (b as f64).ln(), epsilon = 1e-12);
    // empty leave-one-out denominator
    assert_eq!(leave_one_out_upper_bound(p.view()).unwrap(), f64::INFINITY);
}

#[test]
fn leave_one_out_keeps_precision_when_diagonal_dominates() {
    let p = array![[1.0, 1e-20], [1e-20, 1.0]];
    // ln(1 / (1e-20 / 2))
    let expected = (2e20f64).ln();
    assert_abs_diff_eq!(leave_one_out_upper_bound(p.view()).unwrap(), expected, epsilon = 1e-9);
}

#[test]
fn non_square_density_is_rejected() {
    let p = Array2::<f64>::ones((2, 3));
    assert!(matches!(infonce_lower_bound(p.view()), Err(InfoError::ShapeMismatch { .. })));
}

#[test]
fn posterior_samples_follow_mean_and_variance() {
    let n = 20_000;
    let posterior = GaussianBatch::new(
        Array2::from_elem((n, 1), 1.0),
        Array2::from_elem((n, 1), 4f64.ln()),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let u = sample_posterior(&posterior, &mut rng);
    let col = u.column(0);
    let mean = col.mean().unwrap();
    let var = col.var(1.0);
    assert!((mean - 1.0).abs() < 0.1, "mean {mean}");
    assert!((var - 4.0).abs() < 0.2, "var {var}");
}

#[test]
fn near_zero_variance_samples_sit_on_the_mean() {
    let posterior = GaussianBatch::new(array![[3.0, -2.0]], array![[-40.0, -40.0]]).unwrap();
    let mut rng = StdRng::seed_from_u64(6);
    let u = sample_posterior(&posterior, &mut rng);
    assert_abs_diff_eq!(u[(0, 0)], 3.0, epsilon = 1e-6);
    assert_abs_diff_eq!(u[(0, 1)], -2.0, epsilon = 1e-6);
}

#[test]
fn lower_never_exceeds_upper_within_a_batch() {
    let posterior = GaussianBatch::new(
        array![[0.0, 0.0], [0.5, -0.5], [2.0, 1.0], [-1.0, 0.3]],
        array![[0.0, 0.1], [-0.3, 0.2], [0.0, 0.0], [0.4, -0.2]],
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let (lower, upper) = sandwich_bounds_from_posterior(&posterior, &mut rng).unwrap();
        assert!(lower <= upper, "{lower} > {upper}");
        assert!(lower <= 4f64.ln() + 1e-12);
    }
}
