use approx::assert_abs_diff_eq;
use ndarray::array;

use compressinfo::InfoError;
use compressinfo::estimators::utils::distance::{pairwise_l1, pairwise_l2sq, pairwise_linf};
use compressinfo::estimators::utils::similarity::{
    L2_SQRT_EPS, SimilarityKind, normalize_rows, scaled_similarity, similarity,
};

use crate::test_helpers::{assert_matrix_close, generate_gaussian_data};

#[test]
fn distance_kinds_are_negated_and_temperature_scaled() {
    let a = generate_gaussian_data(6, 3, 0.0, 1.0, 21);
    let b = generate_gaussian_data(4, 3, 0.5, 2.0, 22);
    let t = 0.25;

    let l2sq = pairwise_l2sq(a.view(), b.view()).unwrap();
    let expected_l2sq = l2sq.mapv(|d| -d / t);
    let expected_l2 = l2sq.mapv(|d| -(d + L2_SQRT_EPS).sqrt() / t);
    let expected_l1 = pairwise_l1(a.view(), b.view()).unwrap().mapv(|d| -d / t);
    let expected_linf = pairwise_linf(a.view(), b.view()).unwrap().mapv(|d| -d / t);

    assert_matrix_close(&similarity(a.view(), b.view(), "l2sq", t).unwrap(), &expected_l2sq, 1e-12);
    assert_matrix_close(&similarity(a.view(), b.view(), "l2", t).unwrap(), &expected_l2, 1e-12);
    assert_matrix_close(&similarity(a.view(), b.view(), "l1", t).unwrap(), &expected_l1, 1e-12);
    assert_matrix_close(&similarity(a.view(), b.view(), "linf", t).unwrap(), &expected_linf, 1e-12);

    for kind in ["l2sq", "l2", "l1", "linf"] {
        let s = similarity(a.view(), b.view(), kind, t).unwrap();
        assert!(s.iter().all(|&v| v <= 0.0), "{kind} similarity must be non-positive");
    }
}

#[test]
fn l2_similarity_is_finite_at_zero_distance() {
    let a = array![[1.0, 2.0]];
    let s = similarity(a.view(), a.view(), "l2", 1.0).unwrap();
    assert_abs_diff_eq!(s[(0, 0)], -L2_SQRT_EPS.sqrt(), epsilon = 1e-15);
}

#[test]
fn cosine_identical_and_orthogonal_vectors() {
    let a = array![[3.0, 4.0], [1.0, 0.0]];
    let b = array![[6.0, 8.0], [0.0, 2.0]];
    let s = similarity(a.view(), b.view(), "cosine", 1.0).unwrap();
    assert_abs_diff_eq!(s[(0, 0)], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(s[(1, 1)], 0.0, epsilon = 1e-12);
    // (1,0).(0.6,0.8) = 0.6
    assert_abs_diff_eq!(s[(1, 0)], 0.6, epsilon = 1e-12);

    let scaled = similarity(a.view(), b.view(), "cosine", 0.5).unwrap();
    assert_abs_diff_eq!(scaled[(0, 0)], 2.0, epsilon = 1e-12);
}

#[test]
fn cosine_is_bounded() {
    let a = generate_gaussian_data(10, 5, 0.0, 3.0, 31);
    let b = generate_gaussian_data(8, 5, -1.0, 1.0, 32);
    let s = scaled_similarity(a.view(), b.view(), SimilarityKind::Cosine, 1.0).unwrap();
    assert!(s.iter().all(|&v| (-1.0 - 1e-12..=1.0 + 1e-12).contains(&v)));
}

#[test]
fn cosine_with_zero_vector_gives_zero_not_nan() {
    let a = array![[0.0, 0.0], [1.0, 1.0]];
    let b = array![[2.0, -1.0]];
    let s = similarity(a.view(), b.view(), "cosine", 1.0).unwrap();
    assert_eq!(s[(0, 0)], 0.0);
    assert!(s[(1, 0)].is_finite());

    let normed = normalize_rows(a.view());
    assert_eq!(normed.row(0).to_vec(), vec![0.0, 0.0]);
    assert_abs_diff_eq!(normed.row(1).dot(&normed.row(1)), 1.0, epsilon = 1e-12);
}

#[test]
fn unsupported_kind_names_the_value() {
    let a = array![[1.0]];
    let err = similarity(a.view(), a.view(), "hamming", 1.0).unwrap_err();
    assert_eq!(err, InfoError::UnsupportedKind("hamming".to_string()));
    assert!(err.to_string().contains("hamming"));
}

#[test]
fn non_positive_temperature_is_rejected() {
    let a = array![[1.0, 0.0]];
    for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let res = similarity(a.view(), a.view(), "l2sq", t);
        assert!(matches!(res, Err(InfoError::InvalidArgument(_))), "temperature {t}");
    }
}

#[test]
fn mismatched_dimensions_are_rejected_for_every_kind() {
    let a = array![[1.0, 0.0]];
    let b = array![[1.0, 0.0, 0.0]];
    for kind in SimilarityKind::ALL {
        let res = scaled_similarity(a.view(), b.view(), kind, 1.0);
        assert!(matches!(res, Err(InfoError::ShapeMismatch { .. })), "{kind}");
    }
}

#[test]
fn kind_names_round_trip() {
    for kind in SimilarityKind::ALL {
        let parsed: SimilarityKind = kind.to_string().parse().unwrap();
        assert_eq!(parsed, kind);
    }
}
