// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Closed-form divergences between every pair drawn from two batches of
//! diagonal Gaussians.
//!
//! For batches of N and M Gaussians sharing the embedding dimension d, each
//! function returns an (N, M) matrix whose entry (i, j) compares Gaussian i of
//! the first batch with Gaussian j of the second. Either batch may hold a
//! single Gaussian.

use ndarray::{Array2, ArrayView1, ArrayView2, Zip};

use crate::error::Result;
use super::gaussian::GaussianBatch;

/// Bhattacharyya distances between two batches of diagonal Gaussians.
///
/// D_B = 1/8 dmu^T S^-1 dmu + 1/2 ln( det S / sqrt(det S1 det S2) ),
/// with S = (S1 + S2) / 2. The log-determinant term is accumulated per
/// dimension, which keeps the products of variances from overflowing.
/// Symmetric in its arguments.
pub fn bhattacharyya_distance(g1: &GaussianBatch, g2: &GaussianBatch) -> Result<Array2<f64>> {
    g1.ensure_same_dim(g2)?;
    let var1 = g1.variances();
    let var2 = g2.variances();
    let log_det1 = g1.log_det();
    let log_det2 = g2.log_det();

    Ok(pairwise_map(g1, g2, |i, j, mu1, mu2| {
        let mut mahalanobis = 0.0;
        let mut log_det_avg = 0.0;
        Zip::from(mu1)
            .and(mu2)
            .and(var1.row(i))
            .and(var2.row(j))
            .for_each(|&m1, &m2, &v1, &v2| {
                let sigma = 0.5 * (v1 + v2);
                let diff = m1 - m2;
                mahalanobis += diff * diff / sigma;
                log_det_avg += sigma.ln();
            });
        let term1 = 0.125 * mahalanobis;
        let term2 = 0.5 * (log_det_avg - 0.5 * (log_det1[i] + log_det2[j]));
        term1 + term2
    }))
}

/// Bhattacharyya coefficients `exp(-D_B)`, the overlap of each pair in (0, 1].
pub fn bhattacharyya_coefficient(g1: &GaussianBatch, g2: &GaussianBatch) -> Result<Array2<f64>> {
    Ok(bhattacharyya_distance(g1, g2)?.mapv_into(|d| (-d).exp()))
}

/// KL(N1 || N2) for every pair, N1 from `g1` and N2 from `g2`.
///
/// KL = 1/2 [ tr(S2^-1 S1) + dmu^T S2^-1 dmu + ln det S2 - ln det S1 - d ],
/// dmu = mu2 - mu1. Not symmetric: swapping the batches changes the result.
pub fn kl_divergence(g1: &GaussianBatch, g2: &GaussianBatch) -> Result<Array2<f64>> {
    g1.ensure_same_dim(g2)?;
    let var1 = g1.variances();
    let inv_var2 = g2.logvars().mapv(|lv| (-lv).exp());
    let log_det1 = g1.log_det();
    let log_det2 = g2.log_det();
    let d = g1.dim() as f64;

    Ok(pairwise_map(g1, g2, |i, j, mu1, mu2| {
        let mut trace = 0.0;
        let mut mahalanobis = 0.0;
        Zip::from(mu1)
            .and(mu2)
            .and(var1.row(i))
            .and(inv_var2.row(j))
            .for_each(|&m1, &m2, &v1, &iv2| {
                let diff = m2 - m1;
                trace += iv2 * v1;
                mahalanobis += diff * diff * iv2;
            });
        0.5 * (trace + mahalanobis + log_det2[j] - log_det1[i] - d)
    }))
}

/// KL(N1 || N2) + KL(N2 || N1) for every pair.
pub fn symmetric_kl_divergence(g1: &GaussianBatch, g2: &GaussianBatch) -> Result<Array2<f64>> {
    let forward = kl_divergence(g1, g2)?;
    let backward = kl_divergence(g2, g1)?;
    Ok(forward + &backward.t())
}

/// [`bhattacharyya_distance`] on raw (N, d) / (M, d) arrays.
pub fn bhattacharyya_dist_mat(
    mus1: ArrayView2<'_, f64>,
    logvars1: ArrayView2<'_, f64>,
    mus2: ArrayView2<'_, f64>,
    logvars2: ArrayView2<'_, f64>,
) -> Result<Array2<f64>> {
    let g1 = GaussianBatch::from_views(mus1, logvars1)?;
    let g2 = GaussianBatch::from_views(mus2, logvars2)?;
    bhattacharyya_distance(&g1, &g2)
}

/// [`kl_divergence`] on raw (N, d) / (M, d) arrays.
pub fn kl_divergence_mat(
    mus1: ArrayView2<'_, f64>,
    logvars1: ArrayView2<'_, f64>,
    mus2: ArrayView2<'_, f64>,
    logvars2: ArrayView2<'_, f64>,
) -> Result<Array2<f64>> {
    let g1 = GaussianBatch::from_views(mus1, logvars1)?;
    let g2 = GaussianBatch::from_views(mus2, logvars2)?;
    kl_divergence(&g1, &g2)
}

fn pairwise_map<F>(g1: &GaussianBatch, g2: &GaussianBatch, mut f: F) -> Array2<f64>
where
    F: FnMut(usize, usize, ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64,
{
    let mus1 = g1.mus();
    let mus2 = g2.mus();
    Array2::from_shape_fn((g1.len(), g2.len()), |(i, j)| f(i, j, mus1.row(i), mus2.row(j)))
}
