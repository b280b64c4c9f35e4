// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Monte Carlo pieces of the sandwich bounds for a single batch.
//!
//! For a batch of B posteriors p(u|x_j) = N(mu_j, diag(exp(logvar_j))) one
//! point u_i is drawn from each posterior, and the (B, B) matrix of
//! conditional densities p(u_i|x_j) is evaluated. Then
//!
//! lower = mean_i ln[ p(u_i|x_i) / (1/B Σ_j p(u_i|x_j)) ]          (InfoNCE)
//! upper = mean_i ln[ p(u_i|x_i) / (1/B Σ_{j != i} p(u_i|x_j)) ]   (leave one out)
//!
//! following Poole et al. (2019), "On Variational Bounds of Mutual Information".
//! Everything here runs in `f64`: the density ratios lose accuracy in single
//! precision and bias the bounds. The estimator reduces the log-density matrix
//! directly; for d in the hundreds the densities themselves underflow.

use std::f64::consts::PI;

use ndarray::{Array2, ArrayView2, Axis, Zip};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{Result, ensure_dim};
use crate::estimators::approaches::expfam::gaussian::GaussianBatch;

/// Draw one point per posterior: u_i = mu_i + exp(logvar_i / 2) * z, z ~ N(0, I).
pub fn sample_posterior<R: Rng + ?Sized>(posterior: &GaussianBatch, rng: &mut R) -> Array2<f64> {
    let mut samples = posterior.stddevs();
    Zip::from(&mut samples).and(posterior.mus()).for_each(|u, &mu| {
        let z: f64 = StandardNormal.sample(rng);
        *u = mu + *u * z;
    });
    samples
}

/// ln p(u_i | x_j) for every sample i (rows) and posterior j (columns).
///
/// ln p = -1/2 Σ_k ((u_ik - mu_jk) / sigma_jk)^2 - 1/2 Σ_k logvar_jk - d/2 ln(2 pi)
pub fn log_conditional_density_matrix(
    samples: ArrayView2<'_, f64>,
    posterior: &GaussianBatch,
) -> Result<Array2<f64>> {
    ensure_dim("posterior sample dimension", posterior.dim(), samples.ncols())?;
    let mus = posterior.mus();
    let inv_std = posterior.logvars().mapv(|lv| (-0.5 * lv).exp());
    let half_log_det = posterior.log_det().mapv_into(|ld| 0.5 * ld);
    let log_norm = 0.5 * posterior.dim() as f64 * (2.0 * PI).ln();

    let mut log_p = Array2::zeros((samples.nrows(), posterior.len()));
    for (i, u) in samples.axis_iter(Axis(0)).enumerate() {
        for j in 0..posterior.len() {
            let sq = Zip::from(u)
                .and(mus.row(j))
                .and(inv_std.row(j))
                .fold(0.0, |acc, &u_k, &mu_k, &is_k| {
                    let z = (u_k - mu_k) * is_k;
                    acc + z * z
                });
            log_p[(i, j)] = -0.5 * sq - half_log_det[j] - log_norm;
        }
    }
    Ok(log_p)
}

/// p(u_i | x_j), the exponential of [`log_conditional_density_matrix`].
pub fn conditional_density_matrix(
    samples: ArrayView2<'_, f64>,
    posterior: &GaussianBatch,
) -> Result<Array2<f64>> {
    Ok(log_conditional_density_matrix(samples, posterior)?.mapv_into(f64::exp))
}

/// InfoNCE lower bound in nats from a square density matrix.
pub fn infonce_lower_bound(density: ArrayView2<'_, f64>) -> Result<f64> {
    log_ratio_bound(density.mapv(f64::ln).view(), false)
}

/// Leave-one-out upper bound in nats from a square density matrix.
///
/// The diagonal is dropped from the row sums but the mean still divides by B.
/// With B = 1 the denominator is empty and the bound is `+inf`.
pub fn leave_one_out_upper_bound(density: ArrayView2<'_, f64>) -> Result<f64> {
    log_ratio_bound(density.mapv(f64::ln).view(), true)
}

/// [`infonce_lower_bound`] from log-densities. Stays finite when every
/// density of a row underflows `f64`, as happens for wide codes.
pub fn infonce_lower_bound_from_log(log_density: ArrayView2<'_, f64>) -> Result<f64> {
    log_ratio_bound(log_density, false)
}

/// [`leave_one_out_upper_bound`] from log-densities.
pub fn leave_one_out_upper_bound_from_log(log_density: ArrayView2<'_, f64>) -> Result<f64> {
    log_ratio_bound(log_density, true)
}

/// mean_i [ lp_ii - ln(1/B Σ_j lp_ij) ], the row sums taken as a
/// log-sum-exp shifted by the row maximum.
fn log_ratio_bound(log_density: ArrayView2<'_, f64>, leave_one_out: bool) -> Result<f64> {
    let b = log_density.nrows();
    ensure_dim("density matrix columns", b, log_density.ncols())?;
    let ln_b = (b as f64).ln();
    let mut total = 0.0;
    for (i, row) in log_density.axis_iter(Axis(0)).enumerate() {
        let own = row[i];
        // Off-diagonal terms summed directly, never as row_sum - own.
        let terms = || {
            row.iter()
                .enumerate()
                .filter(move |&(j, _)| !(leave_one_out && j == i))
                .map(|(_, &lp)| lp)
        };
        let max = terms().fold(f64::NEG_INFINITY, f64::max);
        let log_sum = if max == f64::NEG_INFINITY {
            f64::NEG_INFINITY
        } else {
            max + terms().map(|lp| (lp - max).exp()).sum::<f64>().ln()
        };
        total += own - (log_sum - ln_b);
    }
    Ok(total / b as f64)
}

/// Lower and upper bound (nats) for one batch of posteriors, drawing one
/// sample per posterior from `rng`.
pub fn sandwich_bounds_from_posterior<R: Rng + ?Sized>(
    posterior: &GaussianBatch,
    rng: &mut R,
) -> Result<(f64, f64)> {
    let samples = sample_posterior(posterior, rng);
    let log_density = log_conditional_density_matrix(samples.view(), posterior)?;
    let lower = infonce_lower_bound_from_log(log_density.view())?;
    let upper = leave_one_out_upper_bound_from_log(log_density.view())?;
    Ok((lower, upper))
}
