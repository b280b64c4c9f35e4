// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView2, Axis, concatenate};

use crate::error::{Result, ensure_dim};

/// A stochastic encoder with a diagonal Gaussian posterior p(u|x).
///
/// `encode` maps a batch of B examples (rows) to a (B, 2d) array: the first d
/// columns are the posterior means, the last d the log-variances. Nothing
/// else is assumed about the model. Single-precision outputs are promoted to
/// `f64` by the estimator.
pub trait Encoder {
    type Elem: Copy + Into<f64>;

    fn encode(&self, batch: ArrayView2<'_, f64>) -> Array2<Self::Elem>;

    /// Number of input features the encoder accepts, when it is fixed.
    /// The estimator checks batches against it before calling `encode`.
    fn input_dim(&self) -> Option<usize> {
        None
    }
}

/// Adapter turning a closure into an [`Encoder`].
pub struct FnEncoder<F> {
    f: F,
}

/// Wrap `f` as an [`Encoder`].
pub fn from_fn<F, E>(f: F) -> FnEncoder<F>
where
    F: Fn(ArrayView2<'_, f64>) -> Array2<E>,
    E: Copy + Into<f64>,
{
    FnEncoder { f }
}

impl<F, E> Encoder for FnEncoder<F>
where
    F: Fn(ArrayView2<'_, f64>) -> Array2<E>,
    E: Copy + Into<f64>,
{
    type Elem = E;

    fn encode(&self, batch: ArrayView2<'_, f64>) -> Array2<E> {
        (self.f)(batch)
    }
}

/// Encoder that ignores its input and returns the same posterior for every
/// example. It transmits no information, so its mutual information is zero.
#[derive(Debug, Clone)]
pub struct FixedPosteriorEncoder {
    mu: Array1<f64>,
    logvar: Array1<f64>,
}

impl FixedPosteriorEncoder {
    /// # Errors
    ///
    /// `ShapeMismatch` unless `mu` and `logvar` have the same length d.
    pub fn new(mu: Array1<f64>, logvar: Array1<f64>) -> Result<Self> {
        ensure_dim("fixed posterior log-variance length", mu.len(), logvar.len())?;
        Ok(Self { mu, logvar })
    }

    /// Standard normal posterior N(0, I) in `dim` dimensions.
    pub fn standard_normal(dim: usize) -> Self {
        Self {
            mu: Array1::zeros(dim),
            logvar: Array1::zeros(dim),
        }
    }
}

impl Encoder for FixedPosteriorEncoder {
    type Elem = f64;

    fn encode(&self, batch: ArrayView2<'_, f64>) -> Array2<f64> {
        let row = concatenate![Axis(0), self.mu, self.logvar];
        Array2::from_shape_fn((batch.nrows(), row.len()), |(_, k)| row[k])
    }
}

/// Linear encoder with a homoscedastic posterior: mu = x W, logvar constant.
///
/// With inputs x ~ N(0, I) the mutual information has the closed form
/// 1/2 Σ_k ln(1 + s_k^2 / exp(logvar)) over the singular values s_k of W,
/// which makes it a reference channel for the bound estimator.
#[derive(Debug, Clone)]
pub struct LinearGaussianEncoder {
    weights: Array2<f64>,
    logvar: f64,
}

impl LinearGaussianEncoder {
    /// `weights` has shape (n_features, d).
    pub fn new(weights: Array2<f64>, logvar: f64) -> Self {
        Self { weights, logvar }
    }

    pub fn dim(&self) -> usize {
        self.weights.ncols()
    }
}

impl Encoder for LinearGaussianEncoder {
    type Elem = f64;

    fn encode(&self, batch: ArrayView2<'_, f64>) -> Array2<f64> {
        let mus = batch.dot(&self.weights);
        let logvars = Array2::from_elem(mus.raw_dim(), self.logvar);
        concatenate![Axis(1), mus, logvars]
    }

    fn input_dim(&self) -> Option<usize> {
        Some(self.weights.nrows())
    }
}
