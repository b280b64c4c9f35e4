// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView2};
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{InfoError, Result, ensure_dim};
use crate::estimators::approaches::expfam::gaussian::GaussianBatch;
use crate::estimators::traits::MutualInformationBounds;
use super::density::sandwich_bounds_from_posterior;
use super::encoder::Encoder;
use super::stream::{DataStream, ShuffledRepeat};

/// The shuffle buffer holds this many batches' worth of examples.
pub const SHUFFLE_BUFFER_BATCHES: usize = 10;

/// Lower (InfoNCE) and upper (leave-one-out) bounds on I(X; U), averaged over
/// evaluation batches, together with the per-batch estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct SandwichBounds {
    pub lower: f64,
    pub upper: f64,
    pub batch_lower: Array1<f64>,
    pub batch_upper: Array1<f64>,
}

impl SandwichBounds {
    fn from_batches(batch_lower: Array1<f64>, batch_upper: Array1<f64>) -> Self {
        let lower = batch_lower.mean().unwrap_or(f64::NAN);
        let upper = batch_upper.mean().unwrap_or(f64::NAN);
        Self {
            lower,
            upper,
            batch_lower,
            batch_upper,
        }
    }

    /// Standard error of the lower bound across batches (NaN for fewer than two).
    pub fn lower_std_err(&self) -> f64 {
        std_err(&self.batch_lower)
    }

    /// Standard error of the upper bound across batches (NaN for fewer than two).
    pub fn upper_std_err(&self) -> f64 {
        std_err(&self.batch_upper)
    }

    /// Both bounds are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    pub fn num_batches(&self) -> usize {
        self.batch_lower.len()
    }
}

impl MutualInformationBounds for SandwichBounds {
    fn lower_bound(&self) -> f64 {
        self.lower
    }

    fn upper_bound(&self) -> f64 {
        self.upper
    }
}

fn std_err(values: &Array1<f64>) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    values.std(1.0) / (n as f64).sqrt()
}

/// Sandwich estimator of the mutual information between data X and the
/// stochastic code U of an encoder with diagonal Gaussian posterior.
///
/// Each evaluation batch draws `eval_batch_size` examples from the data
/// stream, encodes them, samples one code per example and reduces the
/// pairwise posterior densities to an InfoNCE lower bound and a leave-one-out
/// upper bound. The per-batch estimates are averaged.
///
/// Larger batches tighten the bounds (the InfoNCE bound saturates at
/// ln(eval_batch_size)); more batches reduce their variance.
/// `eval_batch_size * num_eval_batches` may exceed the dataset size: a
/// repeated example gets a fresh posterior sample, and the sample is the
/// random variable of interest.
///
/// Results are in nats unless a different base is set with [`with_base`](Self::with_base).
/// The estimator holds no random state; pass a seeded RNG for reproducible runs.
#[derive(Debug, Clone, PartialEq)]
pub struct MiSandwichEstimator {
    pub eval_batch_size: usize,
    pub num_eval_batches: usize,
    pub base: f64,
}

impl Default for MiSandwichEstimator {
    fn default() -> Self {
        Self {
            eval_batch_size: 1024,
            num_eval_batches: 8,
            base: std::f64::consts::E,
        }
    }
}

impl MiSandwichEstimator {
    pub fn new(eval_batch_size: usize, num_eval_batches: usize) -> Self {
        Self {
            eval_batch_size,
            num_eval_batches,
            ..Self::default()
        }
    }

    pub fn with_eval_batch_size(mut self, eval_batch_size: usize) -> Self { self.eval_batch_size = eval_batch_size; self }

    pub fn with_num_eval_batches(mut self, num_eval_batches: usize) -> Self { self.num_eval_batches = num_eval_batches; self }

    /// Set logarithm base (default e)
    pub fn with_base(mut self, base: f64) -> Self { self.base = base; self }

    fn validate(&self) -> Result<()> {
        if self.eval_batch_size == 0 {
            return Err(InfoError::InvalidArgument("eval_batch_size must be positive".to_string()));
        }
        if self.num_eval_batches == 0 {
            return Err(InfoError::InvalidArgument("num_eval_batches must be positive".to_string()));
        }
        if !(self.base.is_finite() && self.base > 0.0 && self.base != 1.0) {
            return Err(InfoError::InvalidArgument(format!(
                "log base must be positive and != 1, got {}",
                self.base
            )));
        }
        Ok(())
    }

    /// Estimate the bounds, pulling `num_eval_batches` batches from `stream`.
    pub fn estimate<E, S, R>(&self, encoder: &E, stream: &mut S, rng: &mut R) -> Result<SandwichBounds>
    where
        E: Encoder + ?Sized,
        S: DataStream,
        R: Rng + ?Sized,
    {
        self.validate()?;
        if self.eval_batch_size == 1 {
            warn!("eval_batch_size of 1 leaves the leave-one-out denominator empty; upper bound is +inf");
        }
        let ln_base = self.base.ln();
        let mut lowers = Vec::with_capacity(self.num_eval_batches);
        let mut uppers = Vec::with_capacity(self.num_eval_batches);

        for batch_idx in 0..self.num_eval_batches {
            let batch = stream.next_batch(self.eval_batch_size, rng)?;
            ensure_dim("data stream batch rows", self.eval_batch_size, batch.nrows())?;
            let posterior = encode_batch(encoder, batch.view())?;
            let (lower, upper) = sandwich_bounds_from_posterior(&posterior, rng)?;
            let (lower, upper) = (lower / ln_base, upper / ln_base);

            debug!(batch = batch_idx, lower, upper, "sandwich bounds for batch");
            if !(lower.is_finite() && upper.is_finite()) {
                warn!(
                    batch = batch_idx,
                    lower,
                    upper,
                    batch_size = self.eval_batch_size,
                    "non-finite sandwich bound; it propagates into the averaged estimate"
                );
            }
            lowers.push(lower);
            uppers.push(upper);
        }

        Ok(SandwichBounds::from_batches(Array1::from(lowers), Array1::from(uppers)))
    }

    /// Estimate the bounds over an in-memory dataset (rows = examples),
    /// repeated indefinitely and shuffled with a buffer of
    /// `SHUFFLE_BUFFER_BATCHES * eval_batch_size` examples.
    pub fn estimate_from_data<E, R>(&self, encoder: &E, data: ArrayView2<'_, f64>, rng: &mut R) -> Result<SandwichBounds>
    where
        E: Encoder + ?Sized,
        R: Rng + ?Sized,
    {
        self.validate()?;
        let mut stream = ShuffledRepeat::new(data, SHUFFLE_BUFFER_BATCHES * self.eval_batch_size)?;
        self.estimate(encoder, &mut stream, rng)
    }
}

/// Encode a batch, promote to `f64` and split into means and log-variances.
fn encode_batch<E: Encoder + ?Sized>(encoder: &E, batch: ArrayView2<'_, f64>) -> Result<GaussianBatch> {
    if let Some(features) = encoder.input_dim() {
        ensure_dim("encoder input features", features, batch.ncols())?;
    }
    let encoded = encoder.encode(batch).mapv(Into::<f64>::into);
    ensure_dim("encoder output rows", batch.nrows(), encoded.nrows())?;
    if encoded.ncols() == 0 {
        return Err(InfoError::InvalidArgument("encoder output has no columns".to_string()));
    }
    GaussianBatch::from_encoder_output(encoded)
}

/// Lower and upper bounds (nats) on the information an encoder transmits
/// about `data`, using `num_eval_batches` batches of `eval_batch_size`.
pub fn estimate_mi_sandwich_bounds<E, R>(
    encoder: &E,
    data: ArrayView2<'_, f64>,
    eval_batch_size: usize,
    num_eval_batches: usize,
    rng: &mut R,
) -> Result<(f64, f64)>
where
    E: Encoder + ?Sized,
    R: Rng + ?Sized,
{
    let bounds = MiSandwichEstimator::new(eval_batch_size, num_eval_batches).estimate_from_data(encoder, data, rng)?;
    Ok((bounds.lower, bounds.upper))
}
