// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView2, Axis, s};

use crate::error::{InfoError, Result, ensure_dim};

/// A batch of N independent diagonal-covariance Gaussians in d dimensions.
///
/// Row i holds the mean and the per-dimension log-variances of Gaussian i.
/// Covariance is diagonal by construction, so determinants and inverses are
/// per-dimension products and reciprocals; no dense covariance matrix is
/// ever formed.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianBatch {
    mus: Array2<f64>,
    logvars: Array2<f64>,
}

impl GaussianBatch {
    /// Build from means and log-variances of identical shape (N, d).
    pub fn new(mus: Array2<f64>, logvars: Array2<f64>) -> Result<Self> {
        ensure_dim("gaussian batch rows", mus.nrows(), logvars.nrows())?;
        ensure_dim("gaussian batch dimension", mus.ncols(), logvars.ncols())?;
        Ok(Self { mus, logvars })
    }

    /// Build from views, copying the data.
    pub fn from_views(mus: ArrayView2<'_, f64>, logvars: ArrayView2<'_, f64>) -> Result<Self> {
        Self::new(mus.to_owned(), logvars.to_owned())
    }

    /// Split an (N, 2d) encoder output along its last axis: the first d
    /// columns are means, the last d are log-variances.
    pub fn from_encoder_output(output: Array2<f64>) -> Result<Self> {
        let width = output.ncols();
        if width % 2 != 0 {
            return Err(InfoError::InvalidArgument(format!(
                "encoder output width must be even (means then log-variances), got {width}"
            )));
        }
        let d = width / 2;
        let mus = output.slice(s![.., ..d]).to_owned();
        let logvars = output.slice(s![.., d..]).to_owned();
        Ok(Self { mus, logvars })
    }

    /// Number of Gaussians (N).
    pub fn len(&self) -> usize {
        self.mus.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embedding dimension (d).
    pub fn dim(&self) -> usize {
        self.mus.ncols()
    }

    pub fn mus(&self) -> ArrayView2<'_, f64> {
        self.mus.view()
    }

    pub fn logvars(&self) -> ArrayView2<'_, f64> {
        self.logvars.view()
    }

    /// Per-dimension variances, `exp(logvar)`.
    pub fn variances(&self) -> Array2<f64> {
        self.logvars.mapv(f64::exp)
    }

    /// Per-dimension standard deviations, `exp(logvar / 2)`.
    pub fn stddevs(&self) -> Array2<f64> {
        self.logvars.mapv(|lv| (0.5 * lv).exp())
    }

    /// Log-determinant of each covariance, the row sums of the log-variances.
    pub fn log_det(&self) -> Array1<f64> {
        self.logvars.sum_axis(Axis(1))
    }

    /// Fail with `ShapeMismatch` unless both batches share the embedding dimension.
    pub fn ensure_same_dim(&self, other: &GaussianBatch) -> Result<()> {
        ensure_dim("gaussian embedding dimension", self.dim(), other.dim())
    }
}
