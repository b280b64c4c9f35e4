// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView1};
use crate::error::{InfoError, Result};
use crate::estimators::traits::{GlobalValue, LocalValues};
use crate::estimators::approaches::discrete::discrete_utils::DiscreteDataset;

/// Empirical (plug-in) Shannon entropy of a discrete symbol sequence.
///
/// H = -Σ p_i log_b p_i with p_i = n_i/N from the symbol counts. Local values are
/// -log_b p(x_t) per sample, so their mean equals the global value.
/// The log base defaults to 2 (bits).
pub struct SequenceEntropy {
    dataset: DiscreteDataset,
    base: f64,
}

impl SequenceEntropy {
    pub fn new(data: Array1<i32>) -> Self {
        let dataset = DiscreteDataset::from_data(data);
        Self { dataset, base: 2.0 }
    }

    /// Set logarithm base (default 2)
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `base` is finite, positive and != 1.
    pub fn with_base(mut self, base: f64) -> Result<Self> {
        if !(base.is_finite() && base > 0.0 && base != 1.0) {
            return Err(InfoError::InvalidArgument(format!(
                "log base must be positive and != 1, got {base}"
            )));
        }
        self.base = base;
        Ok(self)
    }

    /// Number of distinct symbols observed.
    pub fn support_size(&self) -> usize {
        self.dataset.k
    }
}

impl GlobalValue for SequenceEntropy {
    fn global_value(&self) -> f64 {
        if self.dataset.n == 0 {
            return 0.0;
        }
        let n_f = self.dataset.n as f64;
        let ln_base = self.base.ln();
        let mut h = 0.0_f64;
        for &cnt in self.dataset.counts.values() {
            let p = (cnt as f64) / n_f;
            h -= p * p.ln();
        }
        h / ln_base
    }
}

impl LocalValues for SequenceEntropy {
    fn local_values(&self) -> Array1<f64> {
        let ln_base = self.base.ln();
        self.dataset.map_probs().mapv(|p| -p.ln() / ln_base)
    }
}

/// Empirical entropy in bits of the symbol frequencies of `seq`.
pub fn sequence_entropy(seq: ArrayView1<'_, i32>) -> f64 {
    SequenceEntropy::new(seq.to_owned()).global_value()
}
