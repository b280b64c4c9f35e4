// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entropy of probability arrays and finite-size entropy-rate statistics.
//!
//! The entropy rate of a symbol source is approached through block entropies
//! of growing word length. Schürmann and Grassberger model the
//! convergence of the finite-size estimates as
//!
//! h(N) = h_inf + log2(N) / N^gamma / |c|
//!
//! [`entropy_rate_ansatz`] evaluates that model so an external fitter can
//! recover `h_inf`.

use ndarray::{Array1, ArrayView1};

use crate::error::{InfoError, Result};
use crate::estimators::approaches::discrete::discrete_utils::sliding_word_codes;
use crate::estimators::approaches::discrete::mle::sequence_entropy;

/// Shannon entropy in bits of a probability array.
///
/// Zero entries contribute nothing (log2 of 1 is substituted). The array is
/// not required to be normalised.
///
/// # Errors
///
/// `InvalidArgument` if any entry is negative or not finite.
pub fn entropy_bits(probabilities: ArrayView1<'_, f64>) -> Result<f64> {
    entropy_with_base(probabilities, 2.0)
}

/// Shannon entropy of a probability array in an arbitrary log base.
pub fn entropy_with_base(probabilities: ArrayView1<'_, f64>, base: f64) -> Result<f64> {
    if !(base.is_finite() && base > 0.0 && base != 1.0) {
        return Err(InfoError::InvalidArgument(format!(
            "log base must be positive and != 1, got {base}"
        )));
    }
    if let Some(bad) = probabilities.iter().find(|p| !(p.is_finite() && **p >= 0.0)) {
        return Err(InfoError::InvalidArgument(format!(
            "probabilities must be finite and non-negative, got {bad}"
        )));
    }
    let ln_base = base.ln();
    let h: f64 = probabilities
        .iter()
        .map(|&p| {
            let safe = if p > 0.0 { p } else { 1.0 };
            p * safe.ln()
        })
        .sum();
    Ok(-h / ln_base)
}

/// Finite-size correction model for entropy-rate convergence:
/// `h_inf + log2(n) / n^gamma / |c|`.
pub fn entropy_rate_ansatz(n: f64, h_inf: f64, gamma: f64, c: f64) -> f64 {
    h_inf + n.log2() / n.powf(gamma) / c.abs()
}

/// [`entropy_rate_ansatz`] evaluated at every length in `ns`.
pub fn entropy_rate_ansatz_curve(ns: ArrayView1<'_, f64>, h_inf: f64, gamma: f64, c: f64) -> Array1<f64> {
    ns.mapv(|n| entropy_rate_ansatz(n, h_inf, gamma, c))
}

/// Entropy in bits of the overlapping words of length `word_len` in `seq`.
///
/// # Errors
///
/// `InvalidArgument` unless `1 <= word_len <= seq.len()`.
pub fn block_entropy(seq: ArrayView1<'_, i32>, word_len: usize) -> Result<f64> {
    check_word_len(seq.len(), word_len)?;
    let codes = sliding_word_codes(seq, word_len);
    Ok(sequence_entropy(codes.view()))
}

/// Finite-size entropy-rate estimate `H_n - H_{n-1}` (bits per symbol),
/// with `H_0 = 0`.
pub fn conditional_block_entropy(seq: ArrayView1<'_, i32>, word_len: usize) -> Result<f64> {
    let h_n = block_entropy(seq, word_len)?;
    let h_prev = if word_len > 1 {
        block_entropy(seq, word_len - 1)?
    } else {
        0.0
    };
    Ok(h_n - h_prev)
}

fn check_word_len(len: usize, word_len: usize) -> Result<()> {
    if word_len == 0 || word_len > len {
        return Err(InfoError::InvalidArgument(format!(
            "word length must be in 1..={len}, got {word_len}"
        )));
    }
    Ok(())
}
