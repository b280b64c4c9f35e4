// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error type shared by all kernels and estimators.
//!
//! Every shape or argument problem is reported at the call boundary, before any
//! arithmetic happens. Numerical degeneracy inside an estimate (a non-finite
//! log-ratio) is not an error: it propagates into the result and is reported
//! through `tracing::warn!`.

use thiserror::Error;

/// Errors raised by distance kernels, divergences, entropy statistics and
/// the sandwich estimator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InfoError {
    /// Two arrays disagree on a dimension that must match.
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// Similarity kind string not recognised.
    #[error("similarity type not implemented: {0}")]
    UnsupportedKind(String),

    /// Argument outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, InfoError>;

/// Fail with `ShapeMismatch` unless `found == expected`.
pub(crate) fn ensure_dim(context: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(InfoError::ShapeMismatch {
            context,
            expected,
            found,
        });
    }
    Ok(())
}
