// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temperature-scaled similarity matrices between two sets of embeddings.
//!
//! A similarity relates two embeddings so that a more similar pair scores
//! higher than a less similar one. The distance-based kinds are negated
//! distances and range over (-inf, 0]; cosine similarity ranges over [-1, 1].
//! Every kind is divided by a positive temperature that sets the scale.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView2, Axis};

use crate::error::{InfoError, Result, ensure_dim};
use super::distance::{pairwise_l1, pairwise_l2sq, pairwise_linf};

/// Added under the square root of the L2 similarity so the gradient at
/// zero distance stays finite.
pub const L2_SQRT_EPS: f64 = 1e-9;

/// Supported similarity measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimilarityKind {
    /// Negated squared Euclidean distance.
    L2Sq,
    /// Negated Euclidean distance.
    L2,
    /// Negated Manhattan distance.
    L1,
    /// Negated Chebyshev distance.
    LInf,
    /// Inner product of the L2-normalised vectors.
    Cosine,
}

impl SimilarityKind {
    pub const ALL: [SimilarityKind; 5] = [
        SimilarityKind::L2Sq,
        SimilarityKind::L2,
        SimilarityKind::L1,
        SimilarityKind::LInf,
        SimilarityKind::Cosine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityKind::L2Sq => "l2sq",
            SimilarityKind::L2 => "l2",
            SimilarityKind::L1 => "l1",
            SimilarityKind::LInf => "linf",
            SimilarityKind::Cosine => "cosine",
        }
    }
}

impl fmt::Display for SimilarityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityKind {
    type Err = InfoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "l2sq" => Ok(SimilarityKind::L2Sq),
            "l2" => Ok(SimilarityKind::L2),
            "l1" => Ok(SimilarityKind::L1),
            "linf" => Ok(SimilarityKind::LInf),
            "cosine" => Ok(SimilarityKind::Cosine),
            other => Err(InfoError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Similarity matrix for a kind given by name (`"l2sq"`, `"l2"`, `"l1"`,
/// `"linf"` or `"cosine"`).
///
/// # Errors
///
/// `UnsupportedKind` for an unknown name, `InvalidArgument` for a
/// non-positive temperature, `ShapeMismatch` when the embedding dimensions
/// differ.
pub fn similarity(
    embeddings1: ArrayView2<'_, f64>,
    embeddings2: ArrayView2<'_, f64>,
    kind: &str,
    temperature: f64,
) -> Result<Array2<f64>> {
    let kind = kind.parse::<SimilarityKind>()?;
    scaled_similarity(embeddings1, embeddings2, kind, temperature)
}

/// Typed variant of [`similarity`].
pub fn scaled_similarity(
    embeddings1: ArrayView2<'_, f64>,
    embeddings2: ArrayView2<'_, f64>,
    kind: SimilarityKind,
    temperature: f64,
) -> Result<Array2<f64>> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(InfoError::InvalidArgument(format!(
            "temperature must be positive and finite, got {temperature}"
        )));
    }
    ensure_dim("similarity", embeddings1.ncols(), embeddings2.ncols())?;

    let raw = match kind {
        SimilarityKind::L2Sq => -pairwise_l2sq(embeddings1, embeddings2)?,
        SimilarityKind::L2 => pairwise_l2sq(embeddings1, embeddings2)?
            .mapv_into(|d| -(d + L2_SQRT_EPS).sqrt()),
        SimilarityKind::L1 => -pairwise_l1(embeddings1, embeddings2)?,
        SimilarityKind::LInf => -pairwise_linf(embeddings1, embeddings2)?,
        SimilarityKind::Cosine => {
            let a = normalize_rows(embeddings1);
            let b = normalize_rows(embeddings2);
            a.dot(&b.t())
        }
    };
    Ok(raw / temperature)
}

/// Scale each row to unit L2 norm; zero rows stay zero.
pub fn normalize_rows(pts: ArrayView2<'_, f64>) -> Array2<f64> {
    let norms = pts.map_axis(Axis(1), |row| {
        let n = row.dot(&row).sqrt();
        if n > 0.0 { n } else { 1.0 }
    });
    &pts / &norms.insert_axis(Axis(1))
}
