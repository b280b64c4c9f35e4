// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pairwise distance matrices between two point sets.
//!
//! Every kernel takes `pts1` of shape (N, d) and `pts2` of shape (M, d) and
//! returns an (N, M) matrix whose entry (i, j) is the distance between
//! `pts1[i]` and `pts2[j]`. The embedding dimension must agree.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

use crate::error::{Result, ensure_dim};

/// Squared Euclidean distances via `|a|^2 + |b|^2 - 2 a.b`, clamped at zero
/// because cancellation can push near-identical pairs slightly negative.
pub fn pairwise_l2sq(pts1: ArrayView2<'_, f64>, pts2: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    ensure_dim("pairwise distance", pts1.ncols(), pts2.ncols())?;
    let norm1 = squared_row_norms(pts1);
    let norm2 = squared_row_norms(pts2);

    let mut dist = pts1.dot(&pts2.t());
    dist.mapv_inplace(|ab| -2.0 * ab);
    dist += &norm1.insert_axis(Axis(1));
    dist += &norm2.insert_axis(Axis(0));
    dist.mapv_inplace(|v| v.max(0.0));
    Ok(dist)
}

/// Euclidean distances, `sqrt` of [`pairwise_l2sq`].
pub fn pairwise_l2(pts1: ArrayView2<'_, f64>, pts2: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    Ok(pairwise_l2sq(pts1, pts2)?.mapv_into(f64::sqrt))
}

/// Manhattan distances: sum of absolute per-dimension differences.
pub fn pairwise_l1(pts1: ArrayView2<'_, f64>, pts2: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    pairwise_reduce(pts1, pts2, |a, b| {
        Zip::from(a).and(b).fold(0.0, |acc, &x, &y| acc + (x - y).abs())
    })
}

/// Chebyshev (chessboard) distances: the largest absolute difference over
/// any single dimension.
pub fn pairwise_linf(pts1: ArrayView2<'_, f64>, pts2: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
    pairwise_reduce(pts1, pts2, |a, b| {
        Zip::from(a)
            .and(b)
            .fold(0.0_f64, |acc, &x, &y| acc.max((x - y).abs()))
    })
}

fn squared_row_norms(pts: ArrayView2<'_, f64>) -> Array1<f64> {
    pts.map_axis(Axis(1), |row| row.dot(&row))
}

/// Fill an (N, M) matrix by applying `metric` to every row pair.
fn pairwise_reduce<F>(pts1: ArrayView2<'_, f64>, pts2: ArrayView2<'_, f64>, metric: F) -> Result<Array2<f64>>
where
    F: Fn(ArrayView1<'_, f64>, ArrayView1<'_, f64>) -> f64,
{
    ensure_dim("pairwise distance", pts1.ncols(), pts2.ncols())?;
    let mut dist = Array2::zeros((pts1.nrows(), pts2.nrows()));
    for (i, a) in pts1.axis_iter(Axis(0)).enumerate() {
        for (j, b) in pts2.axis_iter(Axis(0)).enumerate() {
            dist[(i, j)] = metric(a, b);
        }
    }
    Ok(dist)
}
