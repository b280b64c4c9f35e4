// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView1, s};
use std::collections::HashMap;

/// Symbol counts of a discrete sequence, shared by the entropy statistics.
pub struct DiscreteDataset {
    /// Original symbol sequence
    pub data: Array1<i32>,
    /// Counts per unique symbol
    pub counts: HashMap<i32, usize>,
    /// Total number of observations
    pub n: usize,
    /// Number of unique symbols
    pub k: usize,
    /// Probability p(x) for each unique symbol
    pub dist: HashMap<i32, f64>,
}

impl DiscreteDataset {
    /// Build a DiscreteDataset from a raw symbol sequence
    pub fn from_data(data: Array1<i32>) -> Self {
        let n = data.len();
        let counts = count_frequencies(data.view());
        let k = counts.len();
        let n_f = n as f64;
        let dist = counts
            .iter()
            .map(|(&val, &cnt)| (val, cnt as f64 / n_f))
            .collect();
        Self {
            data,
            counts,
            n,
            k,
            dist,
        }
    }

    /// Map each sample to its probability using the cached distribution
    pub fn map_probs(&self) -> Array1<f64> {
        self.data.mapv(|v| self.dist.get(&v).copied().unwrap_or(0.0))
    }

    /// Empirical probabilities of the unique symbols, in no particular order
    pub fn probabilities(&self) -> Array1<f64> {
        self.dist.values().copied().collect()
    }
}

/// Count the occurrences of each value.
/// Uses a dense vector for small non-negative ranges, otherwise a HashMap.
pub fn count_frequencies(data: ArrayView1<'_, i32>) -> HashMap<i32, usize> {
    let (Some(&min_v), Some(&max_v)) = (data.iter().min(), data.iter().max()) else {
        return HashMap::new();
    };

    // Dense mode only pays off when the value range is small.
    const MAX_DENSE_RANGE: i32 = 4096;
    if min_v >= 0 && max_v - min_v <= MAX_DENSE_RANGE {
        let mut dense = vec![0usize; (max_v - min_v) as usize + 1];
        for &v in data.iter() {
            dense[(v - min_v) as usize] += 1;
        }
        return dense
            .iter()
            .enumerate()
            .filter(|&(_, &cnt)| cnt != 0)
            .map(|(i, &cnt)| (min_v + i as i32, cnt))
            .collect();
    }

    let mut frequency_map = HashMap::new();
    for &value in data.iter() {
        *frequency_map.entry(value).or_insert(0) += 1;
    }
    frequency_map
}

/// Reduce multiple code arrays (aligned by index) into a single compact joint code space.
///
/// Each position's tuple of codes is mapped to a unique compact i32 ID, in
/// order of first occurrence.
pub fn reduce_joint_space_compact(code_arrays: &[ArrayView1<'_, i32>]) -> Array1<i32> {
    let Some(first) = code_arrays.first() else {
        return Array1::zeros(0);
    };
    let len = first.len();
    debug_assert!(
        code_arrays.iter().all(|arr| arr.len() == len),
        "All code arrays must have the same length for joint reduction"
    );

    let mut map: HashMap<Vec<i32>, i32> = HashMap::new();
    let mut out: Vec<i32> = Vec::with_capacity(len);
    for i in 0..len {
        let key: Vec<i32> = code_arrays.iter().map(|arr| arr[i]).collect();
        let next_id = map.len() as i32;
        out.push(*map.entry(key).or_insert(next_id));
    }
    Array1::from(out)
}

/// Compact codes of the overlapping length-`word_len` words of `seq`.
///
/// Word t covers `seq[t..t + word_len]`; there are `len - word_len + 1` words.
/// `word_len` must be in `1..=seq.len()`.
pub fn sliding_word_codes(seq: ArrayView1<'_, i32>, word_len: usize) -> Array1<i32> {
    let n_words = seq.len() + 1 - word_len;
    let lagged: Vec<ArrayView1<'_, i32>> = (0..word_len)
        .map(|lag| seq.slice_move(s![lag..lag + n_words]))
        .collect();
    reduce_joint_space_compact(&lagged)
}
