// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, ArrayView2, Axis};
use rand::Rng;

use crate::error::{InfoError, Result};

/// Source of fixed-size batches of raw examples (rows).
///
/// Implementations must return exactly `batch_size` rows per call, looping
/// over their underlying data as often as needed.
pub trait DataStream {
    fn next_batch<R: Rng + ?Sized>(&mut self, batch_size: usize, rng: &mut R) -> Result<Array2<f64>>;
}

/// Infinitely repeated, buffer-shuffled view of an in-memory dataset.
///
/// The source rows are fed in order, over and over, into a shuffle buffer of
/// fixed capacity. Every draw takes a uniformly random buffer slot and refills
/// it with the next source row, so a row can reappear before the source has
/// been cycled completely and the total number of draws is unbounded.
pub struct ShuffledRepeat<'a> {
    source: ArrayView2<'a, f64>,
    buffer: Vec<usize>,
    buffer_size: usize,
    cursor: usize,
    drawn: usize,
}

impl<'a> ShuffledRepeat<'a> {
    /// # Errors
    ///
    /// `InvalidArgument` if `source` has no rows or `buffer_size` is zero.
    pub fn new(source: ArrayView2<'a, f64>, buffer_size: usize) -> Result<Self> {
        if source.nrows() == 0 {
            return Err(InfoError::InvalidArgument("data source has no examples".to_string()));
        }
        if buffer_size == 0 {
            return Err(InfoError::InvalidArgument("shuffle buffer size must be positive".to_string()));
        }
        Ok(Self {
            source,
            buffer: Vec::with_capacity(buffer_size),
            buffer_size,
            cursor: 0,
            drawn: 0,
        })
    }

    /// Total number of examples handed out so far.
    pub fn examples_drawn(&self) -> usize {
        self.drawn
    }

    /// Index of the next source row, wrapping around at the end.
    fn next_source_index(&mut self) -> usize {
        let idx = self.cursor;
        self.cursor = (self.cursor + 1) % self.source.nrows();
        idx
    }

    fn draw_index<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        while self.buffer.len() < self.buffer_size {
            let idx = self.next_source_index();
            self.buffer.push(idx);
        }
        let slot = rng.gen_range(0..self.buffer.len());
        let refill = self.next_source_index();
        self.drawn += 1;
        std::mem::replace(&mut self.buffer[slot], refill)
    }
}

impl DataStream for ShuffledRepeat<'_> {
    fn next_batch<R: Rng + ?Sized>(&mut self, batch_size: usize, rng: &mut R) -> Result<Array2<f64>> {
        let indices: Vec<usize> = (0..batch_size).map(|_| self.draw_index(rng)).collect();
        Ok(self.source.select(Axis(0), &indices))
    }
}
