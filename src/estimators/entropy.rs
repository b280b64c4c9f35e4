use ndarray::{Array1, ArrayView1};
use crate::error::Result;
use crate::estimators::approaches::discrete::{mle, scaling};
pub use crate::estimators::traits::LocalValues;

/// Entropy statistics for discrete data
///
/// This struct provides static methods for creating entropy estimators
/// and evaluating entropy of probability arrays and symbol sequences.
pub struct Entropy;

impl Entropy {
    /// Creates a new plug-in entropy estimator for a symbol sequence (bits by default)
    ///
    /// # Arguments
    ///
    /// * `data` - One-dimensional array of integer symbols
    ///
    /// # Returns
    ///
    /// A sequence entropy estimator configured for the provided data
    pub fn new_sequence(data: Array1<i32>) -> mle::SequenceEntropy {
        mle::SequenceEntropy::new(data)
    }

    /// Shannon entropy in bits of a probability array
    pub fn of_probabilities(probabilities: ArrayView1<'_, f64>) -> Result<f64> {
        scaling::entropy_bits(probabilities)
    }

    /// Entropy in bits of the overlapping words of length `word_len`
    pub fn block(seq: ArrayView1<'_, i32>, word_len: usize) -> Result<f64> {
        scaling::block_entropy(seq, word_len)
    }
}
