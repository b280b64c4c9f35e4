use crate::estimators::approaches::sandwich::MiSandwichEstimator;

pub struct MutualInformation;

impl MutualInformation {
    /// Creates a sandwich (InfoNCE / leave-one-out) bound estimator for an encoder
    /// with diagonal Gaussian posterior
    ///
    /// # Arguments
    ///
    /// * `eval_batch_size` - Examples per evaluation batch; larger batches tighten the bounds
    /// * `num_eval_batches` - Batches to average over; more batches reduce the variance
    pub fn new_sandwich(eval_batch_size: usize, num_eval_batches: usize) -> MiSandwichEstimator {
        MiSandwichEstimator::new(eval_batch_size, num_eval_batches)
    }
}
