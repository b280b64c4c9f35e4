pub mod discrete;
pub mod expfam;
pub mod sandwich;

// Unified re-exports for common estimators so tests and users can import
// compressinfo::estimators::approaches::* ergonomically.
pub use discrete::mle::SequenceEntropy;
pub use expfam::gaussian::GaussianBatch;
pub use sandwich::{MiSandwichEstimator, SandwichBounds};
