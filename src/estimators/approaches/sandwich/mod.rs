// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Sandwich (InfoNCE / leave-one-out) bounds on the mutual information between
// data and the stochastic code of an encoder with diagonal Gaussian posterior.

pub mod density;
pub mod encoder;
pub mod estimator;
pub mod stream;

pub use encoder::{Encoder, FixedPosteriorEncoder, FnEncoder, LinearGaussianEncoder, from_fn};
pub use estimator::{MiSandwichEstimator, SandwichBounds, estimate_mi_sandwich_bounds};
pub use stream::{DataStream, ShuffledRepeat};
