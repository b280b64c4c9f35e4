// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # compressinfo
//!
//! Information-theoretic measures for analysing learned compression encoders:
//! mutual information bounds for stochastic encoders, divergences between
//! diagonal Gaussians, similarity kernels between embeddings and entropy
//! statistics of symbol sequences.
//!
//! ## Quick Start
//!
//! ```rust
//! use compressinfo::estimators::approaches::sandwich::{FixedPosteriorEncoder, MiSandwichEstimator};
//! use compressinfo::estimators::entropy::Entropy;
//! use compressinfo::estimators::traits::GlobalValue;
//! use ndarray::{Array2, array};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! // Sandwich bounds for an encoder that ignores its input (zero information)
//! let data = Array2::<f64>::zeros((64, 3));
//! let encoder = FixedPosteriorEncoder::standard_normal(2);
//! let mut rng = StdRng::seed_from_u64(7);
//! let bounds = MiSandwichEstimator::new(32, 4)
//!     .estimate_from_data(&encoder, data.view(), &mut rng)
//!     .unwrap();
//! assert!(bounds.lower.abs() < 1e-9);
//!
//! // Entropy of a symbol sequence, in bits
//! let h = Entropy::new_sequence(array![0, 1, 0, 1]).global_value();
//! assert!((h - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Contents
//!
//! | Area | Module |
//! |------|--------|
//! | Sandwich MI bounds (InfoNCE / leave-one-out) | [`estimators::approaches::sandwich`] |
//! | Bhattacharyya and KL between diagonal Gaussians | [`estimators::approaches::expfam`] |
//! | Entropy, sequence entropy, entropy-rate scaling | [`estimators::approaches::discrete`] |
//! | Pairwise distances and scaled similarities | [`estimators::utils`] |
//!
//! ## Sandwich Bounds
//!
//! The encoder's posterior p(u|x) is a diagonal Gaussian, so the conditional
//! density of a sampled code under every posterior of a batch is known in
//! closed form. The InfoNCE lower bound and the leave-one-out upper bound
//! compare each code's own density with its average density under the batch.
//! Both are Monte Carlo estimates: larger batches tighten them, more batches
//! reduce their variance.
//!
//! ## Errors and Logging
//!
//! Shape and argument problems are returned as [`InfoError`] before any work
//! is done. Non-finite per-batch bounds are not errors; they propagate into
//! the averaged estimate and are reported through `tracing` at `warn` level.

pub mod error;
pub mod estimators;

pub use error::{InfoError, Result};
pub use estimators::{GlobalValue, LocalValues, MutualInformationBounds};
