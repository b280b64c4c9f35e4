// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::Array1;

pub trait GlobalValue {
    /// Compute and return the global value of the measure.
    fn global_value(&self) -> f64;
}

pub trait LocalValues: GlobalValue {
    /// Compute and return the local values of the measure.
    fn local_values(&self) -> Array1<f64>;

    /// Derive global_value as the mean of local values (0 for no samples).
    fn global_from_local(&self) -> f64 {
        self.local_values().mean().unwrap_or(0.0)
    }
}

/// Interface for estimators that bracket a mutual information $I(X; U)$ from both sides.
pub trait MutualInformationBounds {
    /// Estimated lower bound.
    fn lower_bound(&self) -> f64;
    /// Estimated upper bound.
    fn upper_bound(&self) -> f64;

    /// Width of the bracket, `upper - lower`.
    fn gap(&self) -> f64 {
        self.upper_bound() - self.lower_bound()
    }
}
