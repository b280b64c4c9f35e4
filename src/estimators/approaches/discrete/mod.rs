// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Discrete entropy statistics: symbol counting, plug-in sequence entropy,
// probability-array entropy and entropy-rate scaling.

pub mod discrete_utils;
pub mod mle;
pub mod scaling;
