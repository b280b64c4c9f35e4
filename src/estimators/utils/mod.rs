// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Point-set kernels used for representation diagnostics.

pub mod distance;
pub mod similarity;
