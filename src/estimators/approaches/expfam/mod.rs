// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Exponential-family closed forms: batches of diagonal Gaussians and the
// divergences between them.

pub mod gaussian;
pub mod divergence;
