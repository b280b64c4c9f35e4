//! Module containing tests for diagonal Gaussian batches and their divergences.
