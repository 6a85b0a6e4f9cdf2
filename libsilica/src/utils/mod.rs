//! Utilities for libsilica: small, reusable helpers used across the crate.
//!
//! Hex formatting for the exchange log and snapshots.

pub mod hex;

// Re-export the most common helpers at the `utils` module level so callers can
// use `crate::utils::bytes_to_hex(...)` etc if they prefer.
pub use hex::*;
