// Shared fixtures and helpers for the integration test crates.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use helpers::*;
