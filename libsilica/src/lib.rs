// libsilica/src/lib.rs

//! libsilica
//!
//! Command/response engine for FeliCa-family SiliCa tags: frame codec,
//! tap-scoped read and write sessions, and coordinators that resume a full
//! dump or a block batch across taps.
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod history;
pub mod prelude;
pub mod protocol;
pub mod session;
pub mod snapshot;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
