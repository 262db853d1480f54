//! ## Crate layout
//! - `core`: resource kinds, property schemas, scoping, lifecycle and graph.
//! - `utils`: naming and SQL text helpers shared across crates.
//!
//! The `prelude` module carries the vocabulary needed to describe desired
//! state and render DDL for it.

pub use rime_core as core;
pub use rime_utils as utils;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use rime_core::{Error, ErrorClass};

///
/// Prelude
///

pub mod prelude {
    pub use rime_core::prelude::*;
}
