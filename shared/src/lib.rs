//! Shared types and scoring engine for Pollen Watch
//!
//! This crate contains the pure computation shared between the native
//! client, the browser build (via WASM), and their tests. Nothing here
//! performs I/O.

pub mod models;
pub mod persisted;
pub mod scalar;
pub mod types;
pub mod validation;

pub use models::*;
pub use persisted::*;
pub use types::*;
pub use validation::*;
