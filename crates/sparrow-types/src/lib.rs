//! # sparrow-types
//!
//! Shared types, error types, and numeric constants
//! for the sparrow sparse-matrix engine.
//!
//! This crate has zero matrix logic — it defines the vocabulary
//! that all other sparrow crates share.

pub mod constants;
pub mod error;
pub mod scalar;

pub use error::{SparrowError, SparrowResult};
pub use scalar::{is_zero, Scalar};
