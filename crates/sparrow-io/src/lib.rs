//! # sparrow-io
//!
//! Data interchange for sparse matrices and vectors.
//!
//! Provides:
//! - [`text`] — whitespace-separated `row  col  value` dumps and vector files
//! - [`contract`] — serde JSON documents for COO, CSR and Yale payloads
//! - [`validator`] — structural checks run before a document becomes a matrix

pub mod contract;
pub mod text;
pub mod validator;

pub use contract::{MatrixDocument, MatrixFormat, MatrixPayload, VectorDocument};
pub use validator::{validate_document, validate_vector};
