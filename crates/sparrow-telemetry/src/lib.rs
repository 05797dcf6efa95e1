//! # sparrow-telemetry
//!
//! Event bus for solver telemetry. Emits structured events
//! (arrow layout, elimination, solve timing and residuals) that can be
//! consumed by pluggable sinks (tracing, in-memory capture, etc.).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SolverEvent};
