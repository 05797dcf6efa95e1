//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them
//! (log through `tracing`, capture in memory for tests, etc.).

use std::sync::{Arc, Mutex};

use crate::events::{EventKind, SolverEvent};

/// Trait for event consumers.
///
/// Implement this to create custom telemetry outputs.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SolverEvent);

    /// Called when the run ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared handle to the events captured by a [`VecSink`].
pub type EventLog = Arc<Mutex<Vec<SolverEvent>>>;

/// A sink that collects events into a shared `Vec` for testing and
/// inspection. Clone the log with [`VecSink::log`] before boxing the
/// sink into a bus.
pub struct VecSink {
    events: EventLog,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a handle to the captured events.
    pub fn log(&self) -> EventLog {
        Arc::clone(&self.events)
    }
}

impl Default for VecSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SolverEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// A sink that logs events using the `tracing` crate.
///
/// Residual failures are logged at `warn`, everything else at the
/// configured level.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::INFO)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SolverEvent) {
        if let EventKind::ResidualExceeded { residual, tolerance } = event.kind {
            tracing::warn!(solve = event.solve, residual, tolerance, "residual_exceeded");
            return;
        }
        match self.level {
            tracing::Level::ERROR | tracing::Level::WARN | tracing::Level::INFO => {
                tracing::info!(solve = event.solve, event = ?event.kind, "solver_event");
            }
            tracing::Level::DEBUG => {
                tracing::debug!(solve = event.solve, event = ?event.kind, "solver_event");
            }
            tracing::Level::TRACE => {
                tracing::trace!(solve = event.solve, event = ?event.kind, "solver_event");
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
