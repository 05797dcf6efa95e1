//! Integration tests for sparrow-telemetry.

use sparrow_telemetry::bus::EventBus;
use sparrow_telemetry::events::{EventKind, SolverEvent};
use sparrow_telemetry::sinks::{EventSink, TracingSink, VecSink};

fn solved(solve: u32) -> SolverEvent {
    SolverEvent::new(
        solve,
        EventKind::Solved {
            method: "arrow".into(),
            relative_residual: 1e-14,
            wall_time: 0.002,
        },
    )
}

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn emit_and_flush() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    bus.emit(SolverEvent::new(
        0,
        EventKind::SolveBegin {
            method: "arrow".into(),
            rows: 5,
            nnz: 13,
        },
    ));
    bus.emit(solved(0));

    assert!(log.lock().unwrap().is_empty(), "events must wait for flush");
    assert_eq!(bus.flush(), 2);

    let events = log.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1], solved(0));
}

#[test]
fn disabled_bus_drops_events() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    bus.set_enabled(false);
    assert!(!bus.is_enabled());
    bus.emit(solved(0));
    assert_eq!(bus.flush(), 0);
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn multiple_sinks_each_receive_events() {
    let mut bus = EventBus::new();
    let first = VecSink::new();
    let second = VecSink::new();
    let (log1, log2) = (first.log(), second.log());
    bus.add_sink(Box::new(first));
    bus.add_sink(Box::new(second));
    bus.add_sink(Box::new(TracingSink::default()));
    assert_eq!(bus.sink_count(), 3);

    bus.emit(solved(3));
    bus.finish();
    assert_eq!(log1.lock().unwrap().len(), 1);
    assert_eq!(log2.lock().unwrap().len(), 1);
}

#[test]
fn flush_preserves_emit_order() {
    let mut bus = EventBus::new();
    let sink = VecSink::new();
    let log = sink.log();
    bus.add_sink(Box::new(sink));

    for solve in 0..5 {
        bus.emit(solved(solve));
    }
    bus.flush();
    let order: Vec<u32> = log.lock().unwrap().iter().map(|e| e.solve).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4]);
}

// ─── Sink Tests ───────────────────────────────────────────────

#[test]
fn sink_names() {
    assert_eq!(VecSink::new().name(), "vec_sink");
    assert_eq!(TracingSink::new(tracing::Level::DEBUG).name(), "tracing_sink");
}

#[test]
fn tracing_sink_handles_every_kind() {
    let mut sink = TracingSink::new(tracing::Level::TRACE);
    sink.handle(&SolverEvent::new(
        0,
        EventKind::ResidualExceeded {
            residual: 1e-3,
            tolerance: 1e-8,
        },
    ));
    sink.handle(&SolverEvent::new(0, EventKind::EliminationComplete { pivots: 4 }));
    sink.finalize();
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn event_serialization() {
    let event = SolverEvent::new(
        5,
        EventKind::ArrowBuilt {
            rows: 100,
            band: 2,
            wing_width: 3,
            memory_ratio: 0.08,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SolverEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

#[test]
fn residual_event_json() {
    let event = SolverEvent::new(
        10,
        EventKind::ResidualExceeded {
            residual: 0.5,
            tolerance: 1e-8,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("ResidualExceeded"));
    assert!(json.contains("tolerance"));
}
