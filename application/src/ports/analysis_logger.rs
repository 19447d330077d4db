//! Port for structured analysis logging.
//!
//! Records each request (input, extraction attempts, model reply, outcome)
//! to a machine-readable log. This is separate from `tracing`: tracing
//! handles diagnostic messages, this port captures the request transcript.

use serde_json::Value;

/// A structured analysis event.
pub struct AnalysisEvent {
    /// Event type identifier (e.g., "proxy_failed", "llm_reply").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AnalysisEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging analysis events.
///
/// `log` is synchronous and infallible; implementations swallow their own
/// write errors.
pub trait AnalysisLogger: Send + Sync {
    fn log(&self, event: AnalysisEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoAnalysisLogger;

impl AnalysisLogger for NoAnalysisLogger {
    fn log(&self, _event: AnalysisEvent) {}
}
