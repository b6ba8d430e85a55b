//! Structured log events for key pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a component returning to normal operation.
pub fn degradation_recovered(component: &str) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        "component recovered"
    );
}

/// Log a retrieval where every channel failed.
pub fn retrieval_failed(keyword: &str, vector: &str) {
    tracing::error!(
        event = "retrieval_failed",
        keyword = %keyword,
        vector = %vector,
        "all retrieval channels failed"
    );
}

/// Log a grounding check that found commands absent from every reference.
pub fn ungrounded_commands(commands: &[String], warnings: usize) {
    tracing::warn!(
        event = "ungrounded_commands",
        commands = ?commands,
        warnings = warnings,
        "answer contains commands not found in references"
    );
}
