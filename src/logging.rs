//! Logging utilities for nameplot.
//!
//! Structured `tracing` helpers shared by the library and the binary. Every
//! render is tagged with a render id so the lines belonging to one map can be
//! picked out of a batch run.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::NamePlotError;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(operation = operation, details = details, "Starting operation");
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Run a render step under a fresh render id, logging its duration
pub fn log_timed_operation<F, T>(operation: &str, f: F) -> crate::error::Result<T>
where
    F: FnOnce() -> crate::error::Result<T>,
{
    let start = Instant::now();
    let render_id = generate_render_id();

    let span = tracing::info_span!("render", operation = operation, render_id = %render_id);
    let _entered = span.enter();

    debug!(operation = operation, "Starting operation");

    let result = f();

    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
    match &result {
        Ok(_) => info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed"
        ),
        Err(e) => warn!(
            operation = operation,
            duration_ms = duration_ms,
            error = %e,
            "Operation failed"
        ),
    }

    result
}

/// Log an error with context
pub fn log_error(error: &NamePlotError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_kind = ?error.kind(),
        "Error occurred"
    );
}

/// Generate a unique render ID
pub fn generate_render_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_generate_render_id() {
        let id1 = generate_render_id();
        let id2 = generate_render_id();

        assert!(!id1.is_empty());
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_log_timed_operation_passes_result_through() {
        let result = log_timed_operation("test_operation", || {
            std::thread::sleep(Duration::from_millis(1));
            Ok(42)
        });
        assert_eq!(result.unwrap(), 42);

        let result: crate::error::Result<()> = log_timed_operation("failing_operation", || {
            Err(NamePlotError::Render {
                message: "boom".to_string(),
            })
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_operation_logging_does_not_panic() {
        let start = Instant::now();
        log_operation_start("load", Some("grid.json"));
        log_operation_start("load", None);
        log_operation_end("load", start, true);
        log_operation_end("load", start, false);
        log_error(
            &NamePlotError::Configuration {
                message: "bad".to_string(),
            },
            "test",
        );
    }
}
