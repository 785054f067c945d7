//! Logging utilities for tropocorr.
//!
//! Structured `tracing` events for the correction workflow, so runs over
//! large interferograms can be followed and timed from the log.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::TropoError;

/// Initialize the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence over `log_level` when set. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
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
            "Operation completed with warnings"
        );
    }
}

/// Run `f`, logging its duration under a fresh operation id
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = generate_operation_id();

    debug!(
        operation = operation,
        operation_id = operation_id.as_str(),
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = operation_id.as_str(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log the size of a raster that was read from disk
pub fn log_raster_stats(file_path: &str, rows: usize, cols: usize, bands: usize) {
    let bytes = rows * cols * bands * std::mem::size_of::<f32>();
    info!(
        operation = "raster_read",
        file_path = file_path,
        rows = rows,
        cols = cols,
        bands = bands,
        memory_kb = bytes / 1024,
        "Raster loaded"
    );
}

/// Log an error with context
pub fn log_error(error: &TropoError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

/// Generate a unique operation ID
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_generate_operation_id() {
        let id1 = generate_operation_id();
        let id2 = generate_operation_id();

        assert!(!id1.is_empty());
        assert_ne!(id1, id2);
        assert_eq!(Uuid::parse_str(&id1).unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_log_timed_operation() {
        let result = log_timed_operation("test_operation", || {
            std::thread::sleep(Duration::from_millis(1));
            42
        });

        assert_eq!(result, 42);
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing("debug");
        init_tracing("info");
        log_error(
            &TropoError::Config {
                message: "example".to_string(),
            },
            "test",
        );
    }
}
