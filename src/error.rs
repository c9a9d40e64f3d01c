//! Error types for the benchmark driver.
//!
//! Only failures at the process boundary are represented here. Shape
//! mismatches and out-of-range indices inside the kernel are caller bugs and
//! panic instead of returning an error.

use std::fmt;

/// Errors that can occur while setting up a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// The command line did not provide `<M> <N> <K>`.
    Usage {
        /// Program name as invoked (`argv[0]`).
        program: String,
        /// Parser diagnostic, kept for logging.
        message: String,
    },
    /// The global worker pool could not be started.
    ThreadPool {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Usage { program, .. } => write!(f, "Usage: {} <M> <N> <K>", program),
            BenchError::ThreadPool { message } => {
                write!(f, "Thread pool error: {}", message)
            }
        }
    }
}

impl std::error::Error for BenchError {}

/// Result type alias for benchmark setup.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Creates a usage error.
pub fn usage_error(program: impl Into<String>, message: impl Into<String>) -> BenchError {
    BenchError::Usage {
        program: program.into(),
        message: message.into(),
    }
}

/// Creates a thread pool error.
pub fn thread_pool_error(message: impl Into<String>) -> BenchError {
    BenchError::ThreadPool {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_display() {
        let error = usage_error("matrix-product", "missing <K>");
        let display = format!("{}", error);
        assert_eq!(display, "Usage: matrix-product <M> <N> <K>");
    }

    #[test]
    fn test_usage_error_keeps_message() {
        let error = usage_error("prog", "invalid value 'x' for '<K>'");
        match error {
            BenchError::Usage { program, message } => {
                assert_eq!(program, "prog");
                assert!(message.contains("<K>"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_thread_pool_error_display() {
        let error = thread_pool_error("global pool already initialized");
        let display = format!("{}", error);
        assert!(display.contains("Thread pool error"));
        assert!(display.contains("global pool already initialized"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = usage_error("matrix-product", "missing <K>");
        let error2 = usage_error("matrix-product", "missing <K>");
        let error3 = usage_error("matrix-product-naive", "missing <K>");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait() {
        let error = thread_pool_error("test");
        let _: &dyn std::error::Error = &error;
    }
}
