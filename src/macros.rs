//! Logging macros for ergonomic message formatting.
//!
//! These macros format the message like `format!` and forward it to a
//! [`Logger`](crate::Logger), optionally with a list of fields.
//!
//! # Examples
//!
//! ```
//! use rust_log_router::prelude::*;
//! use rust_log_router::info;
//! use std::sync::Arc;
//!
//! let client = Arc::new(MemoryClient::new());
//! let logger = Logger::new(Arc::new(PayloadSink::new(client.clone(), Severity::Debug)));
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With fields
//! info!(logger, fields = [Field::u16("port", port)], "Bound {}", "0.0.0.0");
//!
//! assert_eq!(client.len(), 3);
//! ```

/// Log a message at an explicit severity.
///
/// # Examples
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new(std::sync::Arc::new(NopSink));
/// use rust_log_router::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// log!(logger, Severity::Warn, fields = [Field::i64("code", 429)], "Throttled");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, fields = [$($field:expr),* $(,)?], $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), &[$($field),*])
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), &[])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new(std::sync::Arc::new(NopSink));
/// use rust_log_router::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_router::prelude::*;
/// # let logger = Logger::new(std::sync::Arc::new(NopSink));
/// use rust_log_router::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a fatal-level message. Does not exit the process.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Field, Logger, Severity};
    use crate::sinks::{MemoryClient, PayloadSink};
    use std::sync::Arc;

    fn logger() -> (Logger, Arc<MemoryClient>) {
        let client = Arc::new(MemoryClient::new());
        let sink = Arc::new(PayloadSink::new(client.clone(), Severity::Debug));
        (Logger::new(sink), client)
    }

    #[test]
    fn test_log_macro() {
        let (logger, client) = logger();
        log!(logger, Severity::Info, "Test message");
        log!(logger, Severity::Info, "Formatted: {}", 42);

        let docs = client.documents();
        assert_eq!(docs[1].get("@message").and_then(|v| v.as_str()), Some("Formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, client) = logger();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warn!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");
        assert_eq!(client.len(), 5);
    }

    #[test]
    fn test_fields_form() {
        let (logger, client) = logger();
        info!(logger, fields = [Field::string("user", "alice"), Field::bool("admin", false)], "Login {}", "ok");

        let doc = &client.documents()[0];
        assert_eq!(doc.get("user").and_then(|v| v.as_str()), Some("alice"));
        assert_eq!(doc.get("admin").and_then(|v| v.as_bool()), Some(false));
        assert_eq!(doc.get("@message").and_then(|v| v.as_str()), Some("Login ok"));
    }
}
