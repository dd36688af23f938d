//! Error types for the log router

use std::fmt;

pub type Result<T> = std::result::Result<T, RouterError>;

/// Boxed error returned by backend clients
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Context attached to backend flush failures
pub const FLUSH_FAILED_CONTEXT: &str = "failed to flush log messages";

/// Context attached to backend log failures
pub const LOG_FAILED_CONTEXT: &str = "failed to log message";

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Severity text that matches none of the canonical names
    #[error("unrecognized level: {text:?}")]
    Parse { text: String },

    /// Integer that is not one of the defined severities
    #[error("unknown level: Level({0})")]
    UnknownLevel(i32),

    /// Operation invoked through an unset severity reference
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Failure reported by a backend client
    #[error("{context}: {source}")]
    Backend {
        context: String,
        #[source]
        source: BoxError,
    },

    /// Failures collected from several sinks
    #[error("{}", MultipleDisplay(.0))]
    Multiple(Vec<RouterError>),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

struct MultipleDisplay<'a>(&'a [RouterError]);

impl fmt::Display for MultipleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sinks failed", self.0.len())?;
        for (idx, err) in self.0.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, err)?;
        }
        Ok(())
    }
}

impl RouterError {
    /// Create a parse error carrying the offending text verbatim
    pub fn parse(text: impl Into<String>) -> Self {
        RouterError::Parse { text: text.into() }
    }

    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        RouterError::InvalidState(message.into())
    }

    /// Wrap a backend client failure with context
    pub fn backend(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        RouterError::Backend {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        RouterError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Collapse a list of failures: `Ok` when empty, the error itself when
    /// there is exactly one, `Multiple` otherwise.
    pub fn combine(mut errors: Vec<RouterError>) -> Result<()> {
        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(RouterError::Multiple(errors)),
        }
    }
}
