//! Dynamically adjustable severity threshold

use super::error::Result;
use super::severity::Severity;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Anything that can decide whether a severity is enabled
pub trait LevelEnabler: Send + Sync {
    fn enabled(&self, severity: Severity) -> bool;
}

impl<F> LevelEnabler for F
where
    F: Fn(Severity) -> bool + Send + Sync,
{
    fn enabled(&self, severity: Severity) -> bool {
        self(severity)
    }
}

/// An atomically changeable severity threshold.
///
/// Clones share the same cell, so a configuration-reload thread and any
/// number of logging threads can hold their own handle and observe each
/// other's stores without further locking.
///
/// # Example
///
/// ```
/// use rust_log_router::{Severity, SeverityGate};
///
/// let gate = SeverityGate::new();
/// assert_eq!(gate.load(), Severity::Info);
///
/// let reloader = gate.clone();
/// reloader.store(Severity::Warn);
/// assert!(gate.enabled(Severity::Debug));
/// assert!(!gate.enabled(Severity::Error));
/// ```
#[derive(Debug, Clone)]
pub struct SeverityGate {
    level: Arc<AtomicU8>,
}

impl SeverityGate {
    /// Create a gate at `Info`
    pub fn new() -> Self {
        Self::at(Severity::Info)
    }

    /// Create a gate at `level`
    pub fn at(level: Severity) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(level as u8)),
        }
    }

    /// Current threshold
    #[inline]
    pub fn load(&self) -> Severity {
        // Only `store` writes the cell, and it only writes defined values.
        Severity::try_from(i32::from(self.level.load(Ordering::SeqCst))).unwrap_or_default()
    }

    /// Replace the threshold
    #[inline]
    pub fn store(&self, level: Severity) {
        self.level.store(level as u8, Ordering::SeqCst);
    }

    /// Equivalent to `severity.enabled(self.load())`
    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        severity.enabled(self.load())
    }

    /// Parse `text` and store it; the current threshold is left untouched on
    /// failure.
    pub fn set_from_text(&self, text: &str) -> Result<()> {
        let level: Severity = text.parse()?;
        self.store(level);
        Ok(())
    }
}

impl Default for SeverityGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelEnabler for SeverityGate {
    fn enabled(&self, severity: Severity) -> bool {
        SeverityGate::enabled(self, severity)
    }
}

impl fmt::Display for SeverityGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.load(), f)
    }
}

impl FromStr for SeverityGate {
    type Err = super::error::RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::at(s.parse()?))
    }
}

impl Serialize for SeverityGate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.load().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SeverityGate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Severity::deserialize(deserializer).map(Self::at)
    }
}
