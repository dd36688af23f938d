//! Severity definitions

use super::error::{Result, RouterError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Log importance, in declared order from `None` to `Debug`.
///
/// `None` is the "disabled" sentinel. The default value is `Info`, which is
/// also what the empty string parses to, so an unconfigured level is useful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    None = 0,
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Debug = 5,
}

impl Severity {
    /// Every defined severity in declared order
    pub const ALL: [Severity; 6] = [
        Severity::None,
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    /// Levels an event can carry, from the most verbose to the most important
    pub(crate) const PROBE_ORDER: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Lowercase canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Uppercase variant of the canonical name
    pub fn capital_str(&self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Name for an arbitrary integer; values outside the enumeration render
    /// as `Level(<n>)`.
    pub fn name_of(raw: i32) -> Cow<'static, str> {
        match Severity::try_from(raw) {
            Ok(level) => Cow::Borrowed(level.as_str()),
            Err(_) => Cow::Owned(format!("Level({})", raw)),
        }
    }

    /// Threshold check: true iff this severity is numerically at or above
    /// `threshold` in declared order.
    #[inline]
    pub fn enabled(self, threshold: Severity) -> bool {
        self as u8 >= threshold as u8
    }

    /// Sink admission: whether a sink whose minimum severity is `self`
    /// accepts an event at `event`.
    ///
    /// Levels closer to `Fatal` are more important, so a minimum of `Debug`
    /// admits every event and a minimum of `None` admits nothing. Events at
    /// `None` are never admitted.
    #[inline]
    pub fn admits(self, event: Severity) -> bool {
        event != Severity::None && event as u8 <= self as u8
    }

    /// Parse `text` into the referenced slot.
    ///
    /// Fails with `InvalidState` when there is no slot to write to: an unset
    /// threshold is a configuration bug, not an empty value.
    pub fn set_from_text(slot: Option<&mut Severity>, text: &str) -> Result<()> {
        let slot = slot
            .ok_or_else(|| RouterError::invalid_state("cannot unmarshal into an unset severity"))?;
        *slot = text.parse()?;
        Ok(())
    }

    fn from_canonical(text: &str) -> Option<Self> {
        match text {
            "debug" | "DEBUG" => Some(Severity::Debug),
            "info" | "INFO" | "" => Some(Severity::Info),
            "warn" | "WARN" => Some(Severity::Warn),
            "error" | "ERROR" => Some(Severity::Error),
            "fatal" | "FATAL" => Some(Severity::Fatal),
            "none" | "NONE" => Some(Severity::None),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        Severity::from_canonical(s)
            .or_else(|| Severity::from_canonical(&s.to_ascii_lowercase()))
            .ok_or_else(|| RouterError::parse(s))
    }
}

impl TryFrom<i32> for Severity {
    type Error = RouterError;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Severity::None),
            1 => Ok(Severity::Fatal),
            2 => Ok(Severity::Error),
            3 => Ok(Severity::Warn),
            4 => Ok(Severity::Info),
            5 => Ok(Severity::Debug),
            _ => Err(RouterError::UnknownLevel(raw)),
        }
    }
}

impl From<Severity> for i32 {
    fn from(level: Severity) -> Self {
        level as i32
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = Cow::<'de, str>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
