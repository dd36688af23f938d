//! Sink implementations

pub mod memory;
pub mod nop;
pub mod payload;
pub mod tee;

pub use memory::MemoryClient;
pub use nop::NopSink;
pub use payload::{field_value, format_duration, merge_fields, BackendClient, PayloadSink};
pub use tee::Tee;

pub use crate::core::Sink;
