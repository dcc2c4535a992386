//! Tracing/logging setup shared by the service binaries.

pub mod tracing;

pub use crate::tracing::{LogFormat, ParseLogFormatError, init};
