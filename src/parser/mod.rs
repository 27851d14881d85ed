//! Stack trace extraction.
//!
//! This module handles:
//! - The exception input contract and its plain-data implementation
//! - The three format detectors (`stacktrace`, `stack`, multiline message)
//! - Dispatching between them, and caller mode
//! - The canonical output schema

pub mod caller;
pub mod dispatcher;
pub mod exception;
pub mod multiline;
pub mod schema;
pub mod stack_prop;
pub mod stacktrace_prop;

// Re-export main types
pub use caller::compute_caller_trace;
pub use dispatcher::{compute_stack_trace, Detector, StackTraceComputer, DETECTORS};
pub use exception::{ExceptionSource, RawException};
pub use schema::{StackFrame, StackTrace, TraceMode};
