//! Trace Normalizer
//!
//! Normalizes the exception representations of different runtimes into
//! one canonical stack trace model.
//!
//! Three detectors each understand one shape of exception: the verbose
//! two-line `stacktrace` property, the one-frame-per-line `stack`
//! property (V8 and Gecko flavours), and backtraces embedded in the
//! message itself. A dispatcher tries them in a fixed order and always
//! returns a [`StackTrace`], falling back to `mode: failed`.
//!
//! ```
//! use trace_normalizer::{compute_stack_trace, RawException, TraceMode};
//!
//! let ex = RawException::new("TypeError", "x is not a function")
//!     .with_stack("TypeError: x is not a function\n    at run (http://example.com/app.js:10:5)");
//!
//! let trace = compute_stack_trace(&ex);
//! assert_eq!(trace.mode, TraceMode::Stack);
//! assert_eq!(trace.stack[0].func, "run");
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

pub use parser::{
    compute_caller_trace, compute_stack_trace, ExceptionSource, RawException, StackFrame,
    StackTrace, StackTraceComputer, TraceMode,
};
pub use utils::{ComputeConfig, TraceError};
