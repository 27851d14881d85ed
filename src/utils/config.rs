//! Configuration and constants for the library and CLI.

/// Current output document schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Environment variable that turns on fault propagation in the dispatcher
pub const DEBUG_ENV_VAR: &str = "TRACE_NORMALIZER_DEBUG";

// A multiline backtrace needs the restated message, a header and at least
// one info/context pair.
pub const MIN_MULTILINE_LINES: usize = 4;
pub const MULTILINE_FIRST_FRAME_LINE: usize = 2;

/// URL scheme prepended to paths of natively captured frames
pub const NATIVE_FRAME_SCHEME: &str = "file://";

/// Exception name given to a natively captured call stack
pub const CALLER_EXCEPTION_NAME: &str = "CallerTrace";

/// Settings for a [`StackTraceComputer`](crate::parser::StackTraceComputer)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputeConfig {
    /// Return detector faults to the caller instead of swallowing them.
    /// Only useful while developing a detector.
    pub propagate_faults: bool,
}

impl ComputeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_propagate_faults(mut self, propagate_faults: bool) -> Self {
        self.propagate_faults = propagate_faults;
        self
    }
}
