//! Detector chain.
//!
//! Tries each detector in a fixed order and returns the first trace one of
//! them produces, or a `failed` trace when none applies.

use super::exception::ExceptionSource;
use super::multiline::from_multiline_message;
use super::schema::StackTrace;
use super::stack_prop::from_stack_property;
use super::stacktrace_prop::from_stacktrace_property;
use crate::utils::config::ComputeConfig;
use crate::utils::error::TraceError;
use log::{debug, warn};

/// A detector: `Ok(None)` means "not applicable", `Err` is a fault
pub type Detector = fn(&dyn ExceptionSource) -> Result<Option<StackTrace>, TraceError>;

/// Detectors in priority order.
///
/// `stacktrace` must stay ahead of `stack`: some runtimes destroy the
/// `stacktrace` property as soon as `stack` is read.
pub const DETECTORS: [(&str, Detector); 3] = [
    ("stacktrace", from_stacktrace_property),
    ("stack", from_stack_property),
    ("multiline", from_multiline_message),
];

/// Computes stack traces from exceptions
///
/// Holds no state besides its configuration; one instance can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackTraceComputer {
    config: ComputeConfig,
}

impl StackTraceComputer {
    pub fn new(config: ComputeConfig) -> Self {
        Self { config }
    }

    /// Compute the stack trace of `ex`
    ///
    /// **Public** - main entry point
    ///
    /// # Arguments
    /// * `ex` - Exception to inspect
    /// * `depth` - Accepted so this shares a signature with
    ///   [`of_caller`](Self::of_caller); not used
    ///
    /// # Returns
    /// The first detector result, or [`StackTrace::failed`]
    ///
    /// # Errors
    /// Only when `propagate_faults` is set: the first detector fault
    pub fn compute(
        &self,
        ex: &dyn ExceptionSource,
        depth: Option<usize>,
    ) -> Result<StackTrace, TraceError> {
        debug!("Computing stack trace (depth hint: {:?})", depth);
        self.run_detectors(ex, &DETECTORS)
    }

    /// Run `detectors` in order, short-circuiting on the first trace
    pub(crate) fn run_detectors(
        &self,
        ex: &dyn ExceptionSource,
        detectors: &[(&str, Detector)],
    ) -> Result<StackTrace, TraceError> {
        for (label, detector) in detectors {
            match detector(ex) {
                Ok(Some(trace)) => {
                    debug!("Detector '{}' produced {} frame(s)", label, trace.frame_count());
                    return Ok(trace);
                }
                Ok(None) => {
                    debug!("Detector '{}' not applicable", label);
                }
                Err(e) if self.config.propagate_faults => {
                    return Err(e);
                }
                Err(e) => {
                    warn!("Detector '{}' faulted, skipping: {}", label, e);
                }
            }
        }

        debug!("No detector applied, returning failed trace");
        Ok(StackTrace::failed())
    }
}

/// Compute the stack trace of `ex` with the default configuration
///
/// Never fails: faults are swallowed and the worst case is a `failed` trace.
pub fn compute_stack_trace(ex: &dyn ExceptionSource) -> StackTrace {
    let computer = StackTraceComputer::default();
    match computer.compute(ex, None) {
        Ok(trace) => trace,
        Err(e) => {
            warn!("Unexpected fault with propagation disabled: {}", e);
            StackTrace::failed()
        }
    }
}
