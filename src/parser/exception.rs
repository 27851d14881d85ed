//! Exception input contract.
//!
//! Runtimes disagree on which properties an exception carries, so every
//! accessor is optional and may itself fail.

use crate::utils::error::TraceError;
use serde::{Deserialize, Serialize};

/// An exception-like value the detectors can inspect
///
/// Every accessor defaults to "absent", so implementors only override
/// the properties their runtime exposes. An `Err` means reading the
/// property faulted, which is different from the property being missing.
pub trait ExceptionSource {
    /// Exception class name, e.g. `TypeError`
    fn name(&self) -> Result<Option<String>, TraceError> {
        Ok(None)
    }

    /// Human-readable message
    fn message(&self) -> Result<Option<String>, TraceError> {
        Ok(None)
    }

    /// One-frame-per-line stack text (V8 and Gecko engines)
    fn stack(&self) -> Result<Option<String>, TraceError> {
        Ok(None)
    }

    /// Two-line-per-frame stack text (engines exposing `stacktrace`)
    ///
    /// On some runtimes reading `stack` first clears this one.
    fn stacktrace(&self) -> Result<Option<String>, TraceError> {
        Ok(None)
    }
}

/// Plain-data exception, typically deserialized from a crash report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawException {
    #[serde(default, alias = "type", alias = "errorName")]
    pub name: Option<String>,

    #[serde(default, alias = "msg", alias = "description")]
    pub message: Option<String>,

    #[serde(default)]
    pub stack: Option<String>,

    #[serde(default, alias = "stackTrace", alias = "stack_trace")]
    pub stacktrace: Option<String>,
}

impl RawException {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: impl Into<String>) -> Self {
        self.stacktrace = Some(stacktrace.into());
        self
    }

    pub fn has_trace_text(&self) -> bool {
        self.stack.is_some() || self.stacktrace.is_some()
    }
}

impl ExceptionSource for RawException {
    fn name(&self) -> Result<Option<String>, TraceError> {
        Ok(self.name.clone())
    }

    fn message(&self) -> Result<Option<String>, TraceError> {
        Ok(self.message.clone())
    }

    fn stack(&self) -> Result<Option<String>, TraceError> {
        Ok(self.stack.clone())
    }

    fn stacktrace(&self) -> Result<Option<String>, TraceError> {
        Ok(self.stacktrace.clone())
    }
}
