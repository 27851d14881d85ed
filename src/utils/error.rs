//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Faults raised while a detector inspects an exception
///
/// These are distinct from "detector not applicable", which is signalled
/// with `Ok(None)`. The dispatcher swallows these unless it was built
/// with fault propagation enabled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    #[error("Failed to read exception property '{property}': {reason}")]
    PropertyAccess {
        property: &'static str,
        reason: String,
    },
}

impl TraceError {
    /// Shorthand for a property access fault
    pub fn property(property: &'static str, reason: impl Into<String>) -> Self {
        Self::PropertyAccess {
            property,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during file input/output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
