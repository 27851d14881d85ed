//! Output document wrapping a computed trace.
//!
//! The document is versioned so readers can detect incompatible files.

use crate::parser::schema::StackTrace;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the trace was computed (RFC 3339)
    pub generated_at: String,

    /// Where the exception came from (input file, `caller`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub trace: StackTrace,
}

/// Wrap a trace in a document stamped with the current time
///
/// **Public** - used by commands to create final output
pub fn to_document(trace: StackTrace, source: Option<String>) -> TraceDocument {
    TraceDocument {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        source,
        trace,
    }
}
