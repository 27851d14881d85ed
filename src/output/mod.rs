//! Output writers.
//!
//! This module handles:
//! - The versioned JSON document wrapping a trace
//! - Writing and reading documents on disk
//! - Plain-text rendering for terminals and logs

pub mod document;
pub mod json;
pub mod text;

// Re-export main functions
pub use document::{to_document, TraceDocument};
pub use json::{document_to_string, read_document, write_document};
pub use text::{format_frame, format_trace};
