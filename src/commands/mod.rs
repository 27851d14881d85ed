//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod caller;
pub mod models;
pub mod parse;
pub mod utils;

// Re-export main command functions
pub use caller::execute_caller;
pub use models::{CallerArgs, ParseArgs};
pub use parse::{execute_parse, validate_args};
pub use utils::{describe_document, display_schema, display_version, validate_document_file};
