use crate::utils::config::ComputeConfig;
use std::path::PathBuf;

/// Arguments for the parse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct ParseArgs {
    /// JSON file holding the exception object
    pub input_json: Option<PathBuf>,

    /// Raw text file used as the `stack` property
    pub stack_file: Option<PathBuf>,

    /// Exception name when reading raw stack text
    pub name: Option<String>,

    /// Exception message when reading raw stack text
    pub message: Option<String>,

    /// Output path for the JSON document (stdout when absent)
    pub output: Option<PathBuf>,

    /// Print a text listing of the frames
    pub print_summary: bool,

    /// Dispatcher configuration
    pub config: ComputeConfig,
}

/// Arguments for the caller command
#[derive(Debug, Clone, Default)]
pub struct CallerArgs {
    /// Frames to skip (bookkeeping only)
    pub depth: Option<usize>,

    /// Output path for the JSON document (stdout when absent)
    pub output: Option<PathBuf>,

    /// Print a text listing of the frames
    pub print_summary: bool,

    /// Dispatcher configuration
    pub config: ComputeConfig,
}
