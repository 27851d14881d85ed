//! Caller command: trace this process's own call stack.
//!
//! Mostly useful to check that caller mode works on a given build
//! (binaries built without line tables have no source locations to report).

use super::models::CallerArgs;
use super::parse::emit_document;
use crate::output::{to_document, TraceDocument};
use crate::parser::{StackTrace, StackTraceComputer};
use anyhow::{Context, Result};
use log::{debug, info, warn};

/// Execute the caller command
///
/// **Public** - main entry point called from main.rs
pub fn execute_caller(args: CallerArgs) -> Result<TraceDocument> {
    let computer = StackTraceComputer::new(args.config);

    let trace = computer
        .of_caller(args.depth)
        .context("Detector fault while computing caller trace")?
        .unwrap_or_else(|| {
            warn!("No symbolized frames: unsupported platform or binary without line tables");
            StackTrace::failed()
        });

    info!("Caller trace: mode {}, {} frame(s)", trace.mode, trace.frame_count());
    if let Some(top) = trace.top_frame() {
        debug!("Top frame: {}", top.display_location());
    }

    let document = to_document(trace, Some("caller".to_string()));
    emit_document(&document, args.output.as_deref(), args.print_summary)?;

    Ok(document)
}
