//! Parse command implementation.
//!
//! The parse command:
//! 1. Loads an exception (JSON object or raw stack text)
//! 2. Runs the detector chain
//! 3. Writes the resulting document

use super::models::ParseArgs;
use crate::output::{document_to_string, format_trace, to_document, write_document, TraceDocument};
use crate::parser::{RawException, StackTraceComputer};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;

/// Execute the parse command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The document that was written, for callers that want to inspect it
///
/// # Errors
/// * Unreadable or invalid input files
/// * Detector faults, when fault propagation is enabled
/// * File write errors
pub fn execute_parse(args: ParseArgs) -> Result<TraceDocument> {
    validate_args(&args)?;

    let (exception, source) = load_exception(&args)?;
    debug!(
        "Loaded exception from {} (name: {:?})",
        source, exception.name
    );

    let computer = StackTraceComputer::new(args.config);
    let trace = computer
        .compute(&exception, None)
        .context("Detector fault while computing stack trace")?;

    info!("Computed trace: mode {}, {} frame(s)", trace.mode, trace.frame_count());
    if let Some(top) = trace.top_frame() {
        debug!("Top frame: {}", top.display_location());
    }

    let document = to_document(trace, Some(source));
    emit_document(&document, args.output.as_deref(), args.print_summary)?;

    Ok(document)
}

/// Validate parse arguments
///
/// **Public** - can be called before execute_parse for early validation
pub fn validate_args(args: &ParseArgs) -> Result<()> {
    match (&args.input_json, &args.stack_file) {
        (None, None) => anyhow::bail!("Either --input or --stack-file is required"),
        (Some(_), Some(_)) => anyhow::bail!("--input and --stack-file cannot be used together"),
        _ => {}
    }

    if args.input_json.is_some() && (args.name.is_some() || args.message.is_some()) {
        anyhow::bail!("--name and --message only apply to --stack-file");
    }

    Ok(())
}

/// Load the exception described by `args`, with a label for its source
///
/// **Private** - internal helper for execute_parse
fn load_exception(args: &ParseArgs) -> Result<(RawException, String)> {
    if let Some(path) = &args.input_json {
        let exception = read_exception_json(path)?;
        if !exception.has_trace_text() {
            warn!(
                "{} has no stack or stacktrace text, only a multiline message can be parsed",
                path.display()
            );
        }
        return Ok((exception, path.display().to_string()));
    }

    let path = args
        .stack_file
        .as_ref()
        .context("No input file given")?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stack file {}", path.display()))?;

    let exception = RawException {
        name: args.name.clone(),
        message: args.message.clone(),
        stack: Some(text),
        stacktrace: None,
    };

    Ok((exception, path.display().to_string()))
}

/// Read an exception object from a JSON file
///
/// **Public** - used by tests and by library callers feeding crash reports
pub fn read_exception_json(path: &Path) -> Result<RawException> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read exception file {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid exception JSON in {}", path.display()))
}

/// Write the document to a file or stdout, plus the optional summary
///
/// **Public** - shared by the parse and caller commands
pub fn emit_document(
    document: &TraceDocument,
    output: Option<&Path>,
    print_summary: bool,
) -> Result<()> {
    match output {
        Some(path) => {
            write_document(document, path).context("Failed to write trace JSON")?;
            info!("✓ Trace written to: {}", path.display());
        }
        None => println!("{}", document_to_string(document)?),
    }

    if print_summary {
        println!("\n{}", "=".repeat(80));
        println!("STACK TRACE");
        println!("{}", "=".repeat(80));
        println!("{}", format_trace(&document.trace));
        println!("{}", "=".repeat(80));
    }

    Ok(())
}
