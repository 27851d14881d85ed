use crate::output::{read_document, TraceDocument};
use crate::utils::config::{DEBUG_ENV_VAR, SCHEMA_VERSION};
use anyhow::Result;
use std::path::Path;

/// Validate a trace document file
pub fn validate_document_file(file_path: &Path) -> Result<()> {
    println!("Validating trace document: {}", file_path.display());

    let document = read_document(file_path)?;
    let trace = &document.trace;

    if !trace.is_failed() && trace.stack.is_empty() {
        anyhow::bail!("Trace with mode '{}' has no frames", trace.mode);
    }

    println!("✓ Valid trace JSON");
    for line in describe_document(&document) {
        println!("  {}", line);
    }

    Ok(())
}

/// Key facts about a document, one per line
pub fn describe_document(document: &TraceDocument) -> Vec<String> {
    let trace = &document.trace;
    let mut lines = vec![
        format!("Version: {}", document.version),
        format!("Generated: {}", document.generated_at),
        format!("Mode: {}", trace.mode),
        format!("Name: {}", trace.name.as_deref().unwrap_or("-")),
        format!("Frames: {}", trace.frame_count()),
    ];

    if let Some(top) = trace.top_frame() {
        lines.push(format!("Top frame: {}", top.display_location()));
    }

    lines
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Trace Normalizer Document Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  source: string?          - Input file, or 'caller'");
        println!("  trace: object");
        println!("    mode: string           - stack | stacktrace | multiline | callers | onerror | failed");
        println!("    name: string?          - Exception name (absent when failed)");
        println!("    message: string?       - Exception message (absent when failed)");
        println!("    stack: array?          - Frames, most recent first");
        println!("      url: string?         - Script file or URL");
        println!("      func: string         - Function name, empty if anonymous");
        println!("      args: string[]?      - Argument names, if known");
        println!("      line: number?        - 1-based line");
        println!("      column: number?      - 1-based column");
        println!("      context: string[]?   - Source lines around the call site");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Trace Normalizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Document Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Normalizes runtime exception stack traces into structured frames.");
    println!("Set {}=1 to surface detector faults.", DEBUG_ENV_VAR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{to_document, write_document};
    use crate::parser::{StackFrame, StackTrace, TraceMode};

    #[test]
    fn test_validate_document_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("trace.json");
        let trace = StackTrace::from_frames(
            TraceMode::Stack,
            Some("Error".to_string()),
            Some("x".to_string()),
            vec![StackFrame::new("f", "http://a/b.js", 1)],
        )
        .unwrap();
        write_document(&to_document(trace, None), &path).unwrap();

        assert!(validate_document_file(&path).is_ok());
    }

    #[test]
    fn test_describe_document_reports_top_frame() {
        let trace = StackTrace::from_frames(
            TraceMode::Stack,
            Some("Error".to_string()),
            None,
            vec![
                StackFrame::new("f", "http://a/b.js", 3).with_column(Some(14)),
                StackFrame::new("g", "http://a/c.js", 9),
            ],
        )
        .unwrap();
        let lines = describe_document(&to_document(trace, None));

        assert!(lines.contains(&"Frames: 2".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Top frame: http://a/b.js:3:14"));
    }

    #[test]
    fn test_describe_failed_document_has_no_top_frame() {
        let lines = describe_document(&to_document(StackTrace::failed(), None));
        assert!(lines.contains(&"Mode: failed".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Top frame")));
    }

    #[test]
    fn test_validate_rejects_frameless_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("trace.json");
        std::fs::write(
            &path,
            r#"{"version":"1.0.0","generated_at":"2024-01-01T00:00:00Z","trace":{"mode":"stack"}}"#,
        )
        .unwrap();

        assert!(validate_document_file(&path).is_err());
    }
}
