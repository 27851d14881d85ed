//! Detector for backtraces embedded in the exception message.
//!
//! ```text
//! Statement on line 3: Undefined variable: undefinedFunc
//! Backtrace:
//!   Line 3 of linked script file://localhost/app/sample.js: In function zzz
//!         undefinedFunc(a);
//!   Line 7 of inline#1 script in file://localhost/app/sample.html: In function yyy
//!           zzz(x, y, z);
//!   Line 1 of function script
//!     try { xxx('hi'); return false; } catch(ex) { report(ex); }
//! ```
//!
//! Only "linked script" entries become frames. Inline-script and
//! function-script entries are recognized but unsupported: they are
//! skipped, which drops those frames from the result.

use super::exception::ExceptionSource;
use super::schema::{parse_position, StackFrame, StackTrace, TraceMode};
use crate::utils::config::{MIN_MULTILINE_LINES, MULTILINE_FIRST_FRAME_LINE};
use crate::utils::error::TraceError;
use log::{debug, trace};
use regex::Regex;
use std::sync::LazyLock;

/// Captures: 1=line, 2=url, 3=function
pub static LINKED_SCRIPT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*Line (\d+) of linked script ((?:file|http|https)\S+)(?:: in function (\S+))?\s*$",
    )
    .expect("Invalid LINKED_SCRIPT_REGEX")
});

/// Unsupported sub-format. Captures: 1=line, 2=script index, 3=url, 4=function
pub static INLINE_SCRIPT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*Line (\d+) of inline#(\d+) script in ((?:file|http|https)\S+)(?:: in function (\S+))?\s*$",
    )
    .expect("Invalid INLINE_SCRIPT_REGEX")
});

/// Unsupported sub-format. Captures: 1=line
pub static FUNCTION_SCRIPT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*Line (\d+) of function script\s*$").expect("Invalid FUNCTION_SCRIPT_REGEX")
});

/// Shape of one backtrace entry line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    LinkedScript,
    /// Unsupported, never produces a frame
    InlineScript,
    /// Unsupported, never produces a frame
    FunctionScript,
    Unrecognized,
}

/// Classify a backtrace entry line
pub fn classify_entry(line: &str) -> EntryKind {
    if LINKED_SCRIPT_REGEX.is_match(line) {
        EntryKind::LinkedScript
    } else if INLINE_SCRIPT_REGEX.is_match(line) {
        EntryKind::InlineScript
    } else if FUNCTION_SCRIPT_REGEX.is_match(line) {
        EntryKind::FunctionScript
    } else {
        EntryKind::Unrecognized
    }
}

/// Extract a trace from a multi-line exception message
///
/// **Public** - detector entry used by the dispatcher
///
/// # Returns
/// * `Ok(Some(trace))` with `mode = multiline`; `message` is the first
///   message line
/// * `Ok(None)` when the message is absent, shorter than four lines, or
///   holds no linked-script entry
pub fn from_multiline_message(ex: &dyn ExceptionSource) -> Result<Option<StackTrace>, TraceError> {
    let Some(message) = ex.message()? else {
        return Ok(None);
    };

    let lines: Vec<&str> = message.split('\n').collect();
    if lines.len() < MIN_MULTILINE_LINES {
        return Ok(None);
    }

    let frames = parse_backtrace_lines(&lines);
    debug!("multiline message: {} frame(s) parsed", frames.len());

    if frames.is_empty() {
        return Ok(None);
    }

    Ok(StackTrace::from_frames(
        TraceMode::Multiline,
        ex.name()?,
        Some(lines[0].to_string()),
        frames,
    ))
}

/// Walk entry/context pairs starting after the `Backtrace:` header
pub fn parse_backtrace_lines(lines: &[&str]) -> Vec<StackFrame> {
    let mut frames = Vec::new();

    for i in (MULTILINE_FIRST_FRAME_LINE..lines.len()).step_by(2) {
        let entry = lines[i];

        let Some(frame) = parse_linked_script(entry) else {
            match classify_entry(entry) {
                EntryKind::InlineScript | EntryKind::FunctionScript => {
                    trace!("skipping unsupported backtrace sub-format: {}", entry.trim());
                }
                _ => {}
            }
            continue;
        };

        let context = lines.get(i + 1).map(|next| vec![next.to_string()]);
        frames.push(frame.with_context(context));
    }

    frames
}

fn parse_linked_script(line: &str) -> Option<StackFrame> {
    let caps = LINKED_SCRIPT_REGEX.captures(line)?;

    let line_number = parse_position(&caps[1])?;
    let func = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

    Some(StackFrame::new(func, &caps[2], line_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::exception::RawException;
    use pretty_assertions::assert_eq;

    const MESSAGE: &str = "Statement on line 3: Undefined variable: undefinedFunc\nBacktrace:\n  Line 3 of linked script file://localhost/app/sample.js: In function zzz\n        undefinedFunc(a);\n  Line 7 of inline#1 script in file://localhost/app/sample.html: In function yyy\n          zzz(x, y, z);\n  Line 1 of function script\n    try { xxx('hi'); return false; } catch(ex) { report(ex); }\n  Line 9 of linked script http://example.com/lib.js\n    run();";

    #[test]
    fn test_classify_entries() {
        assert_eq!(
            classify_entry("  Line 3 of linked script file://a/b.js: In function zzz"),
            EntryKind::LinkedScript
        );
        assert_eq!(
            classify_entry("  Line 7 of inline#1 script in file://a/b.html: In function yyy"),
            EntryKind::InlineScript
        );
        assert_eq!(classify_entry("  Line 1 of function script"), EntryKind::FunctionScript);
        assert_eq!(classify_entry("Backtrace:"), EntryKind::Unrecognized);
    }

    #[test]
    fn test_only_linked_scripts_produce_frames() {
        let ex = RawException::new("ReferenceError", MESSAGE);
        let trace = from_multiline_message(&ex).unwrap().unwrap();

        assert_eq!(trace.mode, TraceMode::Multiline);
        assert_eq!(trace.name.as_deref(), Some("ReferenceError"));
        assert_eq!(
            trace.message.as_deref(),
            Some("Statement on line 3: Undefined variable: undefinedFunc")
        );
        assert_eq!(trace.frame_count(), 2);

        let first = &trace.stack[0];
        assert_eq!(first.func, "zzz");
        assert_eq!(first.line, Some(3));
        assert_eq!(first.url.as_deref(), Some("file://localhost/app/sample.js"));
        assert_eq!(first.context, Some(vec!["        undefinedFunc(a);".to_string()]));
        assert_eq!(first.column, None);
        assert_eq!(first.args, None);

        let second = &trace.stack[1];
        assert_eq!(second.func, "");
        assert_eq!(second.line, Some(9));
        assert_eq!(second.context, Some(vec!["    run();".to_string()]));
    }

    #[test]
    fn test_too_few_lines() {
        let ex = RawException::new(
            "Error",
            "msg\nBacktrace:\n  Line 3 of linked script file://a/b.js",
        );
        assert_eq!(from_multiline_message(&ex), Ok(None));
    }

    #[test]
    fn test_no_linked_script_entries() {
        let ex = RawException::new("Error", "one\ntwo\nthree\nfour\nfive");
        assert_eq!(from_multiline_message(&ex), Ok(None));
    }
}
