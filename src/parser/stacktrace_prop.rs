//! Detector for the verbose `stacktrace` property.
//!
//! Each frame spans two lines: an info line, then the source line that
//! was executing.
//!
//! ```text
//! Error thrown at line 42, column 12 in <anonymous function: createException>() in http://site.com/js/test.js:
//!     this.undef();
//! called from line 27, column 8 in printStackTrace(options) in http://site.com/js/test.js:
//!     var ex = createException();
//! ```

use super::exception::ExceptionSource;
use super::schema::{parse_column, parse_position, split_args, StackFrame, StackTrace, TraceMode};
use crate::utils::error::TraceError;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Matches an info line. Not anchored at the start, the prefix varies.
/// Captures: 1=line, 2=column, 3=anonymous function name, 4=function name,
/// 5=args, 6=url
pub static INFO_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i) line (\d+), column (\d+) in (?:<anonymous function: ([^>]+)>|([^\)]+))\((.*)\) in (.*):\s*$",
    )
    .expect("Invalid INFO_LINE_REGEX")
});

/// Extract a trace from the `stacktrace` property
///
/// **Public** - detector entry used by the dispatcher
///
/// The property is read before anything else on the exception, since some
/// runtimes clear it once `stack` has been touched.
///
/// # Returns
/// * `Ok(Some(trace))` with `mode = stacktrace` when at least one frame parsed
/// * `Ok(None)` when the property is absent or no info line matched
pub fn from_stacktrace_property(
    ex: &dyn ExceptionSource,
) -> Result<Option<StackTrace>, TraceError> {
    let Some(text) = ex.stacktrace()? else {
        return Ok(None);
    };

    let frames = parse_stacktrace_text(&text);
    debug!("stacktrace property: {} frame(s) parsed", frames.len());

    if frames.is_empty() {
        return Ok(None);
    }

    Ok(StackTrace::from_frames(
        TraceMode::Stacktrace,
        ex.name()?,
        ex.message()?,
        frames,
    ))
}

/// Parse info/context line pairs
///
/// Iteration always advances two lines. An info line that does not match
/// does not give its partner back, so one unexpected line shifts every
/// following pair.
pub fn parse_stacktrace_text(text: &str) -> Vec<StackFrame> {
    let lines: Vec<&str> = text.split('\n').collect();

    (0..lines.len())
        .step_by(2)
        .filter_map(|i| {
            let frame = parse_info_line(lines[i])?;
            let context = lines.get(i + 1).map(|next| vec![next.to_string()]);
            Some(frame.with_context(context))
        })
        .collect()
}

/// Parse a single info line (without its context)
pub fn parse_info_line(line: &str) -> Option<StackFrame> {
    let caps = INFO_LINE_REGEX.captures(line)?;

    let line_number = parse_position(&caps[1])?;
    let column = parse_column(&caps[2])?;
    let func = caps.get(3).or_else(|| caps.get(4))?.as_str();
    let args = caps.get(5).map(|m| split_args(m.as_str())).unwrap_or_default();

    Some(
        StackFrame::new(func, &caps[6], line_number)
            .with_column(column)
            .with_args(Some(args)),
    )
}
