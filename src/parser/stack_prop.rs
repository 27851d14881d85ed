//! Detector for the one-frame-per-line `stack` property.
//!
//! Two line shapes are recognized:
//!
//! ```text
//!     at handleClick (http://example.com/app.js:42:17)      V8 family
//! handleClick(event,target)@http://example.com/app.js:42:17  Gecko family
//! ```
//!
//! Anything else (the leading `TypeError: ...` header, native frames,
//! blank separators) is skipped.

use super::exception::ExceptionSource;
use super::schema::{parse_column, parse_position, split_args, StackFrame, StackTrace, TraceMode};
use crate::utils::error::TraceError;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Matches V8 frames: `at func (url:line[:column])`
/// Captures: 1=function, 2=url, 3=line, 4=column
pub static V8_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*at (\S+) \(((?:file|http|https):.*?):(\d+)(?::(\d+))?\)\s*$")
        .expect("Invalid V8_FRAME_REGEX")
});

/// Matches Gecko frames: `func[(args)]@url:line[:column]`
/// Captures: 1=function, 2=args, 3=url, 4=line, 5=column
pub static GECKO_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([^\s(@]*)(?:\((.*?)\))?@((?:file|http|https).*?):(\d+)(?::(\d+))?\s*$")
        .expect("Invalid GECKO_FRAME_REGEX")
});

/// Extract a trace from the `stack` property
///
/// **Public** - detector entry used by the dispatcher
///
/// # Returns
/// * `Ok(Some(trace))` with `mode = stack` when at least one line parsed
/// * `Ok(None)` when the property is absent or no line parsed
///
/// # Errors
/// Propagates faults raised while reading exception properties
pub fn from_stack_property(ex: &dyn ExceptionSource) -> Result<Option<StackTrace>, TraceError> {
    let Some(text) = ex.stack()? else {
        return Ok(None);
    };

    let frames = parse_stack_text(&text);
    debug!("stack property: {} frame(s) parsed", frames.len());

    if frames.is_empty() {
        return Ok(None);
    }

    Ok(StackTrace::from_frames(
        TraceMode::Stack,
        ex.name()?,
        ex.message()?,
        frames,
    ))
}

/// Parse every recognizable line of a stack text, in order
pub fn parse_stack_text(text: &str) -> Vec<StackFrame> {
    text.split('\n').filter_map(parse_stack_line).collect()
}

/// Parse one line with the V8 grammar, then the Gecko grammar
pub fn parse_stack_line(line: &str) -> Option<StackFrame> {
    parse_v8_line(line).or_else(|| parse_gecko_line(line))
}

fn parse_v8_line(line: &str) -> Option<StackFrame> {
    let caps = V8_FRAME_REGEX.captures(line)?;

    let line_number = parse_position(&caps[3])?;
    let column = match caps.get(4) {
        Some(m) => parse_column(m.as_str())?,
        None => None,
    };

    // V8 never exposes argument names
    Some(StackFrame::new(&caps[1], &caps[2], line_number).with_column(column))
}

fn parse_gecko_line(line: &str) -> Option<StackFrame> {
    let caps = GECKO_FRAME_REGEX.captures(line)?;

    let line_number = parse_position(&caps[4])?;
    let column = match caps.get(5) {
        Some(m) => parse_column(m.as_str())?,
        None => None,
    };
    let args = caps.get(2).map(|m| split_args(m.as_str())).unwrap_or_default();

    Some(
        StackFrame::new(&caps[1], &caps[3], line_number)
            .with_column(column)
            .with_args(Some(args)),
    )
}
