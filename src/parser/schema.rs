//! Canonical stack trace model.
//!
//! Every detector produces these types. Absent values are `None` and are
//! omitted from the JSON form, never written as empty strings or zeros.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which strategy produced a [`StackTrace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    /// Parsed from the one-frame-per-line `stack` property
    Stack,

    /// Parsed from the two-line-per-frame `stacktrace` property
    Stacktrace,

    /// Parsed from a backtrace embedded in the exception message
    Multiline,

    /// Reserved for collaborators that walk caller chains themselves
    Callers,

    /// Reserved for collaborators that capture window error events
    Onerror,

    /// No detector could extract anything
    Failed,
}

impl TraceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceMode::Stack => "stack",
            TraceMode::Stacktrace => "stacktrace",
            TraceMode::Multiline => "multiline",
            TraceMode::Callers => "callers",
            TraceMode::Onerror => "onerror",
            TraceMode::Failed => "failed",
        }
    }
}

impl fmt::Display for TraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// File path or URL of the script
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Function name, empty when anonymous or unknown
    #[serde(default)]
    pub func: String,

    /// Argument names, if the format exposes them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// 1-based line number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// 1-based column number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// Source lines around the call site; the middle one is `line`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<String>>,
}

impl StackFrame {
    pub fn new(func: impl Into<String>, url: impl Into<String>, line: u32) -> Self {
        Self {
            url: Some(url.into()),
            func: func.into(),
            line: Some(line),
            ..Default::default()
        }
    }

    pub fn with_column(mut self, column: Option<u32>) -> Self {
        self.column = column;
        self
    }

    pub fn with_args(mut self, args: Option<Vec<String>>) -> Self {
        self.args = args;
        self
    }

    pub fn with_context(mut self, context: Option<Vec<String>>) -> Self {
        self.context = context;
        self
    }

    /// `url:line[:column]`, with `?` standing in for unknown parts
    pub fn display_location(&self) -> String {
        let url = self.url.as_deref().unwrap_or("?");
        match (self.line, self.column) {
            (Some(line), Some(column)) => format!("{}:{}:{}", url, line, column),
            (Some(line), None) => format!("{}:{}", url, line),
            _ => url.to_string(),
        }
    }
}

/// Result of normalizing one exception
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackTrace {
    pub mode: TraceMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Most recently entered frame first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack: Vec<StackFrame>,
}

impl StackTrace {
    /// Build a successful trace, or `None` when there are no frames.
    ///
    /// Detectors go through here so that a zero-frame parse is reported as
    /// "not applicable" rather than as an empty success.
    pub fn from_frames(
        mode: TraceMode,
        name: Option<String>,
        message: Option<String>,
        stack: Vec<StackFrame>,
    ) -> Option<Self> {
        if stack.is_empty() {
            return None;
        }

        Some(Self {
            mode,
            name,
            message,
            stack,
        })
    }

    /// The total-failure result: no name, message or frames
    pub fn failed() -> Self {
        Self {
            mode: TraceMode::Failed,
            name: None,
            message: None,
            stack: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.mode == TraceMode::Failed
    }

    pub fn frame_count(&self) -> usize {
        self.stack.len()
    }

    /// Topmost frame (where the exception was raised)
    pub fn top_frame(&self) -> Option<&StackFrame> {
        self.stack.first()
    }
}

/// Split a captured argument list on commas
///
/// Empty text means "no arguments", not one empty argument.
pub(crate) fn split_args(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(str::to_string).collect()
}

/// Parse a 1-based line number; zero or overflow disqualifies the line.
pub(crate) fn parse_position(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Parse a column: overflow disqualifies the line, zero means "unknown".
pub(crate) fn parse_column(digits: &str) -> Option<Option<u32>> {
    digits.parse::<u32>().ok().map(|n| (n > 0).then_some(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_serializes_to_mode_only() {
        let json = serde_json::to_string(&StackTrace::failed()).unwrap();
        assert_eq!(json, r#"{"mode":"failed"}"#);
    }

    #[test]
    fn test_from_frames_rejects_empty() {
        assert!(StackTrace::from_frames(TraceMode::Stack, None, None, Vec::new()).is_none());
    }

    #[test]
    fn test_frame_omits_absent_fields() {
        let frame = StackFrame::new("main", "http://a/b.js", 3);
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "url": "http://a/b.js", "func": "main", "line": 3 })
        );
    }

    #[test]
    fn test_reserved_modes_deserialize() {
        let mode: TraceMode = serde_json::from_str(r#""onerror""#).unwrap();
        assert_eq!(mode, TraceMode::Onerror);
        let mode: TraceMode = serde_json::from_str(r#""callers""#).unwrap();
        assert_eq!(mode.to_string(), "callers");
    }

    #[test]
    fn test_split_args() {
        assert!(split_args("").is_empty());
        assert_eq!(split_args("a,b"), vec!["a", "b"]);
        assert_eq!(split_args("a,"), vec!["a", ""]);
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("42"), Some(42));
        assert_eq!(parse_position("0"), None);
        assert_eq!(parse_position("99999999999"), None);
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("7"), Some(Some(7)));
        assert_eq!(parse_column("0"), Some(None));
        assert_eq!(parse_column("99999999999"), None);
    }

    #[test]
    fn test_display_location() {
        let frame = StackFrame::new("f", "file:///x.js", 4).with_column(Some(9));
        assert_eq!(frame.display_location(), "file:///x.js:4:9");
        let frame = StackFrame::new("f", "file:///x.js", 4);
        assert_eq!(frame.display_location(), "file:///x.js:4");
    }
}
