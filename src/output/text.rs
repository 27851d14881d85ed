//! Plain-text rendering of a trace.

use crate::parser::schema::{StackFrame, StackTrace};

/// Render one frame as `func() in url:line`
///
/// Anonymous frames print as `[anonymous]`, unknown lines as `0`.
pub fn format_frame(frame: &StackFrame) -> String {
    let func = if frame.func.is_empty() {
        "[anonymous]"
    } else {
        frame.func.as_str()
    };

    format!(
        "{}() in {}:{}",
        func,
        frame.url.as_deref().unwrap_or(""),
        frame.line.unwrap_or(0)
    )
}

/// Render a whole trace: a `name: message` header, the mode, then one
/// frame per line
pub fn format_trace(trace: &StackTrace) -> String {
    let mut lines = Vec::with_capacity(trace.stack.len() + 2);

    match (trace.name.as_deref(), trace.message.as_deref()) {
        (Some(name), Some(message)) => lines.push(format!("{}: {}", name, message)),
        (Some(name), None) => lines.push(name.to_string()),
        (None, Some(message)) => lines.push(message.to_string()),
        (None, None) => {}
    }
    lines.push(format!("(mode: {}, {} frame(s))", trace.mode, trace.frame_count()));

    for frame in &trace.stack {
        lines.push(format!("  {}", format_frame(frame)));
        if let Some(context) = &frame.context {
            for source_line in context {
                lines.push(format!("      | {}", source_line.trim_end()));
            }
        }
    }

    lines.join("\n")
}
