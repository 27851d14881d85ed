//! Caller mode: trace the current call stack instead of a raised exception.
//!
//! The stack is captured with the `backtrace` crate and each resolved symbol
//! becomes one engine-A `at` line of a synthetic exception. That exception
//! goes through the regular detector chain, so callers get the same
//! [`StackTrace`] shape either way.

use super::dispatcher::StackTraceComputer;
use super::exception::ExceptionSource;
use super::schema::{StackTrace, TraceMode};
use crate::utils::config::{CALLER_EXCEPTION_NAME, NATIVE_FRAME_SCHEME};
use crate::utils::error::TraceError;
use backtrace::{Backtrace, BacktraceSymbol};
use log::{debug, warn};

/// One symbolized frame of a native backtrace
#[derive(Debug, Clone, PartialEq, Eq)]
struct NativeFrame {
    /// Demangled symbol, hash suffix removed
    symbol: String,
    path: String,
    line: u32,
    column: Option<u32>,
}

impl NativeFrame {
    /// Build a frame from a resolved symbol; symbols without a name or a
    /// source location are dropped.
    fn from_symbol(symbol: &BacktraceSymbol) -> Option<Self> {
        let name = symbol.name()?;
        let path = symbol.filename()?;
        let line = symbol.lineno().filter(|n| *n > 0)?;

        Some(Self {
            symbol: format!("{:#}", name),
            path: path.display().to_string(),
            line,
            column: symbol.colno().filter(|c| *c > 0),
        })
    }

    /// Render as an engine-A `at` line
    ///
    /// The line grammar takes the function as one whitespace-free token, so
    /// spaces inside the symbol (`<F as FnOnce>`, `<impl Foo>`) are replaced
    /// here and the real symbol is put back by [`restore_symbols`].
    fn to_stack_line(&self) -> String {
        let token: Vec<&str> = self.symbol.split_whitespace().collect();
        let location = match self.column {
            Some(column) => format!("{}:{}", self.line, column),
            None => self.line.to_string(),
        };
        format!(
            "    at {} ({}{}:{})",
            token.join("_"),
            NATIVE_FRAME_SCHEME,
            self.path,
            location
        )
    }
}

/// Synthetic exception wrapping a captured call stack
#[derive(Debug, Clone)]
struct CapturedStack {
    frames: Vec<NativeFrame>,
    depth: usize,
}

impl CapturedStack {
    /// Capture and symbolize the current thread's stack
    fn capture(depth: usize) -> Self {
        let backtrace = Backtrace::new();
        let frames = backtrace
            .frames()
            .iter()
            .flat_map(|frame| frame.symbols())
            .filter_map(NativeFrame::from_symbol)
            .collect();

        Self { frames, depth }
    }
}

impl ExceptionSource for CapturedStack {
    fn name(&self) -> Result<Option<String>, TraceError> {
        Ok(Some(CALLER_EXCEPTION_NAME.to_string()))
    }

    fn message(&self) -> Result<Option<String>, TraceError> {
        Ok(Some(format!("call stack captured at depth {}", self.depth)))
    }

    fn stack(&self) -> Result<Option<String>, TraceError> {
        let lines: Vec<String> = self.frames.iter().map(NativeFrame::to_stack_line).collect();
        Ok(Some(lines.join("\n")))
    }
}

/// Put the demangled symbols back into frames parsed from the rendered stack
///
/// Every rendered line is well-formed, so the parsed frames line up one to
/// one with the native ones. If they do not, the parsed tokens are kept.
fn restore_symbols(trace: &mut StackTrace, frames: &[NativeFrame]) {
    if trace.mode != TraceMode::Stack || trace.stack.len() != frames.len() {
        warn!(
            "Parsed {} frame(s) from {} native frame(s), keeping rendered symbols",
            trace.stack.len(),
            frames.len()
        );
        return;
    }

    for (frame, native) in trace.stack.iter_mut().zip(frames) {
        frame.func = native.symbol.clone();
    }
}

impl StackTraceComputer {
    /// Compute the stack trace of whoever called this
    ///
    /// **Public** - caller-mode entry point
    ///
    /// # Arguments
    /// * `depth` - Frames to skip. Threaded through for bookkeeping only;
    ///   the returned frames are not truncated.
    ///
    /// # Returns
    /// `Ok(None)` if no frame of the current stack could be symbolized
    /// (unsupported platform, or a binary without line tables)
    ///
    /// # Errors
    /// Only when `propagate_faults` is set, as for [`compute`](Self::compute)
    #[inline(never)]
    pub fn of_caller(&self, depth: Option<usize>) -> Result<Option<StackTrace>, TraceError> {
        // One more for this wrapper's own frame
        let depth = depth.unwrap_or(0) + 1;

        let captured = CapturedStack::capture(depth + 1);
        if captured.frames.is_empty() {
            warn!("No symbolized frames in the captured backtrace");
            return Ok(None);
        }
        debug!("Captured caller stack ({} frames)", captured.frames.len());

        let mut trace = self.compute(&captured, Some(captured.depth))?;
        restore_symbols(&mut trace, &captured.frames);
        Ok(Some(trace))
    }
}

/// Trace the caller's stack with the default configuration
#[inline(never)]
pub fn compute_caller_trace(depth: Option<usize>) -> Option<StackTrace> {
    match StackTraceComputer::default().of_caller(depth) {
        Ok(trace) => trace,
        Err(e) => {
            warn!("Unexpected fault with propagation disabled: {}", e);
            Some(StackTrace::failed())
        }
    }
}
