use pretty_assertions::assert_eq;
use trace_normalizer::parser::exception::{ExceptionSource, RawException};
use trace_normalizer::parser::{compute_caller_trace, compute_stack_trace, StackTraceComputer};
use trace_normalizer::{ComputeConfig, StackFrame, StackTrace, TraceError, TraceMode};

const V8_STACK: &str = "ReferenceError: qq is not defined
    at trace (http://example.com/js/app.js:10:15)
    at Object.main (http://example.com/js/app.js:22:3)
    at file:///home/user/run.js:1:1
    at handler (file:///home/user/run.js:40)";

const GECKO_STACK: &str = "trace(a,b,c)@http://example.com/js/app.js:10:15
main()@http://example.com/js/app.js:22
@http://example.com/js/app.js:30:1
";

const STACKTRACE: &str = "Error thrown at line 42, column 12 in <anonymous function: createException>() in http://site.com/js/test.js:
    this.undef();
called from line 27, column 8 in printStackTrace(options) in http://site.com/js/test.js:
    var ex = createException();";

#[test]
fn test_v8_stack_frames() {
    let ex = RawException::new("ReferenceError", "qq is not defined").with_stack(V8_STACK);
    let trace = compute_stack_trace(&ex);

    assert_eq!(trace.mode, TraceMode::Stack);
    assert_eq!(trace.name.as_deref(), Some("ReferenceError"));
    assert_eq!(trace.message.as_deref(), Some("qq is not defined"));
    assert_eq!(trace.frame_count(), 3);

    assert_eq!(
        trace.stack[0],
        StackFrame::new("trace", "http://example.com/js/app.js", 10).with_column(Some(15))
    );
    assert_eq!(trace.stack[1].func, "Object.main");
    assert_eq!(trace.stack[2].column, None);
    assert!(trace.stack.iter().all(|f| f.args.is_none()));
}

#[test]
fn test_gecko_stack_frames() {
    let ex = RawException::new("Error", "boom").with_stack(GECKO_STACK);
    let trace = compute_stack_trace(&ex);

    assert_eq!(trace.mode, TraceMode::Stack);
    assert_eq!(trace.frame_count(), 3);
    assert_eq!(
        trace.stack[0].args,
        Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
    );
    assert_eq!(trace.stack[1].args, Some(Vec::new()));
    assert_eq!(trace.stack[1].column, None);
    assert_eq!(trace.stack[2].func, "");
    assert_eq!(trace.stack[2].args, Some(Vec::new()));
}

#[test]
fn test_stacktrace_takes_precedence_over_stack() {
    let ex = RawException::new("Error", "boom")
        .with_stack(V8_STACK)
        .with_stacktrace(STACKTRACE);
    let trace = compute_stack_trace(&ex);

    assert_eq!(trace.mode, TraceMode::Stacktrace);
    assert_eq!(trace.frame_count(), 2);
    assert_eq!(trace.stack[0].func, "createException");
}

#[test]
fn test_unparseable_stacktrace_falls_through_to_stack() {
    let ex = RawException::new("Error", "boom")
        .with_stack(V8_STACK)
        .with_stacktrace("n/a; see 'opera:config#UserPrefs|Exceptions Have Stacktrace'");

    assert_eq!(compute_stack_trace(&ex).mode, TraceMode::Stack);
}

#[test]
fn test_short_message_without_properties_fails() {
    let ex = RawException::new("Error", "line one\nline two\nline three");
    let trace = compute_stack_trace(&ex);

    assert_eq!(trace, StackTrace::failed());
    assert_eq!(serde_json::to_string(&trace).unwrap(), r#"{"mode":"failed"}"#);
}

#[test]
fn test_empty_exception_fails() {
    assert_eq!(compute_stack_trace(&RawException::default()), StackTrace::failed());
}

#[test]
fn test_multiline_linked_script_pairs() {
    let pairs = [
        ("file://localhost/a.js", 3, "zzz", "        undefinedFunc(a);"),
        ("http://example.com/b.js", 17, "yyy", "    zzz(x, y, z);"),
        ("https://example.com/c.js", 5, "xxx", "  yyy(a, a, a);"),
    ];

    let mut message = String::from("Statement on line 3: Undefined variable: undefinedFunc\nBacktrace:");
    for (url, line, func, context) in &pairs {
        message.push_str(&format!(
            "\n  Line {} of linked script {}: In function {}\n{}",
            line, url, func, context
        ));
    }

    let ex = RawException::new("ReferenceError", message);
    let trace = compute_stack_trace(&ex);

    assert_eq!(trace.mode, TraceMode::Multiline);
    assert_eq!(
        trace.message.as_deref(),
        Some("Statement on line 3: Undefined variable: undefinedFunc")
    );
    assert_eq!(trace.frame_count(), pairs.len());

    for (frame, (url, line, func, context)) in trace.stack.iter().zip(pairs.iter()) {
        assert_eq!(frame.url.as_deref(), Some(*url));
        assert_eq!(frame.line, Some(*line));
        assert_eq!(frame.func, *func);
        assert_eq!(frame.context, Some(vec![context.to_string()]));
    }
}

#[test]
fn test_synthetic_v8_stack_matches_input() {
    let input: Vec<(String, String, u32, u32)> = (1..=25)
        .map(|i| {
            (
                format!("fn_{}", i),
                format!("https://cdn.example.com/bundle{}.js", i % 4),
                i * 7,
                i + 1,
            )
        })
        .collect();

    let text = input
        .iter()
        .map(|(func, url, line, column)| format!("    at {} ({}:{}:{})", func, url, line, column))
        .collect::<Vec<_>>()
        .join("\n");

    let trace = compute_stack_trace(&RawException::new("Error", "synthetic").with_stack(text));

    assert_eq!(trace.frame_count(), input.len());
    for (frame, (func, url, line, column)) in trace.stack.iter().zip(input.iter()) {
        assert_eq!(&frame.func, func);
        assert_eq!(frame.url.as_ref(), Some(url));
        assert_eq!(frame.line, Some(*line));
        assert_eq!(frame.column, Some(*column));
    }
}

/// Exception whose `stack` accessor faults, with a usable message
struct FaultyStack;

impl ExceptionSource for FaultyStack {
    fn name(&self) -> Result<Option<String>, TraceError> {
        Ok(Some("Error".to_string()))
    }

    fn message(&self) -> Result<Option<String>, TraceError> {
        Ok(Some(
            "msg\nBacktrace:\n  Line 2 of linked script http://a/b.js\n    go();".to_string(),
        ))
    }

    fn stack(&self) -> Result<Option<String>, TraceError> {
        Err(TraceError::property("stack", "getter threw"))
    }
}

#[test]
fn test_faulting_detector_is_skipped() {
    let trace = compute_stack_trace(&FaultyStack);
    assert_eq!(trace.mode, TraceMode::Multiline);
    assert_eq!(trace.stack[0].line, Some(2));
}

#[test]
fn test_faulting_detector_propagates_in_debug_mode() {
    let computer = StackTraceComputer::new(ComputeConfig::new().with_propagate_faults(true));
    let result = computer.compute(&FaultyStack, Some(3));

    assert_eq!(result, Err(TraceError::property("stack", "getter threw")));
}

#[inline(never)]
fn f() -> Option<StackTrace> {
    compute_caller_trace(None)
}

#[inline(never)]
fn g() -> Option<StackTrace> {
    f()
}

#[test]
fn test_of_caller_is_not_failed() {
    let trace = g().expect("backtrace capture supported");
    assert_ne!(trace.mode, TraceMode::Failed);
    assert!(!trace.stack.is_empty());
}
