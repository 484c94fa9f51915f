use core::fmt::Write;

use smallvec::SmallVec;

use crate::String;
use crate::api::DiagnosticOptions;

/// One entry of an exception's call stack, innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackFrame {
    pub function_name: Option<String>,
    pub script_name: Option<String>,
    /// 1-based.
    pub line_number: Option<u32>,
}

impl StackFrame {
    pub fn new(function_name: &str, script_name: &str, line_number: u32) -> Self {
        Self {
            function_name: Some(function_name.into()),
            script_name: Some(script_name.into()),
            line_number: Some(line_number),
        }
    }

    /// A frame whose function has no name.
    pub fn anonymous(script_name: &str, line_number: u32) -> Self {
        Self {
            function_name: None,
            script_name: Some(script_name.into()),
            line_number: Some(line_number),
        }
    }

    fn display_name<'a>(&'a self, options: &'a DiagnosticOptions) -> &'a str {
        match self.function_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &options.anonymous_function,
        }
    }
}

/// Renders frames one per line as `indent name @ script:line`, with every
/// name padded to the widest one. `None` when there are no frames.
pub fn render_stack_trace(frames: &[StackFrame], options: &DiagnosticOptions) -> Option<String> {
    if frames.is_empty() {
        return None;
    }

    let names: SmallVec<[&str; 16]> = frames.iter().map(|f| f.display_name(options)).collect();
    let width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);

    let mut trace = String::new();
    for (i, (frame, name)) in frames.iter().zip(&names).enumerate() {
        if i > 0 {
            trace.push('\n');
        }
        let script = frame
            .script_name
            .as_deref()
            .unwrap_or(options.unknown_script.as_str());
        // Writing into a String cannot fail.
        let _ = write!(trace, "{}{name:<width$} @ {script}", options.indent);
        if let Some(line) = frame.line_number {
            let _ = write!(trace, ":{line}");
        }
    }
    Some(trace)
}
