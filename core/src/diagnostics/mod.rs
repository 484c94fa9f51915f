//! Structured descriptions of failed script executions.
//!
//! [`extract_diagnostic`] turns an [`ExceptionContext`] into a
//! [`DiagnosticRecord`]: the message, the failing source line with a marker
//! under the failing range, the location and line number, and an aligned
//! stack trace.
//!
//! ```
//! use jsbridge_core::diagnostics::{StackFrame, extract_diagnostic};
//! use jsbridge_core::memory::ExceptionSnapshot;
//!
//! let context = ExceptionSnapshot::thrown("my_err")
//!     .with_source("    throw 'my_err'", 4, 5)
//!     .with_location("my.js", 2)
//!     .with_frames(vec![
//!         StackFrame::new("test", "my.js", 2),
//!         StackFrame::anonymous("my.js", 5),
//!     ]);
//!
//! let record = extract_diagnostic(&context);
//! assert_eq!(record.message.as_deref(), Some("my_err"));
//! assert_eq!(
//!     record.to_string(),
//!     "my.js:2: my_err\n\
//!      \x20   throw 'my_err'\n\
//!      \x20   ^\n\
//!      stack trace:\n\
//!      \x20   test                 @ my.js:2\n\
//!      \x20   (anonymous function) @ my.js:5"
//! );
//! ```

mod extract;
mod marker;
mod stack;

use core::fmt;

use crate::String;

pub use extract::{ExceptionContext, extract_diagnostic, extract_diagnostic_with};
pub use marker::SourceMarker;
pub use stack::{StackFrame, render_stack_trace};

/// What is known about one failed execution.
///
/// Absent information stays `None`; in particular a missing line number is
/// never reported as line 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub message: Option<String>,
    /// Resource (file) name of the failing script.
    pub location: Option<String>,
    /// 1-based.
    pub line_number: Option<u32>,
    pub source_marker: Option<SourceMarker>,
    /// Newline-joined, column-aligned frames, innermost first.
    pub stack_trace: Option<String>,
}

impl DiagnosticRecord {
    /// The two-line source marker as text.
    pub fn wavy_underline(&self) -> Option<String> {
        use crate::ToString;
        self.source_marker.as_ref().map(ToString::to_string)
    }
}

/// `location:line: message`, the source marker, then `stack trace:` and the
/// frames. Absent parts are left out.
impl fmt::Display for DiagnosticRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.location, self.line_number) {
            (Some(location), Some(line)) => write!(f, "{location}:{line}: ")?,
            (Some(location), None) => write!(f, "{location}: ")?,
            (None, Some(line)) => write!(f, "line {line}: ")?,
            (None, None) => {}
        }
        f.write_str(self.message.as_deref().unwrap_or_default())?;
        if let Some(marker) = &self.source_marker {
            write!(f, "\n{marker}")?;
        }
        if let Some(trace) = &self.stack_trace {
            write!(f, "\nstack trace:\n{trace}")?;
        }
        Ok(())
    }
}
