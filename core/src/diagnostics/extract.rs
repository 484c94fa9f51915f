use tracing::debug;

use crate::api::DiagnosticOptions;
use crate::{String, Vec};

use super::{DiagnosticRecord, SourceMarker, StackFrame, render_stack_trace};

/// An engine's view of a just-thrown exception.
///
/// Every piece may be missing; the extractor simply leaves the matching
/// field of the record empty. Implementations are only valid until the next
/// engine operation, so records copy everything they keep.
pub trait ExceptionContext {
    /// String form of the thrown value, or `None` when there is no exception
    /// value or it cannot be converted.
    fn exception_text(&self) -> Option<String>;

    /// Whether execution was cooperatively terminated.
    fn is_terminating(&self) -> bool;

    /// Whether the engine attached a message with source metadata. When
    /// false, none of the positional methods below are consulted.
    fn has_source_info(&self) -> bool;

    fn source_line(&self) -> Option<String>;

    /// 0-based column where the failing range starts.
    fn start_column(&self) -> Option<usize>;

    /// 0-based column one past the failing range.
    fn end_column(&self) -> Option<usize>;

    fn resource_name(&self) -> Option<String>;

    /// 1-based.
    fn line_number(&self) -> Option<u32>;

    /// Innermost frame first.
    fn stack_frames(&self) -> Vec<StackFrame>;
}

/// Builds a record with the default [`DiagnosticOptions`].
pub fn extract_diagnostic<C: ExceptionContext + ?Sized>(context: &C) -> DiagnosticRecord {
    extract_diagnostic_with(&DiagnosticOptions::default(), context)
}

/// Describes one failed execution. Never fails: information the context
/// cannot provide is left absent.
pub fn extract_diagnostic_with<C: ExceptionContext + ?Sized>(
    options: &DiagnosticOptions,
    context: &C,
) -> DiagnosticRecord {
    let Some(message) = context.exception_text() else {
        let terminating = context.is_terminating();
        debug!(terminating, "Exception carries no value");
        let message = if terminating {
            &options.terminated_message
        } else {
            &options.no_information_message
        };
        return DiagnosticRecord {
            message: Some(message.clone()),
            ..Default::default()
        };
    };

    let mut record = DiagnosticRecord {
        message: Some(message),
        ..Default::default()
    };
    if !context.has_source_info() {
        return record;
    }

    record.source_marker = context.source_line().map(|line| {
        SourceMarker::new(
            line,
            context.start_column().unwrap_or(0),
            context.end_column().unwrap_or(0),
        )
    });
    record.location = context.resource_name();
    record.line_number = context.line_number();
    record.stack_trace = render_stack_trace(&context.stack_frames(), options);
    record
}
