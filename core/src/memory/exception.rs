use crate::diagnostics::{ExceptionContext, StackFrame};
use crate::{String, Vec};

/// A plain-data [`ExceptionContext`].
///
/// Embedders can copy an engine's exception state into one of these when it
/// has to outlive the engine call; tests build them directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionSnapshot {
    pub exception_text: Option<String>,
    pub terminating: bool,
    /// Set when the engine attached a message with source metadata.
    pub has_message: bool,
    pub source_line: Option<String>,
    pub start_column: Option<usize>,
    pub end_column: Option<usize>,
    pub resource_name: Option<String>,
    pub line_number: Option<u32>,
    pub frames: Vec<StackFrame>,
}

impl ExceptionSnapshot {
    /// An exception whose value stringifies to `text`, without source metadata.
    pub fn thrown(text: impl Into<String>) -> Self {
        Self {
            exception_text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Execution was terminated; there is no exception value.
    pub fn terminated() -> Self {
        Self {
            terminating: true,
            ..Default::default()
        }
    }

    pub fn with_source(mut self, line: impl Into<String>, start: usize, end: usize) -> Self {
        self.has_message = true;
        self.source_line = Some(line.into());
        self.start_column = Some(start);
        self.end_column = Some(end);
        self
    }

    pub fn with_location(mut self, resource_name: impl Into<String>, line_number: u32) -> Self {
        self.has_message = true;
        self.resource_name = Some(resource_name.into());
        self.line_number = Some(line_number);
        self
    }

    pub fn with_frames(mut self, frames: Vec<StackFrame>) -> Self {
        self.has_message = true;
        self.frames = frames;
        self
    }
}

impl ExceptionContext for ExceptionSnapshot {
    fn exception_text(&self) -> Option<String> {
        self.exception_text.clone()
    }

    fn is_terminating(&self) -> bool {
        self.terminating
    }

    fn has_source_info(&self) -> bool {
        self.has_message
    }

    fn source_line(&self) -> Option<String> {
        self.source_line.clone()
    }

    fn start_column(&self) -> Option<usize> {
        self.start_column
    }

    fn end_column(&self) -> Option<usize> {
        self.end_column
    }

    fn resource_name(&self) -> Option<String> {
        self.resource_name.clone()
    }

    fn line_number(&self) -> Option<u32> {
        self.line_number
    }

    fn stack_frames(&self) -> Vec<StackFrame> {
        self.frames.clone()
    }
}
