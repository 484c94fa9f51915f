//! Rich diagnostic rendering using ariadne
//!
//! Renders a [`DiagnosticRecord`] with the failing source line, a label
//! under the failing range and the stack trace as a note. Records without
//! a source marker fall back to their plain text layout.

use crate::DiagnosticRecord;
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::io::Write;

/// Character set for rendering diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// Use Unicode characters for rich visual output.
    #[default]
    Unicode,
    /// Use ASCII-only characters for compatibility.
    Ascii,
}

/// Configuration for diagnostic rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig<'a> {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The filename to display. Defaults to the record's location, then
    /// "<unknown>".
    pub filename: Option<&'a str>,
    /// The character set to use for rendering.
    pub charset: CharSet,
}

impl Default for RenderConfig<'_> {
    fn default() -> Self {
        RenderConfig::default()
    }
}

impl RenderConfig<'_> {
    const fn default() -> Self {
        Self {
            color: true,
            filename: None,
            charset: CharSet::Unicode,
        }
    }
}

/// Render a diagnostic to stderr using the default config.
///
/// # Example
/// ```no_run
/// use jsbridge::{extract_diagnostic, render_diagnostic};
/// use jsbridge::memory::ExceptionSnapshot;
///
/// let context = ExceptionSnapshot::thrown("ReferenceError: y is not defined")
///     .with_source("let x = y;", 8, 9)
///     .with_location("main.js", 1);
/// render_diagnostic(&extract_diagnostic(&context));
/// ```
pub fn render_diagnostic(record: &DiagnosticRecord) {
    render_diagnostic_to(record, &mut std::io::stderr(), &RenderConfig::default()).ok();
}

/// Render a diagnostic to a writer with the given configuration.
///
/// # Example
/// ```
/// use jsbridge::{RenderConfig, extract_diagnostic, render_diagnostic_to};
/// use jsbridge::memory::ExceptionSnapshot;
///
/// let context = ExceptionSnapshot::thrown("ReferenceError: y is not defined")
///     .with_source("let x = y;", 8, 9)
///     .with_location("main.js", 1);
///
/// let mut buf = Vec::new();
/// let config = RenderConfig { color: false, ..Default::default() };
/// render_diagnostic_to(&extract_diagnostic(&context), &mut buf, &config).unwrap();
/// let output = String::from_utf8_lossy(&buf);
/// assert!(output.contains("ReferenceError: y is not defined"));
/// assert!(output.contains("let x = y;"));
/// ```
pub fn render_diagnostic_to(
    record: &DiagnosticRecord,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    let Some(marker) = &record.source_marker else {
        return writeln!(writer, "{record}");
    };

    let filename = config
        .filename
        .or(record.location.as_deref())
        .unwrap_or("<unknown>");
    let message = record.message.as_deref().unwrap_or_default();

    // Spans are character offsets into the single source line, kept
    // inside it so a column past the end still points at the last character.
    let len = marker.line.chars().count();
    let start = marker.start_column.min(len.saturating_sub(1));
    let end = marker.width().min(len).max((start + 1).min(len));

    let ariadne_charset = match config.charset {
        CharSet::Unicode => ariadne::CharSet::Unicode,
        CharSet::Ascii => ariadne::CharSet::Ascii,
    };
    let ariadne_config = ariadne::Config::default()
        .with_color(config.color)
        .with_char_set(ariadne_charset);

    let mut report = Report::build(ReportKind::Error, (filename, start..end))
        .with_message(message)
        .with_config(ariadne_config)
        .with_label(
            Label::new((filename, start..end))
                .with_message(message)
                .with_color(Color::Red),
        );

    if let Some(trace) = &record.stack_trace {
        report = report.with_note(format!("stack trace:\n{trace}"));
    }

    // Line numbers are 1-based; the source holds only the failing line.
    let offset = record.line_number.map_or(0, |line| line.saturating_sub(1) as usize);
    let source = Source::from(marker.line.as_str()).with_display_line_offset(offset);

    report.finish().write((filename, source), &mut *writer)
}
