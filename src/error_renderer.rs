//! Error rendering with ariadne
//!
//! Diagnostics are drawn against the expression source, with the primary
//! span labelled, related spans as secondary labels and help lines as notes.

use std::io::Write;
use std::ops::Range;

use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};

use crate::{Diagnostic, Error, Severity};

/// Name shown in report headers.
const SOURCE_ID: &str = "<expr>";

/// Render an error to stderr
///
/// # Example
/// ```no_run
/// use reckon::{Engine, EngineOptions, render_error};
///
/// let engine = Engine::with_stdlib(EngineOptions::default(), |_| Ok(())).unwrap();
/// if let Err(e) = engine.eval("1 + log(2)") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs, web UIs, etc.)
pub fn render_error_to_string(error: &Error) -> String {
    render_to_string(error, true)
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    render_to_string(error, false)
}

fn render_to_string(error: &Error, use_color: bool) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, use_color).ok();
    String::from_utf8_lossy(&buf).into_owned()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compilation {
            diagnostics,
            source,
        } => {
            for diagnostic in diagnostics {
                render_diagnostic(source, diagnostic, writer, use_color)?;
            }
            Ok(())
        }
        Error::Runtime { diagnostic, source } => {
            render_diagnostic(source, diagnostic, writer, use_color)
        }
        Error::ResourceExceeded(_) | Error::Api(_) => writeln!(writer, "{}", error),
    }
}

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
    }
}

/// Keep a span inside the source. Zero-width spans (such as end of input)
/// are widened to the neighbouring character so there is something to point at.
fn clamp(span: &Range<usize>, source: &str) -> Range<usize> {
    let len = source.len();
    let start = span.start.min(len);
    let end = span.end.clamp(start, len);
    if start < end {
        return start..end;
    }
    if let Some(c) = source.get(start..).and_then(|rest| rest.chars().next()) {
        return start..start + c.len_utf8();
    }
    match source.get(..start).and_then(|head| head.char_indices().next_back()) {
        Some((prev, _)) => prev..start,
        None => start..end,
    }
}

fn render_diagnostic(
    source: &str,
    diagnostic: &Diagnostic,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    // Errors converted without their source text have nothing to point at.
    if source.is_empty() {
        writeln!(writer, "{}: {}", diagnostic.severity, diagnostic.message)?;
        for help in &diagnostic.help {
            writeln!(writer, "help: {}", help)?;
        }
        return Ok(());
    }

    let mut colors = ColorGenerator::new();
    let primary = clamp(&diagnostic.span.0, source);

    let mut report = Report::build(report_kind(diagnostic.severity), (SOURCE_ID, primary.clone()))
        .with_message(&diagnostic.message)
        .with_config(
            Config::default()
                .with_color(use_color)
                .with_index_type(IndexType::Byte),
        )
        .with_label(
            Label::new((SOURCE_ID, primary))
                .with_message(&diagnostic.message)
                .with_color(colors.next()),
        );

    if let Some(code) = &diagnostic.code {
        report = report.with_code(code);
    }

    for related in &diagnostic.related {
        report = report.with_label(
            Label::new((SOURCE_ID, clamp(&related.span.0, source)))
                .with_message(&related.message)
                .with_color(colors.next()),
        );
    }

    for help in &diagnostic.help {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}
