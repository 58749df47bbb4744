//! Error rendering using ariadne
//!
//! Shows an interpreter [`Error`] against the program source, pointing at
//! the line of the failing statement.

use std::io::Write;
use std::ops::Range;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};

use crate::{Error, ErrorKind};

const SOURCE_ID: &str = "<program>";

/// Render an error to stderr.
///
/// `source` is the text of the failing call, so the error line must be
/// relative to it (true for a fresh interpreter).
///
/// # Example
/// ```no_run
/// use seqlang::{Interpreter, render_error};
///
/// let source = "var x = 1\nout x / 0";
/// let mut interpreter = Interpreter::new(std::io::stdout());
/// if let Err(e) = interpreter.interpret(source) {
///     render_error(&e, source);
/// }
/// ```
pub fn render_error(error: &Error, source: &str) {
    render_error_to_writer(error, source, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer.
pub fn render_error_to(error: &Error, source: &str, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, source, writer, true)
}

/// Render an error to a String (useful for logs, editors, etc.)
pub fn render_error_to_string(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Same as [`render_error_to_string`] without ANSI color codes.
pub fn render_error_to_string_no_color(error: &Error, source: &str) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, source, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    source: &str,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let Error::Program {
        kind,
        message,
        line,
    } = error
    else {
        return writeln!(writer, "{}", error);
    };

    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let span = line_span(source, *line);
    let report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_code(code_of(*kind))
        .with_message(error.to_string())
        .with_config(ariadne::Config::default().with_color(use_color))
        .with_label(
            Label::new((SOURCE_ID, span))
                .with_message(message)
                .with_color(colors.next()),
        );

    report.finish().write((SOURCE_ID, Source::from(source)), &mut *writer)
}

fn code_of(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Syntax => "syntax",
        ErrorKind::Type => "type",
        ErrorKind::Runtime => "runtime",
    }
}

/// Character range of the text on 1-based `line`, without indentation.
///
/// A line past the end of `source` maps to an empty range at its end.
fn line_span(source: &str, line: usize) -> Range<usize> {
    let mut start = 0;
    for (index, text) in source.split('\n').enumerate() {
        let width = text.chars().count();
        if index + 1 == line {
            let text = text.trim_end_matches('\r');
            let indent = text.chars().take_while(|c| c.is_whitespace()).count();
            return start + indent..start + text.chars().count();
        }
        start += width + 1;
    }
    let end = source.chars().count();
    end..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interpreter;

    fn fail(source: &str) -> Error {
        Interpreter::new(Vec::new())
            .interpret(source)
            .expect_err("program should fail")
    }

    #[test]
    fn test_line_span() {
        let source = "var x = 1\n  out x\r\n\nout 2";
        assert_eq!(line_span(source, 1), 0..9);
        assert_eq!(line_span(source, 2), 12..17);
        assert_eq!(line_span(source, 3), 19..19);
        assert_eq!(line_span(source, 4), 20..25);
        assert_eq!(line_span(source, 9), 25..25);
    }

    #[test]
    fn test_render_runtime_error() {
        let source = "var x = 1\nout x / 0";
        let output = render_error_to_string_no_color(&fail(source), source);

        assert!(output.contains("runtime"));
        assert!(output.contains("error on line 2: attempted division by 0"));
        assert!(output.contains("out x / 0"));
    }

    #[test]
    fn test_render_type_error() {
        let source = "var s = {1, 5}\nout s + 1";
        let output = render_error_to_string_no_color(&fail(source), source);

        assert!(output.contains("type"));
        assert!(output.contains("invalid usage of operator + on sequence"));
    }

    #[test]
    fn test_render_syntax_error_is_multiline() {
        let source = "out {0 5}";
        let output = render_error_to_string_no_color(&fail(source), source);

        assert!(output.contains("syntax"));
        assert!(output.contains("out {0 5}"));
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_render_cancelled() {
        let output = render_error_to_string_no_color(&Error::Cancelled, "out 1");
        assert_eq!(output, "interpretation cancelled\n");
    }
}
