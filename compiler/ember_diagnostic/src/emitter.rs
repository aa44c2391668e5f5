//! Terminal output for diagnostics.

use std::io::{self, Write};

use crate::span_utils::LineOffsetTable;
use crate::{code_frame, CodeFrameOptions, Diagnostic, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when the output is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// A source file as shown in diagnostics.
#[derive(Copy, Clone, Debug)]
pub struct SourceFile<'a> {
    pub path: &'a str,
    pub text: &'a str,
}

/// Writes diagnostics as a header, a location line and a code frame.
///
/// ```text
/// error[E1001]: unexpected token `;`
///  --> input.js:1:9
///   |
/// > 1 | let x = ;
///     |         ^
/// ```
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    frame: CodeFrameOptions,
}

impl<W: Write> TerminalEmitter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            frame: CodeFrameOptions::default(),
        }
    }

    #[must_use]
    pub fn with_frame_options(mut self, frame: CodeFrameOptions) -> Self {
        self.frame = frame;
        self
    }

    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    fn write_severity(&mut self, severity: Severity) -> io::Result<()> {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color)
    }

    /// Emit one diagnostic against `source`.
    pub fn emit(&mut self, diagnostic: &Diagnostic, source: SourceFile<'_>) -> io::Result<()> {
        self.write_severity(diagnostic.severity)?;
        self.write_colored(&format!("[{}]", diagnostic.code), colors::BOLD)?;
        writeln!(self.writer, ": {}", diagnostic.message)?;

        if let Some(span) = diagnostic.primary_span() {
            let table = LineOffsetTable::build(source.text);
            let (line, col) = table.offset_to_line_col(source.text, span.start);
            self.write_colored(" --> ", colors::SECONDARY)?;
            writeln!(self.writer, "{}:{line}:{col}", source.path)?;
            let frame = code_frame(
                source.text,
                Some(line as usize),
                isize::try_from(col).ok(),
                &self.frame.with_highlight(self.colors),
            );
            writeln!(self.writer, "{frame}")?;
        }

        for label in diagnostic.labels.iter().filter(|l| !l.message.is_empty()) {
            let marker = if label.is_primary { "=" } else { "-" };
            self.write_colored(&format!("  {marker} "), colors::SECONDARY)?;
            writeln!(self.writer, "{}", label.message)?;
        }
        for note in &diagnostic.notes {
            self.write_colored("  = note: ", colors::NOTE)?;
            writeln!(self.writer, "{note}")?;
        }
        Ok(())
    }

    /// Emit several diagnostics followed by an error count.
    pub fn emit_all(&mut self, diagnostics: &[Diagnostic], source: SourceFile<'_>) -> io::Result<()> {
        for diagnostic in diagnostics {
            self.emit(diagnostic, source)?;
            writeln!(self.writer)?;
        }
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        if errors > 0 {
            let s = if errors == 1 { "" } else { "s" };
            self.write_colored(&format!("error: aborting due to {errors} error{s}"), colors::ERROR)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()
    }
}

/// Render a diagnostic without colors.
pub fn render_plain(diagnostic: &Diagnostic, source: SourceFile<'_>) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    // Writing to a Vec cannot fail.
    let _ = emitter.emit(diagnostic, source);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

#[cfg(test)]
mod tests {
    use ember_ir::Span;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ErrorCode;

    #[test]
    fn test_plain_render() {
        let diag = Diagnostic::error(ErrorCode::E1002)
            .with_message("expected an expression")
            .with_label(Span::new(8, 9), "");
        let out = render_plain(
            &diag,
            SourceFile {
                path: "input.js",
                text: "let x = ;",
            },
        );
        assert_eq!(
            out,
            "error[E1002]: expected an expression\n --> input.js:1:9\n> 1 | let x = ;\n    |         ^\n"
        );
    }

    #[test]
    fn test_notes_and_labels() {
        let diag = Diagnostic::error(ErrorCode::E2001)
            .with_message("duplicate declaration `a`")
            .with_label(Span::new(15, 16), "redeclared here")
            .with_note("`let` bindings cannot be redeclared");
        let out = render_plain(
            &diag,
            SourceFile {
                path: "a.js",
                text: "let a = 1;\nlet a = 2;",
            },
        );
        assert!(out.contains(" --> a.js:2:5"));
        assert!(out.contains("  = redeclared here"));
        assert!(out.contains("  = note: `let` bindings cannot be redeclared"));
    }

    #[test]
    fn test_colors_follow_mode() {
        assert!(ColorMode::Always.should_use_colors(false));
        assert!(!ColorMode::Never.should_use_colors(true));
        assert!(ColorMode::Auto.should_use_colors(true));
    }

    #[test]
    fn test_emit_all_counts_errors() {
        let diags = vec![
            Diagnostic::error(ErrorCode::E1001).with_message("one"),
            Diagnostic::error(ErrorCode::E1001).with_message("two"),
        ];
        let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
        let result = emitter.emit_all(&diags, SourceFile { path: "x.js", text: "" });
        assert!(result.is_ok());
        let out = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
        assert!(out.ends_with("error: aborting due to 2 errors\n"));
    }
}
