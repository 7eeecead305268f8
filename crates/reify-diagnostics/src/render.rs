//! Diagnostic rendering for terminal and other outputs.
//!
//! This module provides the `DiagnosticRenderer` trait and the
//! `TerminalRenderer`, which writes through any `termcolor::WriteColor`.
//! Whether colors are emitted is decided by the writer: a
//! `termcolor::StandardStream` built with a `ColorChoice`, or
//! `termcolor::Buffer::no_color()` for plain text.

use crate::{Diagnostic, DiagnosticSeverity};
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

/// Configuration for the diagnostic renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Whether to show documentation links.
    pub show_docs_links: bool,
    /// Base URL for documentation links.
    pub docs_base_url: String,
}

impl RenderConfig {
    pub fn with_docs(mut self, base_url: impl Into<String>) -> Self {
        self.show_docs_links = true;
        self.docs_base_url = base_url.into();
        self
    }
}

/// A trait for rendering diagnostics to various outputs.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic.
    fn render(&mut self, diagnostic: &Diagnostic) -> io::Result<()>;

    /// Renders a summary of diagnostics.
    fn render_summary(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()>;

    /// Renders multiple diagnostics with a summary.
    fn render_all(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        for diagnostic in diagnostics {
            self.render(diagnostic)?;
        }
        self.render_summary(diagnostics)
    }
}

/// Terminal renderer for diagnostics.
///
/// Output format:
///
/// ```text
/// error[E2001]: cannot resolve type variable `T`
///  --> Box<String>
///   = note: `T` is parameter #0 of `Crate`
/// ```
pub struct TerminalRenderer<W> {
    config: RenderConfig,
    writer: W,
}

impl<W: WriteColor> TerminalRenderer<W> {
    pub fn new(writer: W, config: RenderConfig) -> Self {
        Self { config, writer }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn severity_color(severity: DiagnosticSeverity) -> Color {
        match severity {
            DiagnosticSeverity::Error => Color::Red,
            DiagnosticSeverity::Note => Color::Cyan,
            DiagnosticSeverity::Help => Color::Green,
        }
    }

    fn write_colored(&mut self, text: &str, color: Color, bold: bool) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(bold);
        self.writer.set_color(&spec)?;
        write!(self.writer, "{}", text)?;
        self.writer.reset()
    }

    /// Writes the severity prefix and message (e.g., "error[E2001]: ...").
    fn write_header(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let color = Self::severity_color(diagnostic.severity);
        self.write_colored(diagnostic.severity.prefix(), color, true)?;
        if let Some(code) = &diagnostic.code {
            self.write_colored(&format!("[{}]", code), color, true)?;
        }
        self.write_colored(": ", color, true)?;
        self.write_colored(&diagnostic.message, color, true)?;
        writeln!(self.writer)
    }

    fn write_subject(&mut self, subject: &str) -> io::Result<()> {
        self.write_colored(" --> ", Color::Blue, true)?;
        writeln!(self.writer, "{}", subject)
    }

    fn write_child(&mut self, child: &Diagnostic) -> io::Result<()> {
        let color = Self::severity_color(child.severity);
        write!(self.writer, "  = ")?;
        self.write_colored(child.severity.prefix(), color, true)?;
        writeln!(self.writer, ": {}", child.message)
    }

    fn write_docs_link(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        if !self.config.show_docs_links {
            return Ok(());
        }
        if let Some(url) = diagnostic.docs_url(&self.config.docs_base_url) {
            self.write_colored("  docs: ", Self::severity_color(DiagnosticSeverity::Note), false)?;
            writeln!(self.writer, "{}", url)?;
        }
        Ok(())
    }
}

impl<W: WriteColor> DiagnosticRenderer for TerminalRenderer<W> {
    fn render(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.write_header(diagnostic)?;
        if let Some(subject) = &diagnostic.subject {
            self.write_subject(subject)?;
        }
        for child in &diagnostic.children {
            self.write_child(child)?;
        }
        self.write_docs_link(diagnostic)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }

    fn render_summary(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        let error_count = diagnostics.iter().filter(|d| d.severity.is_error()).count();
        if error_count > 0 {
            self.write_colored("error", Self::severity_color(DiagnosticSeverity::Error), true)?;
            write!(self.writer, ": resolution failed with ")?;
            if error_count == 1 {
                writeln!(self.writer, "1 error")?;
            } else {
                writeln!(self.writer, "{} errors", error_count)?;
            }
        }
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    fn render_plain(diagnostics: &[Diagnostic], config: RenderConfig) -> String {
        let mut renderer = TerminalRenderer::new(Buffer::no_color(), config);
        renderer.render_all(diagnostics).unwrap();
        String::from_utf8(renderer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_render_header_subject_and_children() {
        let diag = Diagnostic::error("E2001", "cannot resolve type variable `T`")
            .with_subject("Box<String>")
            .with_child(Diagnostic::note("`T` is parameter #0 of `Crate`"))
            .with_child(Diagnostic::help("resolve against an instantiated `Crate<...>`"));

        insta::assert_snapshot!(render_plain(&[diag], RenderConfig::default()), @r###"
        error[E2001]: cannot resolve type variable `T`
         --> Box<String>
          = note: `T` is parameter #0 of `Crate`
          = help: resolve against an instantiated `Crate<...>`

        error: resolution failed with 1 error
        "###);
    }

    #[test]
    fn test_render_docs_link() {
        let diag = Diagnostic::error("E1001", "unsupported type expression");
        let config = RenderConfig::default().with_docs("https://docs.example/errors");

        insta::assert_snapshot!(render_plain(&[diag], config), @r###"
        error[E1001]: unsupported type expression
          docs: https://docs.example/errors/E1001

        error: resolution failed with 1 error
        "###);
    }

    #[test]
    fn test_summary_counts_errors() {
        let errors = vec![
            Diagnostic::error("E1001", "first"),
            Diagnostic::error("E2001", "second"),
        ];
        let output = render_plain(&errors, RenderConfig::default());
        assert!(output.ends_with("error: resolution failed with 2 errors\n"));
    }

    #[test]
    fn test_summary_is_empty_without_errors() {
        assert_eq!(render_plain(&[], RenderConfig::default()), "");
    }
}
