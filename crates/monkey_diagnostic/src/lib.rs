mod render;
pub mod source;
pub mod span;

pub use termcolor;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream};

use self::source::Source;
use self::span::{AsSpan, Span};

#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: Option<String>,
    pub snippets: Vec<Snippet>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            message: None,
            snippets: vec![],
        }
    }

    pub fn warning() -> Self {
        Self::new(DiagnosticKind::Warning)
    }

    pub fn error() -> Self {
        Self::new(DiagnosticKind::Error)
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippets.push(snippet);
        self
    }
}

#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticKind {
    Warning,
    Error,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Error => "error",
        }
    }
}

#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub label: String,
    pub kind: SnippetKind,
    pub span: Span,
}

impl Snippet {
    pub fn new(kind: SnippetKind, label: impl Into<String>, span: impl AsSpan) -> Self {
        Self {
            label: label.into(),
            kind,
            span: span.as_span(),
        }
    }

    pub fn primary(label: impl Into<String>, span: impl AsSpan) -> Self {
        Self::new(SnippetKind::Primary, label, span)
    }

    pub fn secondary(label: impl Into<String>, span: impl AsSpan) -> Self {
        Self::new(SnippetKind::Secondary, label, span)
    }
}

#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SnippetKind {
    Primary,
    Secondary,
}

#[derive(Debug)]
pub struct Config {
    /// Lines of source shown above and below a snippet.
    pub context_lines: usize,
    pub tab_width: usize,

    pub error_color: ColorSpec,
    pub warning_color: ColorSpec,
    pub secondary_color: ColorSpec,
    pub gutter_color: ColorSpec,

    pub gutter: &'static str,
    pub primary_underline: char,
    pub secondary_underline: char,
}

impl Default for Config {
    fn default() -> Self {
        let mut error_color = ColorSpec::new();
        error_color.set_fg(Some(Color::Red));
        error_color.set_bold(true);

        let mut warning_color = ColorSpec::new();
        warning_color.set_fg(Some(Color::Yellow));
        warning_color.set_bold(true);

        let mut secondary_color = ColorSpec::new();
        secondary_color.set_fg(Some(Color::Blue));
        secondary_color.set_bold(true);

        let mut gutter_color = ColorSpec::new();
        gutter_color.set_fg(Some(Color::Blue));

        Self {
            context_lines: 1,
            tab_width: 4,

            error_color,
            warning_color,
            secondary_color,
            gutter_color,

            gutter: "|",
            primary_underline: '^',
            secondary_underline: '-',
        }
    }
}

pub trait IntoDiagnostic {
    fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
    fn into_diagnostic(self) -> Diagnostic {
        self
    }
}

pub trait DiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, source: &Source);
}

impl DiagnosticEmitter for Vec<Diagnostic> {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, _source: &Source) {
        self.push(diagnostic);
    }
}

#[derive(Debug)]
pub struct PrettyDiagnosticEmitter {
    pub stream: StandardStream,
    pub config: Config,
}

impl PrettyDiagnosticEmitter {
    pub fn new(color: ColorChoice) -> Self {
        Self {
            stream: StandardStream::stderr(color),
            config: Config::default(),
        }
    }
}

impl Default for PrettyDiagnosticEmitter {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

impl DiagnosticEmitter for PrettyDiagnosticEmitter {
    fn emit_diagnostic(&mut self, diagnostic: Diagnostic, source: &Source) {
        // stderr going away is not something we can report anywhere
        let _ = diagnostic.write_to_stream(source, &self.config, &mut self.stream);
    }
}
