use std::io;

use termcolor::{ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::source::Source;
use super::{Config, Diagnostic, DiagnosticKind, Snippet, SnippetKind};

impl Diagnostic {
    pub fn write_to_stream(
        &self,
        source: &Source,
        config: &Config,
        stream: &mut impl WriteColor,
    ) -> io::Result<()> {
        DiagnosticWriter {
            diagnostic: self,
            source,
            stream,
            config,
        }
        .draw_all()
    }
}

struct DiagnosticWriter<'stream, 'a, W: WriteColor> {
    diagnostic: &'a Diagnostic,
    source: &'a Source,

    stream: &'stream mut W,
    config: &'a Config,
}

impl<'a, W: WriteColor> DiagnosticWriter<'_, 'a, W> {
    fn draw_all(mut self) -> io::Result<()> {
        self.draw_header()?;

        let mut snippets: Vec<&Snippet> = self.diagnostic.snippets.iter().collect();
        snippets.sort_by_key(|snippet| snippet.span.start);

        for snippet in snippets {
            self.draw_snippet(snippet)?;
        }

        writeln!(self.stream)
    }

    fn draw_header(&mut self) -> io::Result<()> {
        self.stream.set_color(self.primary_color())?;
        write!(self.stream, "{}", self.diagnostic.kind.as_str())?;
        self.stream.reset()?;

        match &self.diagnostic.message {
            Some(message) => writeln!(self.stream, ": {message}"),
            None => writeln!(self.stream),
        }
    }

    fn draw_snippet(&mut self, snippet: &Snippet) -> io::Result<()> {
        // spans at EOF point one past the last byte
        let start = snippet.span.start.min(self.source.text().len());
        let line = self.source.byte_to_line_index(start).unwrap_or(0);
        let line_start = self.source.line_to_byte(line).unwrap_or(0);
        let line_str = self.source.line_str(line).unwrap_or("");

        let first_line = line.saturating_sub(self.config.context_lines);
        let last_line = (line + self.config.context_lines).min(self.source.num_lines() - 1);
        let line_num_width = 1 + (last_line + 1).ilog10() as usize;

        self.stream.set_color(&self.config.gutter_color)?;
        write!(self.stream, "{:>line_num_width$}--> ", "")?;
        self.stream.reset()?;
        writeln!(
            self.stream,
            "{}:{}:{}",
            self.source.name(),
            line + 1,
            start - line_start + 1
        )?;

        self.draw_gutter(None, line_num_width)?;
        writeln!(self.stream)?;

        for index in first_line..=last_line {
            self.draw_gutter(Some(index + 1), line_num_width)?;
            let text = self.expand_tabs(self.source.line_str(index).unwrap_or(""));
            if text.is_empty() {
                writeln!(self.stream)?;
            } else {
                writeln!(self.stream, " {text}")?;
            }

            if index == line {
                // a span may begin on a line terminator, which is not part of `line_str`
                let start_in_line = (start - line_start).min(line_str.len());
                let line_end = line_start + line_str.len();
                let inside_start = line_start + start_in_line;

                let before = &line_str[..start_in_line];
                let inside =
                    &self.source.text()[inside_start..snippet.span.end.clamp(inside_start, line_end)];

                let offset = self.str_width(before);
                let width = self.str_width(inside).max(1);

                self.draw_gutter(None, line_num_width)?;
                self.stream.set_color(self.snippet_color(snippet.kind))?;

                let underline = match snippet.kind {
                    SnippetKind::Primary => self.config.primary_underline,
                    SnippetKind::Secondary => self.config.secondary_underline,
                };
                let marks: String = std::iter::repeat(underline).take(width).collect();
                write!(self.stream, " {:offset$}{marks}", "")?;

                if !snippet.label.is_empty() {
                    write!(self.stream, " {}", snippet.label)?;
                }

                self.stream.reset()?;
                writeln!(self.stream)?;
            }
        }

        Ok(())
    }

    fn draw_gutter(&mut self, line: Option<usize>, line_num_width: usize) -> io::Result<()> {
        self.stream.set_color(&self.config.gutter_color)?;

        match line {
            Some(line) => write!(self.stream, "{line:>line_num_width$} {}", self.config.gutter)?,
            None => write!(self.stream, "{:>line_num_width$} {}", "", self.config.gutter)?,
        }

        self.stream.reset()
    }

    fn expand_tabs(&self, s: &str) -> String {
        s.replace('\t', &" ".repeat(self.config.tab_width))
    }

    fn str_width(&self, s: &str) -> usize {
        let num_tabs = s.chars().filter(|&ch| ch == '\t').count();
        s.width() + num_tabs * self.config.tab_width
    }

    fn primary_color(&self) -> &'a ColorSpec {
        match self.diagnostic.kind {
            DiagnosticKind::Warning => &self.config.warning_color,
            DiagnosticKind::Error => &self.config.error_color,
        }
    }

    fn snippet_color(&self, kind: SnippetKind) -> &'a ColorSpec {
        match kind {
            SnippetKind::Primary => self.primary_color(),
            SnippetKind::Secondary => &self.config.secondary_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use crate::source::Source;
    use crate::{Config, Diagnostic, Snippet};

    #[must_use]
    fn diagnostic_to_string(diagnostic: &Diagnostic, source: &Source) -> String {
        let config = Config::default();
        let mut stream = NoColor::new(vec![]);

        diagnostic
            .write_to_stream(source, &config, &mut stream)
            .unwrap();

        String::from_utf8(stream.into_inner()).unwrap()
    }

    #[test]
    fn single_line_snippet() {
        let source = Source::new("test", "let = 5;");
        let diagnostic = Diagnostic::error()
            .with_message("expected next token to be IDENT, got =")
            .with_snippet(Snippet::primary("unexpected token", 4..5));

        assert_eq!(
            diagnostic_to_string(&diagnostic, &source),
            "error: expected next token to be IDENT, got =\n\
             \x20--> test:1:5\n\
             \x20 |\n\
             1 | let = 5;\n\
             \x20 |     ^ unexpected token\n\
             \n"
        );
    }

    #[test]
    fn context_lines_and_wide_underline() {
        let source = Source::new("test", "let a = 1;\nlet b = 99999;\nlet c = 3;");
        let diagnostic =
            Diagnostic::warning().with_snippet(Snippet::secondary("this literal", 19..24));

        assert_eq!(
            diagnostic_to_string(&diagnostic, &source),
            "warning\n\
             \x20--> test:2:9\n\
             \x20 |\n\
             1 | let a = 1;\n\
             2 | let b = 99999;\n\
             \x20 |         ----- this literal\n\
             3 | let c = 3;\n\
             \n"
        );
    }

    #[test]
    fn snippet_at_end_of_input() {
        let source = Source::new("test", "fn(x) {");
        let diagnostic = Diagnostic::error().with_snippet(Snippet::primary("here", 7..7));

        let rendered = diagnostic_to_string(&diagnostic, &source);
        assert!(rendered.contains("--> test:1:8"));
        assert!(rendered.contains("        ^ here"));
    }
}
