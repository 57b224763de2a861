//! Caret-underline diagnostic rendering.
//!
//! Every lexical, syntactic, or semantic failure produces exactly one
//! [`Diagnostic`], built fluently via [`DiagnosticBuilder`] and rendered
//! against the source text with [`Diagnostic::render`]. There is no
//! diagnostic collection or recovery: the first one raised is fatal.

use std::fmt;

use crate::span::{LineIndex, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
        }
    }
}

/// A single fatal diagnostic: a level, a message, and the span it points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Render the source line with a caret under `self.span`, followed by
    /// the message, matching the layout `error_at` used in the original
    /// implementation this compiler's diagnostics are modeled on.
    pub fn render(&self, source: &str) -> String {
        let index = LineIndex::new(source);
        let (line_no, col) = index.line_col(self.span.start);
        let line_text = index.line_text(source, line_no);
        let width = self.span.len().max(1);

        let mut out = String::new();
        out.push_str(line_text);
        out.push('\n');
        for _ in 0..col.saturating_sub(1) {
            out.push(' ');
        }
        for _ in 0..width {
            out.push('^');
        }
        out.push(' ');
        out.push_str(&self.message);
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Fluent constructor for a [`Diagnostic`].
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: Span::DUMMY,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let d = DiagnosticBuilder::error("invalid token")
            .span(Span::new(4, 5))
            .build();
        assert_eq!(d.level, Level::Error);
        assert_eq!(d.message, "invalid token");
        assert_eq!(d.span, Span::new(4, 5));
    }

    #[test]
    fn render_places_caret_under_offset() {
        let source = "int main(){ @ }";
        let d = DiagnosticBuilder::error("invalid token")
            .span(Span::point(13))
            .build();
        let rendered = d.render(source);
        let mut lines = rendered.lines();
        assert_eq!(lines.next().unwrap(), source);
        let caret_line = lines.next().unwrap();
        assert_eq!(caret_line.find('^'), Some(13));
        assert!(caret_line.ends_with("invalid token"));
    }
}
