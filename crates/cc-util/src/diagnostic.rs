//! Diagnostic reporting.
//!
//! Every stage (lexer, parser, checker) reports failures through a
//! [`Handler`] rather than panicking. The front-end is fail-fast (per its
//! error-handling design, diagnostics are never used for multi-error
//! recovery): callers check [`Handler::has_errors`] immediately after each
//! sub-operation and stop at the first failure. The `Handler` still keeps a
//! `Vec` rather than a single `Option<Diagnostic>` so the driver can report
//! whichever diagnostic was emitted without every caller threading one back
//! up by hand.

use std::fmt;

use crate::Span;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    Error,
}

impl Level {
    pub const fn name(&self) -> &'static str {
        match self {
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single reported diagnostic: a level, a message, and the source
/// position it concerns.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({}:{})", self.level, self.message, self.span.line, self.span.column)
    }
}

/// Builds a [`Diagnostic`] fluently before handing it to a [`Handler`].
///
/// # Examples
///
/// ```
/// use cc_util::{DiagnosticBuilder, Handler, Span};
///
/// let mut handler = Handler::new();
/// DiagnosticBuilder::error("unexpected token")
///     .span(Span::new(0, 1, 1, 1))
///     .emit(&mut handler);
/// assert!(handler.has_errors());
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
}

impl DiagnosticBuilder {
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: Level::Error, message: message.into(), span: Span::DUMMY }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic { level: self.level, message: self.message, span: self.span }
    }

    pub fn emit(self, handler: &mut Handler) {
        handler.report(self.build());
    }
}

/// Collects diagnostics emitted during a compilation run.
#[derive(Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Self { diagnostics: Vec::new() }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The first diagnostic reported, if any — fail-fast reporting means
    /// this is always the only one a caller needs.
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }

    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
