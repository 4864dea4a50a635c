//! The parser's single error kind.

use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::span::Span;

/// The one error kind the parser can produce: a failed read of the token
/// stream, at some point in the source, for some reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", .0.message)]
pub struct StreamReadError(pub Diagnostic);

impl StreamReadError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self(Diagnostic::new(message, span))
    }

    pub fn span(&self) -> Span {
        self.0.span
    }

    /// Renders the full message + snippet + caret against `source`.
    pub fn render(&self, source: &str) -> String {
        self.0.render(source)
    }
}

pub type ParseResult<T> = std::result::Result<T, StreamReadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = StreamReadError::new("unexpected token", Span::point(0, 1, 1));
        assert_eq!(err.to_string(), "unexpected token");
    }
}
