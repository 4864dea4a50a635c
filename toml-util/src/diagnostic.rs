//! Diagnostic rendering: message + clipped source snippet + caret.

use crate::span::Span;

/// A single parse failure: a message plus the span it occurred at.
///
/// `render` produces the human-facing form: the message, the 1-based
/// line/column, a single-line snippet of the surrounding source clipped to
/// 120 characters and centered on the offending position, and a caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

const SNIPPET_WIDTH: usize = 120;

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// Renders this diagnostic against the full source it was raised from.
    pub fn render(&self, source: &str) -> String {
        let clamp = self.span.start.min(source.len());
        let line_start = source[..clamp].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = source[clamp..]
            .find('\n')
            .map(|i| clamp + i)
            .unwrap_or(source.len());
        let raw_line = &source[line_start..line_end];

        let caret_byte_offset = clamp - line_start;
        let caret_char_col = raw_line[..caret_byte_offset]
            .chars()
            .filter(|c| !c.is_control())
            .count();
        let cleaned: String = raw_line.chars().filter(|c| !c.is_control()).collect();

        let (snippet, caret_in_snippet) = clip_centered(&cleaned, caret_char_col, SNIPPET_WIDTH);

        format!(
            "{message} (line: {line}, column: {column})\n{snippet}\n{pad}^-- near here",
            message = self.message,
            line = self.span.line,
            column = self.span.column,
            snippet = snippet,
            pad = " ".repeat(caret_in_snippet),
        )
    }
}

/// Clips `line` to at most `max` characters, keeping `caret` visible and
/// centered when possible. Returns the clipped text and the caret's new
/// character offset within it.
fn clip_centered(line: &str, caret: usize, max: usize) -> (String, usize) {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= max {
        return (line.to_string(), caret.min(chars.len()));
    }
    let half = max / 2;
    let start = caret.saturating_sub(half).min(chars.len() - max);
    let end = start + max;
    let clipped: String = chars[start..end].iter().collect();
    (clipped, caret - start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_short_line_uncropped() {
        let source = "k = !!!";
        let span = Span::new(4, 5, 1, 5);
        let diag = Diagnostic::new("unexpected token", span);
        let rendered = diag.render(source);
        assert!(rendered.contains("unexpected token (line: 1, column: 5)"));
        assert!(rendered.contains("k = !!!"));
        let caret_line = rendered.lines().last().unwrap();
        assert_eq!(caret_line, "    ^-- near here");
    }

    #[test]
    fn strips_control_characters_from_snippet() {
        let source = "k = \x0b1";
        let span = Span::new(5, 6, 1, 6);
        let diag = Diagnostic::new("bad literal", span);
        let rendered = diag.render(source);
        assert!(!rendered.contains('\x0b'));
    }

    #[test]
    fn clips_long_lines_around_the_caret() {
        let padding = "a".repeat(200);
        let source = format!("{padding}!{padding}");
        let caret_pos = padding.len();
        let span = Span::new(caret_pos, caret_pos + 1, 1, caret_pos as u32 + 1);
        let diag = Diagnostic::new("bad char", span);
        let rendered = diag.render(&source);
        let snippet = rendered.lines().nth(1).unwrap();
        assert!(snippet.len() <= SNIPPET_WIDTH);
        assert!(snippet.contains('!'));
    }
}
