//! The mode-driven lexer.

use toml_util::error::StreamReadError;
use toml_util::span::Span;

use crate::cursor::Cursor;
use crate::lexer::number::lex_number_or_datetime;
use crate::lexer::string::{decode_basic_string, decode_literal_string};
use crate::token::{LexState, Token};

/// Converts a character stream into tokens, one mode at a time.
///
/// The caller (the parser) declares the expected `LexState` on every call to
/// `next_token`; the lexer has no notion of "the next token" independent of
/// that declared mode, since the same characters are legal keys in one mode
/// and legal values in another (`2021` is a bare key or an integer
/// depending on where it appears).
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    pub fn source(&self) -> &'a str {
        self.cursor.source()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    /// Produces the next token (with its span) under `state`, or `None` at
    /// true end of input.
    pub fn next_token(&mut self, state: LexState) -> Result<Option<(Token<'a>, Span)>, StreamReadError> {
        match state {
            LexState::ExpectExpression => self.lex_expect_expression(),
            LexState::ExpectEol => {
                self.validate_eol()?;
                self.lex_expect_expression()
            }
            LexState::ExpectInlineKey => self.lex_expect_inline_key(),
            LexState::ExpectValue => self.lex_expect_value(),
            LexState::ExpectArraySep => self.lex_expect_array_sep(),
            LexState::ExpectTableSep => self.lex_expect_table_sep(),
        }
    }

    fn error(&self, token_start: usize, token_start_line: u32, token_start_col: u32, message: impl Into<String>) -> StreamReadError {
        let span = Span::new(token_start, self.cursor.position(), token_start_line, token_start_col);
        StreamReadError::new(message, span)
    }

    fn span_from(&self, start: usize, line: u32, col: u32) -> Span {
        Span::new(start, self.cursor.position(), line, col)
    }

    fn skip_ws_comments_and_newlines(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => self.cursor.advance(),
                '#' => self.skip_comment(),
                _ => break,
            }
        }
    }

    fn skip_inline_ws_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' => self.cursor.advance(),
                '#' => self.skip_comment(),
                _ => break,
            }
        }
    }

    fn skip_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    fn validate_eol(&mut self) -> Result<(), StreamReadError> {
        let token_start = self.cursor.position();
        let (line, col) = (self.cursor.line(), self.cursor.column());
        self.skip_inline_ws_and_comments();
        if self.cursor.is_at_end() {
            return Ok(());
        }
        if self.cursor.current_char() == '\n' {
            self.cursor.advance();
            return Ok(());
        }
        if self.cursor.current_char() == '\r' && self.cursor.peek_char(1) == '\n' {
            self.cursor.advance_n(2);
            return Ok(());
        }
        Err(self.error(token_start, line, col, "expected end of line"))
    }

    fn lex_expect_expression(&mut self) -> Result<Option<(Token<'a>, Span)>, StreamReadError> {
        self.skip_ws_comments_and_newlines();
        if self.cursor.is_at_end() {
            return Ok(None);
        }
        let token_start = self.cursor.position();
        let (line, col) = (self.cursor.line(), self.cursor.column());

        let token = match self.cursor.current_char() {
            '[' if self.cursor.peek_char(1) == '[' => {
                self.cursor.advance_n(2);
                Token::ArrayTableOpen
            }
            '[' => {
                self.cursor.advance();
                Token::StdTableOpen
            }
            '"' => Token::String(decode_basic_string(&mut self.cursor, token_start, line, col)?),
            '\'' => Token::String(decode_literal_string(&mut self.cursor, token_start, line, col)?),
            c if is_bare_key_start(c) => self.lex_unquoted_key(token_start),
            c => return Err(self.error(token_start, line, col, format!("unexpected character '{c}'"))),
        };
        Ok(Some((token, self.span_from(token_start, line, col))))
    }

    fn lex_expect_inline_key(&mut self) -> Result<Option<(Token<'a>, Span)>, StreamReadError> {
        self.skip_inline_ws_and_comments();
        if self.cursor.is_at_end() {
            return Ok(None);
        }
        let token_start = self.cursor.position();
        let (line, col) = (self.cursor.line(), self.cursor.column());

        let token = match self.cursor.current_char() {
            '.' => {
                self.cursor.advance();
                Token::DotSep
            }
            '=' => {
                self.cursor.advance();
                Token::KeyValSep
            }
            ']' if self.cursor.peek_char(1) == ']' => {
                self.cursor.advance_n(2);
                Token::ArrayTableClose
            }
            ']' => {
                self.cursor.advance();
                Token::StdTableClose
            }
            '}' => {
                self.cursor.advance();
                Token::InlineTableClose
            }
            '"' => Token::String(decode_basic_string(&mut self.cursor, token_start, line, col)?),
            '\'' => Token::String(decode_literal_string(&mut self.cursor, token_start, line, col)?),
            c if is_bare_key_start(c) => self.lex_unquoted_key(token_start),
            c => return Err(self.error(token_start, line, col, format!("unexpected character '{c}' in key"))),
        };
        Ok(Some((token, self.span_from(token_start, line, col))))
    }

    fn lex_expect_value(&mut self) -> Result<Option<(Token<'a>, Span)>, StreamReadError> {
        self.skip_ws_comments_and_newlines();
        if self.cursor.is_at_end() {
            return Ok(None);
        }
        let token_start = self.cursor.position();
        let (line, col) = (self.cursor.line(), self.cursor.column());

        let token = match self.cursor.current_char() {
            '"' => Token::String(decode_basic_string(&mut self.cursor, token_start, line, col)?),
            '\'' => Token::String(decode_literal_string(&mut self.cursor, token_start, line, col)?),
            '[' => {
                self.cursor.advance();
                Token::ArrayOpen
            }
            ']' => {
                self.cursor.advance();
                Token::ArrayClose
            }
            '{' => {
                self.cursor.advance();
                Token::InlineTableOpen
            }
            c if c.is_ascii_digit() || c == '+' || c == '-' || c == 'i' || c == 'n' => {
                lex_number_or_datetime(&mut self.cursor, token_start, line, col)?
            }
            't' if self.cursor.match_str("true") => Token::True,
            'f' if self.cursor.match_str("false") => Token::False,
            c => return Err(self.error(token_start, line, col, format!("unexpected character '{c}', expected a value"))),
        };
        Ok(Some((token, self.span_from(token_start, line, col))))
    }

    fn lex_expect_array_sep(&mut self) -> Result<Option<(Token<'a>, Span)>, StreamReadError> {
        self.skip_ws_comments_and_newlines();
        if self.cursor.is_at_end() {
            return Ok(None);
        }
        let token_start = self.cursor.position();
        let (line, col) = (self.cursor.line(), self.cursor.column());
        let token = match self.cursor.current_char() {
            ',' => {
                self.cursor.advance();
                Token::Comma
            }
            ']' => {
                self.cursor.advance();
                Token::ArrayClose
            }
            c => return Err(self.error(token_start, line, col, format!("unexpected character '{c}', expected ',' or ']'"))),
        };
        Ok(Some((token, self.span_from(token_start, line, col))))
    }

    fn lex_expect_table_sep(&mut self) -> Result<Option<(Token<'a>, Span)>, StreamReadError> {
        self.skip_inline_ws_and_comments();
        if self.cursor.is_at_end() {
            return Ok(None);
        }
        let token_start = self.cursor.position();
        let (line, col) = (self.cursor.line(), self.cursor.column());
        let token = match self.cursor.current_char() {
            ',' => {
                self.cursor.advance();
                Token::Comma
            }
            '}' => {
                self.cursor.advance();
                Token::InlineTableClose
            }
            '\n' => return Err(self.error(token_start, line, col, "newline not permitted inside an inline table")),
            c => return Err(self.error(token_start, line, col, format!("unexpected character '{c}', expected ',' or '}}'"))),
        };
        Ok(Some((token, self.span_from(token_start, line, col))))
    }

    fn lex_unquoted_key(&mut self, start: usize) -> Token<'a> {
        while is_bare_key_char(self.cursor.current_char()) {
            self.cursor.advance();
        }
        Token::UnquotedKey(self.cursor.slice_from(start))
    }
}

fn is_bare_key_start(c: char) -> bool {
    is_bare_key_char(c)
}

fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_token(source: &str) -> Token {
        Lexer::new(source).next_token(LexState::ExpectValue).unwrap().unwrap().0
    }

    #[test]
    fn bare_booleans() {
        assert_eq!(value_token("true"), Token::True);
        assert_eq!(value_token("false"), Token::False);
    }

    #[test]
    fn unsigned_inf_and_nan_reach_the_number_lexer() {
        assert_eq!(value_token("inf"), Token::Float("inf"));
        assert_eq!(value_token("nan"), Token::Float("nan"));
    }

    #[test]
    fn std_table_header_vs_array_table_header() {
        let mut lexer = Lexer::new("[[a]]");
        assert_eq!(lexer.next_token(LexState::ExpectExpression).unwrap().unwrap().0, Token::ArrayTableOpen);
        let mut lexer = Lexer::new("[a]");
        assert_eq!(lexer.next_token(LexState::ExpectExpression).unwrap().unwrap().0, Token::StdTableOpen);
    }

    #[test]
    fn eol_state_rejects_trailing_garbage() {
        let mut lexer = Lexer::new("1 garbage");
        lexer.next_token(LexState::ExpectValue).unwrap();
        assert!(lexer.next_token(LexState::ExpectEol).is_err());
    }
}
