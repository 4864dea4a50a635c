//! Shape classification of numeric and date-time tokens.
//!
//! The lexer only recognizes the *shape* of these literals; converting
//! digits to a numeric value (with its width-promotion rules) is the
//! parser's job.

use toml_util::error::StreamReadError;
use toml_util::span::Span;

use crate::cursor::Cursor;
use crate::token::Token;

fn err(cursor: &Cursor, token_start: usize, token_start_line: u32, token_start_col: u32, message: impl Into<String>) -> StreamReadError {
    let span = Span::new(token_start, cursor.position(), token_start_line, token_start_col);
    StreamReadError::new(message, span)
}

/// Lexes a numeric or date-time token starting at the cursor's current
/// position, which must be a digit, `+`, or `-`.
pub fn lex_number_or_datetime<'a>(
    cursor: &mut Cursor<'a>,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<Token<'a>, StreamReadError> {
    let start = cursor.position();
    let signed = matches!(cursor.current_char(), '+' | '-');
    if signed {
        cursor.advance();
    }

    if cursor.match_str("inf") || cursor.match_str("nan") {
        return Ok(Token::Float(cursor.slice_from(start)));
    }

    if !signed && cursor.current_char() == '0' && matches!(cursor.peek_char(1), 'x' | 'X' | 'o' | 'O' | 'b' | 'B') {
        return lex_prefixed_integer(cursor, start, token_start, token_start_line, token_start_col);
    }

    if signed && cursor.current_char() == '0' && matches!(cursor.peek_char(1), 'x' | 'X' | 'o' | 'O' | 'b' | 'B') {
        return Err(err(
            cursor,
            token_start,
            token_start_line,
            token_start_col,
            "base prefix not permitted with a sign",
        ));
    }

    if !signed {
        if looks_like_date(cursor) {
            return lex_date_or_date_time(cursor, start, token_start, token_start_line, token_start_col);
        }
        if looks_like_time(cursor) {
            lex_partial_time(cursor, token_start, token_start_line, token_start_col)?;
            return Ok(Token::LocalTime(cursor.slice_from(start)));
        }
    }

    lex_decimal_number(cursor, start, token_start, token_start_line, token_start_col)
}

fn lex_prefixed_integer<'a>(
    cursor: &mut Cursor<'a>,
    start: usize,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<Token<'a>, StreamReadError> {
    let base_char = cursor.peek_char(1);
    cursor.advance_n(2);
    let digits_start = cursor.position();
    let is_digit: fn(char) -> bool = match base_char.to_ascii_lowercase() {
        'x' => |c: char| c.is_ascii_hexdigit(),
        'o' => |c: char| matches!(c, '0'..='7'),
        'b' => |c: char| matches!(c, '0' | '1'),
        _ => unreachable!(),
    };
    while matches!(cursor.current_char(), c if c == '_' || is_digit(c)) {
        cursor.advance();
    }
    if cursor.position() == digits_start {
        return Err(err(
            cursor,
            token_start,
            token_start_line,
            token_start_col,
            format!("no digits after base-{} prefix", base_char),
        ));
    }
    Ok(Token::Integer(cursor.slice_from(start)))
}

fn lex_decimal_number<'a>(
    cursor: &mut Cursor<'a>,
    start: usize,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<Token<'a>, StreamReadError> {
    let digits_start = cursor.position();
    while matches!(cursor.current_char(), c if c.is_ascii_digit() || c == '_') {
        cursor.advance();
    }
    if cursor.position() == digits_start {
        return Err(err(cursor, token_start, token_start_line, token_start_col, "expected a digit"));
    }

    let mut is_float = false;
    if cursor.current_char() == '.' && cursor.peek_char(1).is_ascii_digit() {
        is_float = true;
        cursor.advance();
        while matches!(cursor.current_char(), c if c.is_ascii_digit() || c == '_') {
            cursor.advance();
        }
    }

    if matches!(cursor.current_char(), 'e' | 'E') {
        is_float = true;
        cursor.advance();
        if matches!(cursor.current_char(), '+' | '-') {
            cursor.advance();
        }
        let exp_start = cursor.position();
        while matches!(cursor.current_char(), c if c.is_ascii_digit() || c == '_') {
            cursor.advance();
        }
        if cursor.position() == exp_start {
            return Err(err(cursor, token_start, token_start_line, token_start_col, "no digits in float exponent"));
        }
    }

    let text = cursor.slice_from(start);
    Ok(if is_float { Token::Float(text) } else { Token::Integer(text) })
}

fn looks_like_date(cursor: &Cursor) -> bool {
    (0..4).all(|i| cursor.char_at(i).is_ascii_digit())
        && cursor.char_at(4) == '-'
        && (5..7).all(|i| cursor.char_at(i).is_ascii_digit())
        && cursor.char_at(7) == '-'
        && (8..10).all(|i| cursor.char_at(i).is_ascii_digit())
}

fn looks_like_time(cursor: &Cursor) -> bool {
    cursor.char_at(0).is_ascii_digit() && cursor.char_at(1).is_ascii_digit() && cursor.char_at(2) == ':'
}

fn lex_date_or_date_time<'a>(
    cursor: &mut Cursor<'a>,
    start: usize,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<Token<'a>, StreamReadError> {
    cursor.advance_n(10); // YYYY-MM-DD

    let sep = cursor.current_char();
    let next_is_time = matches!(sep, 'T' | 't') || (sep == ' ' && cursor.peek_char(1).is_ascii_digit() && cursor.peek_char(2).is_ascii_digit() && cursor.peek_char(3) == ':');
    if !next_is_time {
        return Ok(Token::LocalDate(cursor.slice_from(start)));
    }

    cursor.advance(); // the separator
    let has_offset = lex_partial_time(cursor, token_start, token_start_line, token_start_col)?;
    let text = cursor.slice_from(start);
    Ok(if has_offset {
        Token::OffsetDateTime(text)
    } else {
        Token::LocalDateTime(text)
    })
}

/// Consumes `HH:MM:SS[.fraction][offset]`. Returns whether an offset was
/// present (only meaningful when a date precedes the time).
fn lex_partial_time(
    cursor: &mut Cursor,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<bool, StreamReadError> {
    let expect_colon_digits = |cursor: &mut Cursor| -> Result<(), StreamReadError> {
        if cursor.current_char() != ':' || !cursor.peek_char(1).is_ascii_digit() || !cursor.peek_char(2).is_ascii_digit() {
            return Err(err(cursor, token_start, token_start_line, token_start_col, "malformed time literal"));
        }
        cursor.advance_n(3);
        Ok(())
    };

    if !cursor.current_char().is_ascii_digit() || !cursor.peek_char(1).is_ascii_digit() {
        return Err(err(cursor, token_start, token_start_line, token_start_col, "malformed time literal"));
    }
    cursor.advance_n(2); // HH
    expect_colon_digits(cursor)?; // :MM
    expect_colon_digits(cursor)?; // :SS

    if cursor.current_char() == '.' && cursor.peek_char(1).is_ascii_digit() {
        cursor.advance();
        while cursor.current_char().is_ascii_digit() {
            cursor.advance();
        }
    }

    if matches!(cursor.current_char(), 'Z' | 'z') {
        cursor.advance();
        return Ok(true);
    }
    if matches!(cursor.current_char(), '+' | '-') && cursor.peek_char(1).is_ascii_digit() && cursor.peek_char(2).is_ascii_digit() {
        cursor.advance_n(3);
        if cursor.current_char() == ':' && cursor.peek_char(1).is_ascii_digit() && cursor.peek_char(2).is_ascii_digit() {
            cursor.advance_n(3);
        }
        return Ok(true);
    }
    Ok(false)
}
