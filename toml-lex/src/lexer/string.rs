//! Decoding of the four TOML string forms.

use toml_util::error::StreamReadError;
use toml_util::span::Span;

use crate::cursor::Cursor;

fn err(cursor: &Cursor, token_start: usize, token_start_line: u32, token_start_col: u32, message: impl Into<String>) -> StreamReadError {
    let span = Span::new(token_start, cursor.position(), token_start_line, token_start_col);
    StreamReadError::new(message, span)
}

/// Decodes a basic string (`"..."`) or multi-line basic string (`"""..."""`).
/// The opening delimiter must already be the current character.
pub fn decode_basic_string(
    cursor: &mut Cursor,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<String, StreamReadError> {
    let multiline = cursor.char_at(0) == '"' && cursor.char_at(1) == '"' && cursor.char_at(2) == '"';
    cursor.advance_n(if multiline { 3 } else { 1 });
    if multiline && cursor.current_char() == '\n' {
        cursor.advance();
    }

    let mut out = String::new();
    loop {
        if cursor.is_at_end() {
            return Err(err(cursor, token_start, token_start_line, token_start_col, "unterminated string literal"));
        }
        if multiline && cursor.char_at(0) == '"' && cursor.char_at(1) == '"' && cursor.char_at(2) == '"' {
            cursor.advance_n(3);
            return Ok(out);
        }
        if !multiline && cursor.current_char() == '"' {
            cursor.advance();
            return Ok(out);
        }
        if !multiline && cursor.current_char() == '\n' {
            return Err(err(cursor, token_start, token_start_line, token_start_col, "unterminated string literal"));
        }
        if cursor.current_char() == '\\' {
            cursor.advance();
            if multiline && is_line_ending_backslash(cursor) {
                skip_line_ending_whitespace(cursor);
                continue;
            }
            out.push(decode_escape(cursor, token_start, token_start_line, token_start_col)?);
            continue;
        }
        out.push(cursor.current_char());
        cursor.advance();
    }
}

/// Decodes a literal string (`'...'`) or multi-line literal string
/// (`'''...'''`). No escapes are processed.
pub fn decode_literal_string(
    cursor: &mut Cursor,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<String, StreamReadError> {
    let multiline = cursor.char_at(0) == '\'' && cursor.char_at(1) == '\'' && cursor.char_at(2) == '\'';
    cursor.advance_n(if multiline { 3 } else { 1 });
    if multiline && cursor.current_char() == '\n' {
        cursor.advance();
    }

    let start = cursor.position();
    loop {
        if cursor.is_at_end() {
            return Err(err(cursor, token_start, token_start_line, token_start_col, "unterminated string literal"));
        }
        if multiline && cursor.char_at(0) == '\'' && cursor.char_at(1) == '\'' && cursor.char_at(2) == '\'' {
            let text = cursor.slice_from(start).to_string();
            cursor.advance_n(3);
            return Ok(text);
        }
        if !multiline && cursor.current_char() == '\'' {
            let text = cursor.slice_from(start).to_string();
            cursor.advance();
            return Ok(text);
        }
        if !multiline && cursor.current_char() == '\n' {
            return Err(err(cursor, token_start, token_start_line, token_start_col, "unterminated string literal"));
        }
        cursor.advance();
    }
}

/// True if, after a `\`, the rest of the line is only whitespace before a
/// newline — the multi-line-basic-string line-continuation form.
fn is_line_ending_backslash(cursor: &Cursor) -> bool {
    let mut offset = 0;
    loop {
        match cursor.char_at(offset) {
            ' ' | '\t' => offset += 1,
            '\n' => return true,
            '\r' if cursor.char_at(offset + 1) == '\n' => return true,
            _ => return false,
        }
    }
}

/// Consumes the whitespace run (and the newlines within it) following a
/// line-ending backslash, stopping at the next non-whitespace character.
fn skip_line_ending_whitespace(cursor: &mut Cursor) {
    while !cursor.is_at_end() && cursor.current_char().is_whitespace() {
        cursor.advance();
    }
}

fn decode_escape(
    cursor: &mut Cursor,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<char, StreamReadError> {
    let c = cursor.current_char();
    let decoded = match c {
        'b' => '\u{8}',
        't' => '\t',
        'n' => '\n',
        'f' => '\u{c}',
        'r' => '\r',
        '"' => '"',
        '\\' => '\\',
        'u' => {
            cursor.advance();
            return decode_unicode_escape(cursor, 4, token_start, token_start_line, token_start_col);
        }
        'U' => {
            cursor.advance();
            return decode_unicode_escape(cursor, 8, token_start, token_start_line, token_start_col);
        }
        _ => {
            return Err(err(
                cursor,
                token_start,
                token_start_line,
                token_start_col,
                format!("invalid escape sequence '\\{c}'"),
            ))
        }
    };
    cursor.advance();
    Ok(decoded)
}

fn decode_unicode_escape(
    cursor: &mut Cursor,
    digits: usize,
    token_start: usize,
    token_start_line: u32,
    token_start_col: u32,
) -> Result<char, StreamReadError> {
    let start = cursor.position();
    for _ in 0..digits {
        if !cursor.current_char().is_ascii_hexdigit() {
            return Err(err(
                cursor,
                token_start,
                token_start_line,
                token_start_col,
                format!("expected {digits} hex digits in unicode escape"),
            ));
        }
        cursor.advance();
    }
    let hex = cursor.slice_from(start);
    let code = u32::from_str_radix(hex, 16).map_err(|e| {
        err(cursor, token_start, token_start_line, token_start_col, format!("invalid unicode escape: {e}"))
    })?;
    char::from_u32(code).ok_or_else(|| {
        err(cursor, token_start, token_start_line, token_start_col, "escape does not encode a valid unicode scalar value")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(source: &str, literal: bool) -> Result<String, StreamReadError> {
        let mut cursor = Cursor::new(source);
        if literal {
            decode_literal_string(&mut cursor, 0, 1, 1)
        } else {
            decode_basic_string(&mut cursor, 0, 1, 1)
        }
    }

    #[test]
    fn basic_string_escapes() {
        assert_eq!(decode(r#""a\tb\n""#, false).unwrap(), "a\tb\n");
    }

    #[test]
    fn basic_string_unicode_escape() {
        assert_eq!(decode(r#""é""#, false).unwrap(), "\u{e9}");
    }

    #[test]
    fn multiline_basic_discards_opening_newline() {
        assert_eq!(decode("\"\"\"\nhello\"\"\"", false).unwrap(), "hello");
    }

    #[test]
    fn multiline_basic_line_ending_backslash_trims_whitespace() {
        assert_eq!(decode("\"\"\"a\\\n   b\"\"\"", false).unwrap(), "ab");
    }

    #[test]
    fn literal_string_has_no_escapes() {
        assert_eq!(decode(r"'a\tb'", true).unwrap(), r"a\tb");
    }

    #[test]
    fn unterminated_basic_string_errors() {
        assert!(decode(r#""unterminated"#, false).is_err());
    }

    #[test]
    fn newline_in_single_line_literal_errors() {
        assert!(decode("'a\nb'", true).is_err());
    }
}
