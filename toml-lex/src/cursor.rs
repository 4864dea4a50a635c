//! Character cursor for traversing TOML source text.
//!
//! Maintains position state while iterating through source characters,
//! handling UTF-8 correctly and tracking line/column for diagnostics.

/// A cursor for traversing source text character by character.
///
/// # Example
///
/// ```
/// use toml_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("key = 1");
/// assert_eq!(cursor.current_char(), 'k');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), 'e');
/// ```
pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Character at the cursor, or `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.char_at(0)
    }

    /// Character at `offset` bytes ahead of the cursor.
    #[inline]
    pub fn char_at(&self, offset: usize) -> char {
        let pos = self.position + offset;
        if pos >= self.source.len() {
            return '\0';
        }
        let b = self.source.as_bytes()[pos];
        if b < 128 {
            return b as char;
        }
        self.source[pos..].chars().next().unwrap_or('\0')
    }

    #[inline]
    pub fn peek_char(&self, offset: usize) -> char {
        self.char_at(offset)
    }

    /// Advances past the current character, updating line/column.
    #[inline]
    pub fn advance(&mut self) {
        if self.position >= self.source.len() {
            return;
        }
        let b = self.source.as_bytes()[self.position];
        if b < 128 {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            return;
        }
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    pub fn advance_n(&mut self, count: usize) {
        for _ in 0..count {
            if self.is_at_end() {
                break;
            }
            self.advance();
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Consumes `expected` if it is the current character.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes `text` literally, or leaves the cursor untouched.
    pub fn match_str(&mut self, text: &str) -> bool {
        if self.remaining().starts_with(text) {
            self.advance_n(text.chars().count());
            true
        } else {
            false
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Slice of the source from `start` to the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    pub position: usize,
    pub line: u32,
    pub column: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_through_ascii() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.current_char(), 'a');
        cursor.advance();
        assert_eq!(cursor.current_char(), 'b');
        cursor.advance();
        assert_eq!(cursor.current_char(), 'c');
        cursor.advance();
        assert_eq!(cursor.current_char(), '\0');
    }

    #[test]
    fn advances_through_utf8() {
        let mut cursor = Cursor::new("αβγ");
        assert_eq!(cursor.current_char(), 'α');
        cursor.advance();
        assert_eq!(cursor.current_char(), 'β');
    }

    #[test]
    fn tracks_line_and_column() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.advance_n(3);
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn match_str_consumes_on_success_only() {
        let mut cursor = Cursor::new("true false");
        assert!(cursor.match_str("true"));
        assert_eq!(cursor.position(), 4);
        assert!(!cursor.match_str("true"));
    }

    #[test]
    fn snapshot_and_restore_roundtrip() {
        let mut cursor = Cursor::new("abcdef");
        let snap = cursor.snapshot();
        cursor.advance_n(4);
        cursor.restore(snap);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.current_char(), 'a');
    }
}
