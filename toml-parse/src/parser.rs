//! Token-driven construction of the builder tree.

use indexmap::IndexMap;
use toml_lex::{LexState, Lexer, Token};
use toml_util::error::StreamReadError;
use toml_util::span::Span;

use crate::builder::{ArrayBuilder, Builder, ObjectBuilder, Scalar};
use crate::numeric;
use crate::value::{Number, Value};

/// Drives the lexer, enforcing TOML's grammar, and assembles the builder
/// tree. Maintains a single one-token lookahead (`current`); every
/// consumption goes through [`Parser::poll`], which returns the token being
/// consumed and pre-fetches the one after it under the caller-supplied
/// [`LexState`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Option<Token<'a>>,
    current_span: Span,
    root: ObjectBuilder,
    /// Dotted path, from the document root, of the table currently being
    /// appended to by bare `key = value` statements. Empty means the root
    /// table itself.
    current_path: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum WalkMode {
    /// Std table header (`[a.b]`): only the final component is checked for
    /// redefinition and marked `defined`; intermediates are left unmarked
    /// so a later explicit header for one of them remains legal.
    TableHeaderFinal,
    /// Dotted-key assignment prefix (`a.b = 1`'s `a`): every component is
    /// marked `defined`, since dotted assignments define all prefix
    /// tables. No redefinition check — re-using a prefix is expected.
    AssignmentPrefix,
    /// Plain navigation with no marking: resolving an already-established
    /// current table, or the parent path of an array-of-tables header.
    Unmarked,
}

pub fn parse(source: &str) -> Result<Value, StreamReadError> {
    let mut parser = Parser::new(source)?;
    parser.parse_document()
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Result<Self, StreamReadError> {
        let mut lexer = Lexer::new(source);
        let (current, current_span) = match lexer.next_token(LexState::ExpectExpression)? {
            Some((tok, span)) => (Some(tok), span),
            None => (None, Span::point(0, 1, 1)),
        };
        Ok(Self {
            lexer,
            current,
            current_span,
            root: ObjectBuilder::new(),
            current_path: Vec::new(),
        })
    }

    /// Returns the token currently held as lookahead, then asks the lexer
    /// for the following one under `next_state`.
    fn poll(&mut self, next_state: LexState) -> Result<Option<Token<'a>>, StreamReadError> {
        let returned = self.current.take();
        match self.lexer.next_token(next_state)? {
            Some((token, span)) => {
                self.current = Some(token);
                self.current_span = span;
            }
            None => {
                self.current = None;
                self.current_span = Span::point(self.lexer.position(), self.lexer.line(), self.lexer.column());
            }
        }
        Ok(returned)
    }

    fn error_here(&self, message: impl Into<String>) -> StreamReadError {
        StreamReadError::new(message, self.current_span)
    }

    fn parse_document(&mut self) -> Result<Value, StreamReadError> {
        loop {
            match self.current.as_ref() {
                None => break,
                Some(Token::StdTableOpen) => self.parse_table_header(false)?,
                Some(Token::ArrayTableOpen) => self.parse_table_header(true)?,
                Some(Token::UnquotedKey(_)) | Some(Token::String(_)) => self.parse_top_level_assignment()?,
                Some(other) => {
                    return Err(self.error_here(format!("unexpected token {other:?}, expected a key or table header")));
                }
            }
        }
        let root = std::mem::replace(&mut self.root, ObjectBuilder::new());
        Ok(Builder::Object(root).finalize())
    }

    fn parse_table_header(&mut self, is_array: bool) -> Result<(), StreamReadError> {
        self.poll(LexState::ExpectInlineKey)?; // consume '[' or '[['
        let (path, span) = self.parse_key_components()?;
        self.expect_table_close(is_array)?;
        if is_array {
            self.handle_array_table_header(path, span)
        } else {
            self.handle_std_table_header(path, span)
        }
    }

    fn expect_table_close(&mut self, is_array: bool) -> Result<(), StreamReadError> {
        let matched = match self.current.as_ref() {
            Some(Token::ArrayTableClose) => is_array,
            Some(Token::StdTableClose) => !is_array,
            _ => false,
        };
        if !matched {
            let desc = if is_array { "']]'" } else { "']'" };
            return Err(self.error_here(format!("unexpected token {:?}, expected {desc}", self.current)));
        }
        self.poll(LexState::ExpectEol)?;
        Ok(())
    }

    fn parse_top_level_assignment(&mut self) -> Result<(), StreamReadError> {
        let (key_parts, span) = self.parse_key_components()?;
        self.expect_key_val_sep()?;
        let value = self.parse_value(LexState::ExpectEol)?;
        self.insert_into_current(&key_parts, value, span)
    }

    /// Parses a dotted key. The first component is whatever token is
    /// already held as lookahead (the caller peeked it to decide to parse a
    /// key in the first place).
    fn parse_key_components(&mut self) -> Result<(Vec<String>, Span), StreamReadError> {
        let start_span = self.current_span;
        let mut parts = Vec::new();
        loop {
            let span = self.current_span;
            let component = match self.poll(LexState::ExpectInlineKey)? {
                Some(Token::UnquotedKey(s)) => s.to_string(),
                Some(Token::String(s)) => s,
                Some(other) => return Err(StreamReadError::new(format!("unexpected token {other:?}, expected a key"), span)),
                None => return Err(StreamReadError::new("expected a key, found end of input", span)),
            };
            parts.push(component);
            match self.current.as_ref() {
                Some(Token::DotSep) => {
                    self.poll(LexState::ExpectInlineKey)?;
                    continue;
                }
                _ => break,
            }
        }
        Ok((parts, start_span))
    }

    fn expect_key_val_sep(&mut self) -> Result<(), StreamReadError> {
        match self.current.as_ref() {
            Some(Token::KeyValSep) => {
                self.poll(LexState::ExpectValue)?;
                Ok(())
            }
            Some(other) => Err(self.error_here(format!("unexpected token {other:?}, expected '='"))),
            None => Err(self.error_here("expected '=', found end of input")),
        }
    }

    fn parse_value(&mut self, after: LexState) -> Result<Builder, StreamReadError> {
        let span = self.current_span;
        match self.current.as_ref() {
            Some(Token::ArrayOpen) => {
                self.poll(LexState::ExpectValue)?;
                self.parse_array_body(after)
            }
            Some(Token::InlineTableOpen) => {
                self.poll(LexState::ExpectInlineKey)?;
                self.parse_inline_table_body(after)
            }
            Some(_) => {
                let token = self.poll(after)?.expect("peeked Some above");
                scalar_builder_from_token(token, span)
            }
            None => Err(StreamReadError::new("expected a value, found end of input", span)),
        }
    }

    fn parse_array_body(&mut self, after: LexState) -> Result<Builder, StreamReadError> {
        let mut array = ArrayBuilder::new();
        loop {
            if matches!(self.current, Some(Token::ArrayClose)) {
                self.poll(after)?;
                array.closed = true;
                return Ok(Builder::Array(array));
            }
            let value = self.parse_value(LexState::ExpectArraySep)?;
            array.elements.push(value);
            match self.current.as_ref() {
                Some(Token::Comma) => {
                    self.poll(LexState::ExpectValue)?;
                }
                Some(Token::ArrayClose) => {
                    self.poll(after)?;
                    array.closed = true;
                    return Ok(Builder::Array(array));
                }
                Some(other) => return Err(self.error_here(format!("unexpected token {other:?}, expected ',' or ']'"))),
                None => return Err(self.error_here("unterminated array")),
            }
        }
    }

    fn parse_inline_table_body(&mut self, after: LexState) -> Result<Builder, StreamReadError> {
        let mut object = ObjectBuilder::new();
        if matches!(self.current, Some(Token::InlineTableClose)) {
            self.poll(after)?;
            object.closed = true;
            object.defined = true;
            return Ok(Builder::Object(object));
        }
        loop {
            self.parse_inline_table_entry(&mut object)?;
            match self.current.as_ref() {
                Some(Token::Comma) => {
                    self.poll(LexState::ExpectInlineKey)?;
                    if matches!(self.current, Some(Token::InlineTableClose)) {
                        return Err(self.error_here("Trailing comma not permitted for inline tables"));
                    }
                }
                Some(Token::InlineTableClose) => {
                    self.poll(after)?;
                    object.closed = true;
                    object.defined = true;
                    return Ok(Builder::Object(object));
                }
                Some(other) => return Err(self.error_here(format!("unexpected token {other:?}, expected ',' or '}}'"))),
                None => return Err(self.error_here("unterminated inline table")),
            }
        }
    }

    fn parse_inline_table_entry(&mut self, object: &mut ObjectBuilder) -> Result<(), StreamReadError> {
        let (key_parts, span) = self.parse_key_components()?;
        self.expect_key_val_sep()?;
        let value = self.parse_value(LexState::ExpectTableSep)?;
        let (prefix, leaf) = key_parts.split_at(key_parts.len() - 1);
        let target = walk_dotted_path(object, prefix, WalkMode::AssignmentPrefix, span)?;
        set_leaf(target, &leaf[0], value, span)
    }

    fn insert_into_current(&mut self, key_parts: &[String], value: Builder, span: Span) -> Result<(), StreamReadError> {
        let current_path = self.current_path.clone();
        tracing::trace!(path = ?current_path, key = ?key_parts, "resolving dotted-key assignment");
        let base = walk_dotted_path(&mut self.root, &current_path, WalkMode::Unmarked, span)?;
        let (prefix, leaf) = key_parts.split_at(key_parts.len() - 1);
        let target = walk_dotted_path(base, prefix, WalkMode::AssignmentPrefix, span)?;
        set_leaf(target, &leaf[0], value, span)
    }

    fn handle_std_table_header(&mut self, path: Vec<String>, span: Span) -> Result<(), StreamReadError> {
        tracing::trace!(path = ?path, "resolving table header");
        walk_dotted_path(&mut self.root, &path, WalkMode::TableHeaderFinal, span)?;
        self.current_path = path;
        Ok(())
    }

    fn handle_array_table_header(&mut self, path: Vec<String>, span: Span) -> Result<(), StreamReadError> {
        tracing::trace!(path = ?path, "resolving array-of-tables header");
        let (prefix, final_key) = path.split_at(path.len() - 1);
        let parent = walk_dotted_path(&mut self.root, prefix, WalkMode::Unmarked, span)?;
        if parent.closed {
            return Err(StreamReadError::new("cannot extend a closed table", span));
        }
        let final_key = &final_key[0];
        let entry = parent
            .entries
            .entry(final_key.clone())
            .or_insert_with(|| Builder::Array(ArrayBuilder::new()));
        let array = entry
            .as_array_mut()
            .ok_or_else(|| StreamReadError::new(format!("'{final_key}' is not an array of tables"), span))?;
        if array.closed {
            return Err(StreamReadError::new("array already closed", span));
        }
        array.elements.push(Builder::Object(ObjectBuilder {
            entries: IndexMap::new(),
            closed: false,
            defined: true,
        }));
        self.current_path = path;
        Ok(())
    }
}

fn set_leaf(target: &mut ObjectBuilder, leaf_key: &str, value: Builder, span: Span) -> Result<(), StreamReadError> {
    if target.closed {
        return Err(StreamReadError::new("cannot extend a closed table", span));
    }
    if target.entries.contains_key(leaf_key) {
        return Err(StreamReadError::new(format!("duplicate key '{leaf_key}'"), span));
    }
    target.entries.insert(leaf_key.to_string(), value);
    Ok(())
}

fn scalar_builder_from_token(token: Token<'_>, span: Span) -> Result<Builder, StreamReadError> {
    match token {
        Token::String(s) => Ok(Builder::Scalar(Scalar::String(s))),
        Token::True => Ok(Builder::Scalar(Scalar::Bool(true))),
        Token::False => Ok(Builder::Scalar(Scalar::Bool(false))),
        Token::OffsetDateTime(t) | Token::LocalDateTime(t) | Token::LocalDate(t) | Token::LocalTime(t) => {
            Ok(Builder::Scalar(Scalar::String(normalize_datetime(t))))
        }
        Token::Float(t) => numeric::decode_float(t)
            .map(|v| Builder::Scalar(Scalar::Number(Number::Float(v))))
            .map_err(|m| StreamReadError::new(m, span)),
        Token::Integer(t) => numeric::decode_integer(t)
            .map(|v| Builder::Scalar(Scalar::Number(v)))
            .map_err(|m| StreamReadError::new(m, span)),
        other => Err(StreamReadError::new(format!("unexpected token {other:?}, expected a value"), span)),
    }
}

/// Normalizes the space that may separate a date from a time in a combined
/// date-time literal into `T`. A no-op for tokens with no such separator.
fn normalize_datetime(text: &str) -> String {
    text.replacen(' ', "T", 1)
}

/// Walks `components` from `start`, auto-vivifying absent intermediate
/// tables, descending transparently through arrays of tables to their last
/// element, and applying `mode`'s `defined`-marking rule.
fn walk_dotted_path<'b>(
    start: &'b mut ObjectBuilder,
    components: &[String],
    mode: WalkMode,
    span: Span,
) -> Result<&'b mut ObjectBuilder, StreamReadError> {
    let mut current = start;
    let n = components.len();
    for (i, key) in components.iter().enumerate() {
        if current.closed {
            return Err(StreamReadError::new("cannot extend a closed table", span));
        }
        if !current.entries.contains_key(key.as_str()) {
            current.entries.insert(key.clone(), Builder::Object(ObjectBuilder::new()));
        }
        let child = current.entries.get_mut(key.as_str()).unwrap();
        let is_last = i + 1 == n;
        let next = descend_to_object(child, mode, is_last, span)?;
        match mode {
            WalkMode::TableHeaderFinal if is_last => {
                if next.defined {
                    return Err(StreamReadError::new("Table redefined", span));
                }
                next.defined = true;
            }
            WalkMode::AssignmentPrefix => {
                next.defined = true;
            }
            _ => {}
        }
        current = next;
    }
    Ok(current)
}

/// Resolves a builder node to the object it must represent for path
/// traversal: objects pass through, arrays descend to their last element,
/// scalars are an error. A std table header's *final* component is the one
/// exception — landing on an array there is a redefinition error, not a
/// silent descent, since `[x]` cannot redefine an existing array of tables
/// named `x`.
fn descend_to_object(node: &mut Builder, mode: WalkMode, is_last: bool, span: Span) -> Result<&mut ObjectBuilder, StreamReadError> {
    if mode == WalkMode::TableHeaderFinal && is_last {
        if matches!(node, Builder::Array(_)) {
            return Err(StreamReadError::new("cannot redefine an array of tables as a table", span));
        }
    } else if let Builder::Array(array) = node {
        if array.elements.is_empty() {
            return Err(StreamReadError::new("path into an empty array of tables", span));
        }
        return descend_to_object(array.elements.last_mut().unwrap(), mode, is_last, span);
    }
    match node {
        Builder::Object(o) => Ok(o),
        Builder::Array(_) => unreachable!("array case handled above"),
        Builder::Scalar(_) => Err(StreamReadError::new("path into a non-object value", span)),
    }
}
