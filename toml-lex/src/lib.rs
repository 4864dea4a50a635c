//! toml-lex - Mode-Driven Lexer for TOML v1.0.0
//!
//! ============================================================================
//! MODE-SENSITIVE LEXING
//! ============================================================================
//!
//! TOML's grammar is not context-free at the token level: the same input
//! text is a different token depending on where it appears. `2021` is an
//! unquoted key in key position and a 32-bit integer in value position;
//! `true` is a key in `true = 1` and a boolean in `x = true`. A
//! context-free tokenizer — one that decides a token's identity from its
//! characters alone — cannot make this distinction; something upstream has
//! to tell the lexer what it is currently allowed to see.
//!
//! This crate resolves that by making the caller (the parser, in
//! `toml-parse`) declare a `LexState` before every `next_token()` call:
//!
//!   next_token: (LexState, Cursor) → (Token, Cursor')
//!
//! There is no "default" or "current" state living inside the lexer between
//! calls — each call is a pure function of the state it's given and the
//! bytes remaining in the cursor. Six states cover the grammar:
//! `ExpectExpression` (top of a line), `ExpectEol` (after a statement),
//! `ExpectInlineKey` (inside a key, bare or quoted), `ExpectValue` (the
//! right-hand side of `=`, or inside an array), `ExpectArraySep`, and
//! `ExpectTableSep`. Whitespace and comment handling differs by state too:
//! newlines are significant at the top level, insignificant inside array
//! literals, and forbidden inside inline tables.
//!
//! SCALAR DECODING SPLIT
//! ----------------------
//! The lexer classifies and borrows; it does not convert. A numeric token
//! keeps its raw text (sign, base prefix, underscores, all intact) and is
//! handed to `toml-parse` for digit-to-value conversion, because the width
//! the value ends up needing (32-bit, 64-bit, or arbitrary-precision) is a
//! parser-level concern, not a lexical one. Quoted strings are the one
//! exception: escape processing happens once, at lex time, since there is
//! no reason to defer work that only ever happens a single time per token.
//! ============================================================================

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{LexState, Token};
