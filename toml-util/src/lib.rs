//! toml-util - Shared Span, Diagnostic, and Error Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate is the foundation both `toml-lex` and `toml-parse` build on: a
//! source position type (`Span`), a renderable failure (`Diagnostic`), and the
//! single error kind (`StreamReadError`) the rest of the workspace returns.
//! Nothing here is TOML-specific — it would serve any hand-written recursive
//! lexer/parser pair over a single in-memory source string.
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. ONE ERROR KIND
//!    There is no error enum. Every failure — lexical, structural, semantic,
//!    conversion — is a `StreamReadError` wrapping a message and a `Span`.
//!    Distinguishing failure kinds by matching on variants is not a need this
//!    crate has: callers act on the rendered message, not the cause.
//!
//! 2. SPANS ARE CHEAP AND EAGER
//!    `Span` is a plain `Copy` struct (byte range + 1-based line/column).
//!    Every token and every diagnostic carries one; there's no lazy
//!    recomputation of position from a byte offset after the fact.
//!
//! 3. RENDERING IS A PURE FUNCTION OF (DIAGNOSTIC, SOURCE)
//!    `Diagnostic::render` takes the original source text and produces the
//!    full human-facing message — line/column, a clipped single-line
//!    snippet, and a caret. No state is retained between the error being
//!    constructed and being rendered.
//! ============================================================================

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::Diagnostic;
pub use error::{ParseResult, StreamReadError};
pub use span::Span;
