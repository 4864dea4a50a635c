//! toml-parse - Parser and Document Builder
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate drives a `toml-lex` lexer to build a TOML document: a single
//! `parse(input) -> Value` entry point, with no options, since the TOML text
//! itself determines every numeric/scalar choice downstream consumers see.
//!
//! BUILDER TREE VS. VALUE TREE
//! ----------------------------
//! Parsing needs mutable bookkeeping the finished document does not: whether
//! a table was explicitly introduced by a header (`defined`) versus
//! auto-vivified while walking a dotted key, and whether a container can
//! still be mutated (`closed`) or has been sealed by its own `}`/`]`. Rather
//! than carry those flags into the public API, this crate keeps two trees:
//!
//!   Builder  (private, mod builder) — ObjectBuilder / ArrayBuilder / Scalar,
//!            mutated in place as tokens arrive, carrying `closed`/`defined`.
//!   Value    (public, mod value)    — String / Bool / Number / Array /
//!            Object, produced once by `Builder::finalize` at the very end.
//!
//! A `Builder` is never exposed outside this crate; `parse` hands back only
//! the immutable result. No arena or index scheme is needed for either tree
//! — TOML documents are strictly hierarchical, arrays of tables reference
//! their latest element by index during parsing only, and nothing ever
//! needs to walk back up to a parent.
//!
//! INTEGER WIDTH PROMOTION
//! ------------------------
//! An integer literal's representable width is a function of its *digit
//! count*, not its value, and differs by base (hex/octal/binary each have
//! their own length thresholds for 32-bit vs. 64-bit vs. arbitrary
//! precision; see `numeric::decode_integer`). The result is always the
//! narrowest of the three that can hold the literal — callers that only
//! ever see small numbers pay nothing for `num-bigint` being in the
//! dependency graph.
//!
//! ```
//! let doc = toml_parse::parse("name = \"example\"\nport = 8080\n").unwrap();
//! let table = doc.as_object().unwrap();
//! assert_eq!(table["name"].as_str(), Some("example"));
//! ```
//! ============================================================================

mod builder;
mod numeric;
mod parser;
mod value;

pub use numeric::{decode_float, decode_integer};
pub use parser::parse;
pub use toml_util::{ParseResult, StreamReadError};
pub use value::{FloatValue, Number, Value};
