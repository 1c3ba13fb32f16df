//! A strict, validating, one-pass JSON tokenizer over a byte slice.
//!
//! `jsontok` parses an arbitrary byte buffer into a compact, contiguous
//! array of fixed-size [`Token`] records without copying any string data
//! out of the input. It targets RFC 8259 plus the pass/fail matrix of the
//! JSONTestSuite corpus: every well-formed JSON text is accepted, every
//! ill-formed one is rejected, and every place RFC 8259 leaves behavior
//! implementation-defined is resolved explicitly (see the module docs
//! below and `DESIGN.md`).
//!
//! # Example
//!
//! ```rust
//! use jsontok::{Parser, TokenKind};
//!
//! let mut parser = Parser::new();
//! let count = parser.parse(br#"{"a":1,"b":[true,null]}"#).unwrap();
//! assert_eq!(count, 5);
//!
//! let tokens = parser.tokens();
//! assert_eq!(tokens.at(1).kind, TokenKind::Object);
//! assert_eq!(tokens.at(1).children, 2);
//! ```
//!
//! # What this crate does not do
//!
//! Numeric values are retained as verbatim lexemes, never parsed to
//! `f64`/`i64`; member order is preserved structurally by the token
//! array, not by an explicit ordered-map type; duplicate object keys are
//! accepted without detection; input must be a single complete in-memory
//! buffer (no incremental/streaming feed); and only UTF-8 input (with an
//! optional, once-only leading BOM) is accepted. File I/O, command-line
//! parsing, and pretty-printing are out of scope — this crate is the core
//! tokenizer only.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod context;
mod error;
mod lexer;
mod nav;
mod store;
mod token;
mod unescape;

#[cfg(test)]
mod tests;

pub use context::Parser;
pub use error::{ParseError, SyntaxError, SyntaxErrorKind, UnescapeErrorKind};
pub use nav::{first_child, next_sibling_or_following, Children};
pub use store::{CapacityExhausted, CapacityPolicy, DoublingPolicy, TokenStore};
pub use token::{Token, TokenKind};
pub use unescape::{unescape, ByteSink, Unescaped, UnescapeResult};
