//! Errors produced while parsing and while unescaping.

use thiserror::Error;

/// The grammar-level reason a parse was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A byte was encountered where no value, structural token, or
    /// whitespace could begin.
    #[error("unexpected byte {0:#04x}")]
    UnexpectedByte(u8),
    /// The input ended where more bytes were required.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A literal (`true`, `false`, `null`) did not match exactly.
    #[error("invalid literal")]
    InvalidLiteral,
    /// A number lexeme violated the strict RFC 8259 grammar (e.g. a lone
    /// `-`, a leading zero followed by more digits, a `.`/`e` with no
    /// following digit).
    #[error("invalid number")]
    InvalidNumber,
    /// A control byte (`< 0x20`) appeared unescaped inside a string.
    #[error("control byte {0:#04x} in string")]
    UnescapedControlByte(u8),
    /// A `\` was followed by a byte other than `" \\ / b f n r t u`.
    #[error("invalid escape byte {0:#04x}")]
    InvalidEscape(u8),
    /// A `\u` was not followed by exactly four hex digits.
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    /// An object member's key was not a string.
    #[error("object key must be a string")]
    KeyMustBeString,
    /// A `:` was expected but not found after an object key.
    #[error("expected ':' after object key")]
    ExpectedColon,
    /// A `,` was expected between siblings, or a trailing comma was found.
    #[error("expected ',' or closing bracket")]
    ExpectedCommaOrClose,
    /// Non-whitespace bytes remained after the root value was complete.
    #[error("trailing data after root value")]
    TrailingData,
    /// The input began with a disallowed byte-order-mark or encoding that
    /// isn't UTF-8 (e.g. a UTF-16 BOM or a NUL in a position the grammar
    /// cannot start from).
    #[error("unsupported input encoding")]
    UnsupportedEncoding,
}

/// A syntax error located at a specific byte offset into the input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct SyntaxError {
    /// The offending grammar violation.
    pub kind: SyntaxErrorKind,
    /// Byte offset into the input slice where the violation was detected.
    pub offset: usize,
}

/// The outcome of a failed [`crate::Parser::parse`] call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input violates the JSON grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The token store ran out of capacity and either no [`crate::store::CapacityPolicy`]
    /// was configured, or the configured policy refused to grow further.
    #[error("token store capacity exhausted")]
    CapacityExhausted,
}

/// The outcome of an [`crate::unescape::unescape`] call that encountered an
/// invalid escape sequence.
///
/// Unlike [`SyntaxError`], this can only happen for `\u` sequences: the
/// lexer validates every other escape form at lex time, so only surrogate
/// pairing and scalar-value validity are left to discover during decoding
/// (the tradeoff of deferring unescaping to a separate, on-demand pass).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UnescapeErrorKind {
    /// A high surrogate (`\uD800`..=`\uDBFF`) was not immediately followed
    /// by a valid low surrogate.
    #[error("unpaired high surrogate")]
    UnpairedHighSurrogate,
    /// A low surrogate (`\uDC00`..=`\uDFFF`) appeared without a preceding
    /// high surrogate.
    #[error("unpaired low surrogate")]
    UnpairedLowSurrogate,
    /// An escape byte other than `" \\ / b f n r t u` was found. The lexer
    /// rejects these before a token is ever recorded, so this only fires if
    /// [`crate::unescape::unescape`] is invoked against a hand-built lexeme
    /// that bypassed the lexer.
    #[error("invalid escape byte {0:#04x}")]
    InvalidEscape(u8),
    /// A `\u` was not followed by exactly four hex digits. Same defensive
    /// note as `InvalidEscape`.
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
}
