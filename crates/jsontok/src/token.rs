//! The token record and its discriminant.
//!
//! A [`Token`] is a fixed-size record representing exactly one JSON value
//! (scalar, array, or object), optionally carrying the member name when the
//! value is an object member. Tokens never copy bytes out of the input: every
//! string-shaped field is a `(offset, length)` view into the buffer the
//! [`crate::Parser`] was given.

use core::ops::Range;

/// The kind of JSON value a [`Token`] represents.
///
/// `None` is reserved for the zeroed sentinel at index 0 of a
/// [`crate::TokenStore`]; it never appears on a live token produced by a
/// successful parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    /// Sentinel value; only ever present at token store index 0.
    #[default]
    None,
    /// The JSON literal `null`.
    Null,
    /// The JSON literals `true`/`false`.
    Bool,
    /// A JSON number, retained verbatim as its source lexeme.
    Number,
    /// A JSON string, with escapes undecoded until [`crate::unescape`] is
    /// invoked.
    String,
    /// A JSON object `{ ... }`.
    Object,
    /// A JSON array `[ ... ]`.
    Array,
}

impl TokenKind {
    /// Whether this kind is an object or array, i.e. can have children and
    /// participates in the hierarchy linker's `next` pointer.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }
}

/// One record in the token array, produced by [`crate::Parser::parse`].
///
/// All fields are present regardless of `kind`; which ones are meaningful is
/// governed by `kind`. This mirrors a classic index-based JSON tokenizer
/// record rather than a Rust enum-with-payload,
/// because the store is a contiguous array of same-sized records that must
/// support in-place reallocation without per-token heap boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token {
    /// The kind of JSON value this token represents.
    pub kind: TokenKind,

    /// Byte offset of the member-name lexeme (without quotes) into the
    /// input, or `0` when this token is not an object member.
    pub name_off: usize,
    /// Byte length of the member-name lexeme, or `0` when this token is not
    /// an object member.
    pub name_len: usize,
    /// `true` iff the name lexeme contains at least one `\` escape.
    pub name_escaped: bool,

    /// Index of the enclosing object/array token, or `0` (the sentinel) for
    /// the root token.
    pub parent: usize,

    /// `true` iff a `String`-kind value lexeme contains at least one `\`
    /// escape. Meaningless for other kinds.
    pub value_escaped: bool,
    /// The decoded boolean value, meaningful only when `kind == Bool`.
    pub boolean: bool,

    /// Byte offset of the value lexeme into the input. For `Number` this
    /// spans the entire numeric literal including any sign; for `String`
    /// this spans the content strictly between the quotes. Meaningless for
    /// other kinds.
    pub str_off: usize,
    /// Byte length of the value lexeme. Meaningless for kinds other than
    /// `Number`/`String`.
    pub str_len: usize,

    /// Count of immediate members, meaningful only for `Object`/`Array`.
    pub children: usize,
    /// Index of the token immediately following this container's closing
    /// brace/bracket, meaningful only for `Object`/`Array`. Written by the
    /// hierarchy linker when the container is closed.
    pub next: usize,
}

impl Token {
    /// Byte range of the member-name lexeme (without quotes).
    #[must_use]
    pub const fn name_range(&self) -> Range<usize> {
        self.name_off..self.name_off + self.name_len
    }

    /// Byte range of the value lexeme (quotes excluded for strings).
    #[must_use]
    pub const fn value_range(&self) -> Range<usize> {
        self.str_off..self.str_off + self.str_len
    }

    /// Whether this token has a name, i.e. is an object member.
    #[must_use]
    pub const fn has_name(&self) -> bool {
        self.name_len > 0
    }
}
