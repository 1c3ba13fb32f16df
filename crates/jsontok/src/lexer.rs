//! The grammar/validator and hierarchy linker.
//!
//! [`run`] is the crate's single entry point for turning an input byte
//! slice into tokens. It is a flat iterative state machine rather than a
//! recursive-descent one: the [`TokenStore`]'s `current_parent` cursor,
//! together with each token's `parent` field, already forms the stack a
//! recursive-descent parser would otherwise keep on the call stack. Reusing
//! it means parsing a deeply nested document never grows the Rust call
//! stack — nesting depth is bounded only by the token store's capacity.
//!
//! Every sub-recognizer (`lex_string`, `lex_number`, `expect_literal`)
//! takes and returns a plain byte position; none of them hold a reference
//! into the token store across a call that might allocate, since growth can
//! move every token in memory.

use crate::error::{ParseError, SyntaxError, SyntaxErrorKind};
use crate::store::TokenStore;
use crate::token::TokenKind;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Byte-order-mark signatures for encodings other than UTF-8. Checked in
/// length order so a 4-byte UTF-32 BOM is recognized before its 2-byte
/// UTF-16 prefix would otherwise match.
const FOREIGN_BOMS: [&[u8]; 4] = [
    &[0xFF, 0xFE, 0x00, 0x00], // UTF-32LE
    &[0x00, 0x00, 0xFE, 0xFF], // UTF-32BE
    &[0xFF, 0xFE],             // UTF-16LE
    &[0xFE, 0xFF],             // UTF-16BE
];

fn err(kind: SyntaxErrorKind, offset: usize) -> ParseError {
    ParseError::Syntax(SyntaxError { kind, offset })
}

/// Parses `input` into `store`, following the top-level JSON grammar.
///
/// On success, returns the number of tokens produced (`store.last()`). The
/// store is reset before parsing begins, so a previous parse's tokens are
/// always fully overwritten.
pub(crate) fn run(store: &mut TokenStore<'_>, input: &[u8]) -> Result<usize, ParseError> {
    store.reset();

    if FOREIGN_BOMS.iter().any(|bom| input.starts_with(bom)) {
        return Err(err(SyntaxErrorKind::UnsupportedEncoding, 0));
    }

    let mut pos = if input.starts_with(&UTF8_BOM) { UTF8_BOM.len() } else { 0 };

    pos = parse_value_into(store, input, pos, None)?;

    loop {
        pos = skip_ws(input, pos);
        let parent = store.current_parent();
        if parent == 0 {
            break;
        }
        let parent_kind = store.at(parent).kind;
        let closer = if parent_kind == TokenKind::Object { b'}' } else { b']' };

        if input.get(pos) == Some(&closer) {
            let next_idx = store.last() + 1;
            store.at_mut(parent).next = next_idx;
            let grandparent = store.at(parent).parent;
            store.set_current_parent(grandparent);
            pos += 1;
            continue;
        }

        if store.at(parent).children > 0 {
            match input.get(pos) {
                Some(b',') => pos = skip_ws(input, pos + 1),
                Some(_) => return Err(err(SyntaxErrorKind::ExpectedCommaOrClose, pos)),
                None => return Err(err(SyntaxErrorKind::UnexpectedEof, pos)),
            }
        }

        pos = if parent_kind == TokenKind::Object {
            parse_object_member(store, input, pos)?
        } else {
            parse_value_into(store, input, pos, None)?
        };
    }

    pos = skip_ws(input, pos);
    if pos != input.len() {
        return Err(err(SyntaxErrorKind::TrailingData, pos));
    }

    #[cfg(any(test, feature = "fuzzing"))]
    store.check_invariants();

    Ok(store.last())
}

/// Whitespace is exactly `SPACE`, `LF`, `CR`, `TAB`; form feed and vertical
/// tab are deliberately not skipped.
fn skip_ws(input: &[u8], mut pos: usize) -> usize {
    while matches!(input.get(pos), Some(b' ' | b'\n' | b'\r' | b'\t')) {
        pos += 1;
    }
    pos
}

/// Parses one object member: a STRING key, `:`, then the member's value,
/// all recorded on a single token rather than spending a separate token on
/// the key.
fn parse_object_member(store: &mut TokenStore<'_>, input: &[u8], pos: usize) -> Result<usize, ParseError> {
    if input.get(pos) != Some(&b'"') {
        return Err(err(SyntaxErrorKind::KeyMustBeString, pos));
    }
    let (name_off, name_len, name_escaped, pos) = lex_string(input, pos)?;
    let pos = skip_ws(input, pos);
    if input.get(pos) != Some(&b':') {
        return Err(err(SyntaxErrorKind::ExpectedColon, pos));
    }
    let pos = skip_ws(input, pos + 1);
    parse_value_into(store, input, pos, Some((name_off, name_len, name_escaped)))
}

/// Parses one JSON value at `pos`, allocating exactly one token for it.
///
/// If `name` is given, it is recorded on the same token (an object member
/// shares one token between its name and its value).
/// Opening `{`/`[` allocates the container token and repoints
/// [`TokenStore::current_parent`] at it; the caller's loop in [`run`] then
/// drives parsing of its members and its eventual close.
fn parse_value_into(
    store: &mut TokenStore<'_>,
    input: &[u8],
    pos: usize,
    name: Option<(usize, usize, bool)>,
) -> Result<usize, ParseError> {
    let pos = skip_ws(input, pos);
    let Some(&byte) = input.get(pos) else {
        return Err(err(SyntaxErrorKind::UnexpectedEof, pos));
    };
    match byte {
        b'"' | b'{' | b'[' | b't' | b'f' | b'n' | b'-' | b'0'..=b'9' => {}
        other => return Err(err(SyntaxErrorKind::UnexpectedByte(other), pos)),
    }

    let idx = store.alloc().map_err(|_| ParseError::CapacityExhausted)?;
    if let Some((name_off, name_len, name_escaped)) = name {
        let token = store.at_mut(idx);
        token.name_off = name_off;
        token.name_len = name_len;
        token.name_escaped = name_escaped;
    }

    let end = match byte {
        b'"' => {
            let (str_off, str_len, value_escaped, end) = lex_string(input, pos)?;
            let token = store.at_mut(idx);
            token.kind = TokenKind::String;
            token.str_off = str_off;
            token.str_len = str_len;
            token.value_escaped = value_escaped;
            end
        }
        b'{' => {
            store.at_mut(idx).kind = TokenKind::Object;
            store.set_current_parent(idx);
            pos + 1
        }
        b'[' => {
            store.at_mut(idx).kind = TokenKind::Array;
            store.set_current_parent(idx);
            pos + 1
        }
        b't' => {
            let end = expect_literal(input, pos, b"true")?;
            let token = store.at_mut(idx);
            token.kind = TokenKind::Bool;
            token.boolean = true;
            end
        }
        b'f' => {
            let end = expect_literal(input, pos, b"false")?;
            let token = store.at_mut(idx);
            token.kind = TokenKind::Bool;
            token.boolean = false;
            end
        }
        b'n' => {
            let end = expect_literal(input, pos, b"null")?;
            store.at_mut(idx).kind = TokenKind::Null;
            end
        }
        b'-' | b'0'..=b'9' => {
            let (str_off, str_len, end) = lex_number(input, pos)?;
            let token = store.at_mut(idx);
            token.kind = TokenKind::Number;
            token.str_off = str_off;
            token.str_len = str_len;
            end
        }
        _ => unreachable!("dispatch already validated above"),
    };
    Ok(end)
}

/// Matches `word` exactly at `pos`, case-sensitively, with no partial or
/// case-insensitive acceptance.
fn expect_literal(input: &[u8], pos: usize, word: &[u8]) -> Result<usize, ParseError> {
    let end = pos + word.len();
    if input.get(pos..end) == Some(word) {
        Ok(end)
    } else {
        Err(err(SyntaxErrorKind::InvalidLiteral, pos))
    }
}

/// Lexes a STRING lexeme starting at the opening `"` at `pos`.
///
/// Returns `(content_off, content_len, escaped, end)`, where `content_off`/
/// `content_len` bracket the bytes strictly between the quotes and `end`
/// is the position immediately after the closing quote. Does not decode
/// escapes — see [`crate::unescape`] for that.
fn lex_string(input: &[u8], pos: usize) -> Result<(usize, usize, bool, usize), ParseError> {
    debug_assert_eq!(input.get(pos), Some(&b'"'));
    let content_start = pos + 1;
    let mut i = content_start;
    let mut escaped = false;

    loop {
        let Some(&b) = input.get(i) else {
            return Err(err(SyntaxErrorKind::UnexpectedEof, i));
        };
        match b {
            b'"' => return Ok((content_start, i - content_start, escaped, i + 1)),
            b'\\' => {
                escaped = true;
                i = lex_escape(input, i)?;
            }
            b if b < 0x20 => return Err(err(SyntaxErrorKind::UnescapedControlByte(b), i)),
            _ => i += 1,
        }
    }
}

/// Lexes one `\`-escape starting at the backslash at `input[pos]`, returning
/// the position immediately after it. Validates `\uXXXX` has exactly four
/// hex digits but does not decode it (surrogate pairing is validated only
/// at unescape time).
fn lex_escape(input: &[u8], pos: usize) -> Result<usize, ParseError> {
    debug_assert_eq!(input.get(pos), Some(&b'\\'));
    let Some(&esc) = input.get(pos + 1) else {
        return Err(err(SyntaxErrorKind::UnexpectedEof, pos + 1));
    };
    match esc {
        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Ok(pos + 2),
        b'u' => {
            let digits_start = pos + 2;
            let digits = input
                .get(digits_start..digits_start + 4)
                .ok_or_else(|| err(SyntaxErrorKind::UnexpectedEof, input.len()))?;
            if digits.iter().all(u8::is_ascii_hexdigit) {
                Ok(digits_start + 4)
            } else {
                Err(err(SyntaxErrorKind::InvalidUnicodeEscape, digits_start))
            }
        }
        other => Err(err(SyntaxErrorKind::InvalidEscape(other), pos + 1)),
    }
}

/// Lexes a NUMBER lexeme starting at `pos`, which must be `-` or a digit.
///
/// Returns `(offset, length, end)` bracketing the entire lexeme, including
/// any leading `-`. Enforces the strict RFC 8259 number grammar: no leading
/// `+`, no bare `.5`, no empty fraction/exponent digits. A
/// leading zero followed immediately by more digits (e.g. `012`) is not
/// rejected here directly — `lex_number` stops after the lone `0`, leaving
/// the extra digits as unconsumed input that the caller's grammar (no
/// value may follow another without a separator) rejects.
fn lex_number(input: &[u8], pos: usize) -> Result<(usize, usize, usize), ParseError> {
    let start = pos;
    let mut i = pos;
    if input.get(i) == Some(&b'-') {
        i += 1;
    }
    match input.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            i += 1;
            while matches!(input.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return Err(err(SyntaxErrorKind::InvalidNumber, i)),
    }

    if input.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while matches!(input.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
        if i == frac_start {
            return Err(err(SyntaxErrorKind::InvalidNumber, frac_start));
        }
    }

    if matches!(input.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(input.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while matches!(input.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
        if i == exp_start {
            return Err(err(SyntaxErrorKind::InvalidNumber, exp_start));
        }
    }

    Ok((start, i - start, i))
}
