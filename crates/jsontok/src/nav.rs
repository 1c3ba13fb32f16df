//! Navigation primitives over a parsed [`crate::store::TokenStore`].
//!
//! `first_child` and `next_sibling_or_following` are intentionally naive
//! index arithmetic — their correctness depends entirely on the `next`
//! pointers the lexer's ascend phase wrote during parsing.

use crate::store::TokenStore;

/// The index of `i`'s first child, or the token immediately following `i`
/// if `i` is a leaf or an empty container.
///
/// For a container with `children > 0` this is the first member. For an
/// empty container (`children == 0`) this equals `tokens[i].next`, i.e. the
/// token following the close brace/bracket — there is nothing to descend
/// into. For a leaf token this is simply `i + 1`, which may be past
/// [`TokenStore::last`] if `i` is the last token in the store.
///
/// This primitive does not itself distinguish "empty container" from
/// "leaf": both cases reduce to `i + 1`, and for an empty container
/// `tokens[i].next` was already written as `i + 1` by the lexer. Callers
/// that need the subtree's end should call
/// [`next_sibling_or_following`] on `i`, not on the result of this
/// function.
#[must_use]
pub fn first_child(_tokens: &TokenStore<'_>, i: usize) -> usize {
    i + 1
}

/// The index of the token immediately following `i`'s entire subtree: the
/// universal "skip this value" operation.
///
/// For an object/array this is `tokens[i].next`, written by the lexer when
/// the container closed. For any other kind it is `i + 1`, since scalars
/// have no children to skip over.
#[must_use]
pub fn next_sibling_or_following(tokens: &TokenStore<'_>, i: usize) -> usize {
    let token = tokens.at(i);
    if token.kind.is_container() {
        token.next
    } else {
        i + 1
    }
}

/// Iterates the immediate children of a container token.
///
/// Yields each member's index in left-to-right order. Iterating a scalar or
/// a token with `children == 0` yields nothing.
#[derive(Debug, Clone)]
pub struct Children<'store, 'input> {
    tokens: &'store TokenStore<'input>,
    cursor: usize,
    end: usize,
}

impl<'store, 'input> Children<'store, 'input> {
    /// Builds an iterator over the immediate children of `parent`.
    #[must_use]
    pub fn new(tokens: &'store TokenStore<'input>, parent: usize) -> Self {
        let end = next_sibling_or_following(tokens, parent);
        let cursor = first_child(tokens, parent);
        Self { tokens, cursor, end }
    }
}

impl Iterator for Children<'_, '_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.end {
            return None;
        }
        let current = self.cursor;
        self.cursor = next_sibling_or_following(self.tokens, current);
        Some(current)
    }
}
