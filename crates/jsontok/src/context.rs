//! The reusable parser context: lifecycle and buffer ownership.
//!
//! A [`Parser`] owns a [`TokenStore`] and nothing else. It may be reused
//! across any number of [`Parser::parse`] calls: each call resets the
//! store, re-consumes an optional leading BOM, and overwrites the tokens
//! from the previous call.

use crate::error::ParseError;
use crate::lexer;
use crate::store::{CapacityPolicy, DoublingPolicy, TokenStore};
use crate::token::Token;

/// A reusable JSON parser bound to a [`TokenStore`].
///
/// `Parser` is a thin wrapper: all of its behavior lives in the lexer and
/// the store, reachable here as a single entry point plus the read-only
/// introspection callers need for error classification.
pub struct Parser<'a> {
    store: TokenStore<'a>,
}

impl<'a> Parser<'a> {
    /// Bounded mode: parse into a caller-supplied fixed token buffer,
    /// refusing to grow past it. See [`TokenStore::from_buffer`].
    #[must_use]
    pub fn from_buffer(buffer: &'a mut [Token]) -> Self {
        Self { store: TokenStore::from_buffer(buffer) }
    }

    /// Hybrid mode: use `buffer` first, falling back to `policy`-driven
    /// growth on overflow. See [`TokenStore::from_buffer_with_policy`].
    #[must_use]
    pub fn from_buffer_with_policy(buffer: &'a mut [Token], policy: impl CapacityPolicy + 'static) -> Self {
        Self { store: TokenStore::from_buffer_with_policy(buffer, policy) }
    }

    /// Fully dynamic mode with a custom growth policy. See
    /// [`TokenStore::with_policy`].
    #[must_use]
    pub fn with_policy(policy: impl CapacityPolicy + 'static) -> Self {
        Self { store: TokenStore::with_policy(policy) }
    }

    /// Fully dynamic mode using the default [`DoublingPolicy`].
    #[must_use]
    pub fn new() -> Self {
        Self { store: TokenStore::with_policy(DoublingPolicy) }
    }

    /// Parses `input`, overwriting any tokens from a previous call.
    ///
    /// Returns the number of tokens produced on success. On failure, the
    /// caller distinguishes a syntax error from capacity exhaustion by
    /// comparing [`Parser::last`] against [`Parser::capacity`] (equal only
    /// on capacity exhaustion), or simply by matching on the returned
    /// [`ParseError`] variant.
    pub fn parse(&mut self, input: &[u8]) -> Result<usize, ParseError> {
        lexer::run(&mut self.store, input)
    }

    /// The token store produced by the most recent [`Parser::parse`] call.
    #[must_use]
    pub fn tokens(&self) -> &TokenStore<'a> {
        &self.store
    }

    /// The high-water index: the index of the most recently allocated
    /// token. See [`TokenStore::last`].
    #[must_use]
    pub fn last(&self) -> usize {
        self.store.last()
    }

    /// The store's current usable capacity. See [`TokenStore::capacity`].
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Releases any storage the token store owns. See
    /// [`TokenStore::release`].
    pub fn release(&mut self) {
        self.store.release();
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}
