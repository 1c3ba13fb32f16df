//! The token store: a contiguous, index-addressed array of [`Token`]
//! records with a pluggable growth policy.
//!
//! Indices, not pointers, are used throughout — growing the store may move
//! every token in memory, but never invalidates an index. Index `0` is a
//! permanent, zeroed sentinel: the parent of the root token and the
//! terminator of every upward parent-chain walk.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::token::Token;

/// Reallocation policy for a [`TokenStore`], supplied once at construction.
///
/// Given the store's current capacity and a requested minimum, the policy
/// decides the new capacity (or refuses to grow at all by returning
/// `None`).
///
/// Implementations must uphold:
/// - `size_hint == 0`: a request to shed owned memory; must return `Some(0)`.
/// - `size_hint > 0`: a request to grow to at least `size_hint`; the
///   returned capacity must be `>= size_hint` (the store clamps a smaller
///   value up automatically, but well-behaved policies shouldn't rely on
///   that).
pub trait CapacityPolicy {
    /// Decide the new capacity for a store currently holding
    /// `current_capacity` slots, given a request for at least `size_hint`
    /// slots (or, when `size_hint == 0`, a request to release owned memory).
    fn next_capacity(&mut self, current_capacity: usize, size_hint: usize) -> Option<usize>;
}

/// The default growth policy: doubles capacity, rounding up to satisfy the
/// requested minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoublingPolicy;

impl CapacityPolicy for DoublingPolicy {
    fn next_capacity(&mut self, current_capacity: usize, size_hint: usize) -> Option<usize> {
        if size_hint == 0 {
            return Some(0);
        }
        let mut cap = current_capacity.max(1);
        while cap < size_hint {
            cap = cap.saturating_mul(2);
        }
        Some(cap.max(current_capacity + 1).max(2))
    }
}

enum Storage<'a> {
    /// Caller-owned fixed buffer; never grown beyond its initial length,
    /// and never freed by the store.
    Borrowed(&'a mut [Token]),
    /// Store-owned, growable buffer.
    Owned(Vec<Token>),
}

impl Storage<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Borrowed(s) => s.len(),
            Self::Owned(v) => v.len(),
        }
    }
}

/// A request to grow the token store beyond its current capacity was
/// refused: either no [`CapacityPolicy`] was configured, or the configured
/// policy declined to grow further.
///
/// This is distinguished from a syntax error by the caller comparing
/// [`TokenStore::last`] against [`TokenStore::capacity`]: on capacity
/// exhaustion the two are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExhausted;

/// The token array produced by a parse, plus the allocator state needed to
/// grow it on demand.
///
/// A store may be constructed in one of three modes:
/// - [`TokenStore::from_buffer`]: a caller-supplied fixed buffer, no growth
///   (bounded parse).
/// - [`TokenStore::with_policy`]: no pre-allocated buffer, fully dynamic
///   growth via the policy.
/// - [`TokenStore::from_buffer_with_policy`]: the fixed buffer is used
///   first; on overflow the store migrates to an owned, policy-grown
///   buffer, copying existing contents.
pub struct TokenStore<'a> {
    storage: Storage<'a>,
    policy: Option<Box<dyn CapacityPolicy>>,
    last: usize,
    current_parent: usize,
}

impl<'a> TokenStore<'a> {
    fn new(storage: Storage<'a>, policy: Option<Box<dyn CapacityPolicy>>) -> Self {
        let mut store = Self {
            storage,
            policy,
            last: 0,
            current_parent: 0,
        };
        if store.storage.len() == 0 {
            // Even a fully dynamic store must have room for the sentinel.
            store
                .grow_raw(1)
                .expect("a fresh store must be able to hold at least the sentinel");
        }
        *store.at_mut(0) = Token::default();
        store
    }

    /// Bounded mode: use `buffer` as fixed storage, refusing to grow past
    /// its length. The buffer is never freed or reallocated by the store.
    #[must_use]
    pub fn from_buffer(buffer: &'a mut [Token]) -> Self {
        assert!(!buffer.is_empty(), "a token buffer must hold at least the sentinel slot");
        Self::new(Storage::Borrowed(buffer), None)
    }

    /// Hybrid mode: use `buffer` as fixed storage first; on overflow,
    /// migrate to an owned buffer grown by `policy`, preserving contents.
    #[must_use]
    pub fn from_buffer_with_policy(
        buffer: &'a mut [Token],
        policy: impl CapacityPolicy + 'static,
    ) -> Self {
        assert!(!buffer.is_empty(), "a token buffer must hold at least the sentinel slot");
        Self::new(Storage::Borrowed(buffer), Some(Box::new(policy)))
    }

    /// Fully dynamic mode: no pre-allocated buffer; capacity grows entirely
    /// via `policy`, starting from an empty owned buffer.
    #[must_use]
    pub fn with_policy(policy: impl CapacityPolicy + 'static) -> Self {
        Self::new(Storage::Owned(Vec::new()), Some(Box::new(policy)))
    }

    /// Fully dynamic mode using the default [`DoublingPolicy`].
    #[must_use]
    pub fn new_dynamic() -> Self {
        Self::with_policy(DoublingPolicy)
    }

    /// Fully dynamic mode, pre-sized to `capacity` slots up front.
    #[must_use]
    pub fn with_capacity_and_policy(capacity: usize, policy: impl CapacityPolicy + 'static) -> Self {
        let mut store = Self::with_policy(policy);
        if capacity > 0 {
            store
                .grow_for(capacity)
                .expect("initial pre-sizing must succeed");
        }
        store
    }

    /// Current capacity: the maximum live token index this store can hold
    /// without growing, i.e. the raw slot count minus the sentinel at index
    /// 0.
    ///
    /// This is the quantity callers compare against [`TokenStore::last`]
    /// to detect capacity exhaustion: a fixed store of `n` usable slots
    /// reports `capacity() == n`, and a parse that fills every slot leaves
    /// `last() == capacity()`.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len() - 1
    }

    /// The high-water index: the index of the most recently allocated
    /// token, or `0` if none has been allocated since the last [`reset`].
    ///
    /// [`reset`]: TokenStore::reset
    #[must_use]
    pub fn last(&self) -> usize {
        self.last
    }

    /// The index that [`alloc`] will assign its current-parent to.
    ///
    /// [`alloc`]: TokenStore::alloc
    #[must_use]
    pub fn current_parent(&self) -> usize {
        self.current_parent
    }

    /// Sets the current-parent cursor used by subsequent [`alloc`] calls.
    ///
    /// [`alloc`]: TokenStore::alloc
    pub fn set_current_parent(&mut self, parent: usize) {
        self.current_parent = parent;
    }

    /// Returns an immutable view of the token at index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= capacity()`. Callers within this crate only ever
    /// index `0..=last()`, which is always in bounds.
    #[must_use]
    pub fn at(&self, i: usize) -> &Token {
        match &self.storage {
            Storage::Borrowed(s) => &s[i],
            Storage::Owned(v) => &v[i],
        }
    }

    /// Returns a mutable view of the token at index `i`.
    ///
    /// Callers must not retain this reference across a call that may
    /// allocate (it may observe the store migrating from borrowed to owned
    /// storage).
    ///
    /// # Panics
    ///
    /// Panics if `i >= capacity()`.
    pub fn at_mut(&mut self, i: usize) -> &mut Token {
        match &mut self.storage {
            Storage::Borrowed(s) => &mut s[i],
            Storage::Owned(v) => &mut v[i],
        }
    }

    /// Resets the store for a new parse: `last` and the current-parent
    /// cursor return to `0`, and the sentinel is re-zeroed. No storage is
    /// deallocated.
    pub fn reset(&mut self) {
        self.last = 0;
        self.current_parent = 0;
        *self.at_mut(0) = Token::default();
    }

    /// Releases any storage this store owns, via the policy's
    /// `size_hint == 0` contract. A caller-supplied fixed buffer (from
    /// [`TokenStore::from_buffer`] or the borrowed phase of
    /// [`TokenStore::from_buffer_with_policy`]) is left untouched — the
    /// store never frees memory it doesn't own.
    pub fn release(&mut self) {
        if let Some(policy) = &mut self.policy {
            let _ = policy.next_capacity(self.capacity(), 0);
        }
        if let Storage::Owned(v) = &mut self.storage {
            v.clear();
            v.shrink_to_fit();
        }
        self.last = 0;
        self.current_parent = 0;
    }

    /// Allocates the next token, parented to the current-parent cursor, and
    /// increments the parent's `children` count.
    ///
    /// Returns the new token's index, or [`CapacityExhausted`] if growth was
    /// required and refused.
    pub fn alloc(&mut self) -> Result<usize, CapacityExhausted> {
        let next = self.last + 1;
        if next > self.capacity() {
            self.grow_for(next).map_err(|_| CapacityExhausted)?;
        }
        self.last = next;
        let parent = self.current_parent;
        *self.at_mut(next) = Token {
            parent,
            ..Token::default()
        };
        // Index 0 is the permanent, zeroed sentinel, not a real container:
        // the root token's "parent" bookkeeping stops here rather than on it.
        if parent != 0 {
            self.at_mut(parent).children += 1;
        }
        Ok(next)
    }

    /// Grows the store so that `capacity() >= min_capacity` usable slots,
    /// i.e. the raw storage holds at least `min_capacity + 1` slots
    /// (accounting for the sentinel).
    fn grow_for(&mut self, min_capacity: usize) -> Result<(), CapacityExhausted> {
        if self.capacity() >= min_capacity {
            return Ok(());
        }
        self.grow_raw(min_capacity + 1)
    }

    /// Grows the raw storage (sentinel included) to at least `min_raw_len`
    /// slots, via the configured policy.
    fn grow_raw(&mut self, min_raw_len: usize) -> Result<(), CapacityExhausted> {
        let cur_raw_len = self.storage.len();
        if cur_raw_len >= min_raw_len {
            return Ok(());
        }
        let new_raw_len = {
            let policy = self.policy.as_mut().ok_or(CapacityExhausted)?;
            let cap = policy
                .next_capacity(cur_raw_len, min_raw_len)
                .ok_or(CapacityExhausted)?;
            cap.max(min_raw_len)
        };
        match core::mem::replace(&mut self.storage, Storage::Owned(Vec::new())) {
            Storage::Owned(mut vec) => {
                vec.resize(new_raw_len, Token::default());
                self.storage = Storage::Owned(vec);
            }
            Storage::Borrowed(slice) => {
                let mut v = Vec::with_capacity(new_raw_len);
                v.extend_from_slice(slice);
                v.resize(new_raw_len, Token::default());
                self.storage = Storage::Owned(v);
            }
        }
        Ok(())
    }
}

/// Debug-only invariant checker for a freshly parsed store.
///
/// Walks every live token and re-derives its structural invariants
/// (parent-chain termination, child-count agreement, next-pointer
/// monotonicity) from scratch, independent of how the lexer produced them.
/// Always on under `#[cfg(test)]`, and additionally compiled into the
/// `fuzzing` feature so `cargo fuzz` catches an invariant violation
/// immediately instead of only a later panic or a silently wrong token
/// array.
#[cfg(any(test, feature = "fuzzing"))]
impl TokenStore<'_> {
    /// Panics if any token in `1..=last()` violates a structural invariant,
    /// or if the sentinel at index `0` was mutated.
    pub fn check_invariants(&self) {
        assert_eq!(*self.at(0), Token::default(), "sentinel token 0 was mutated");
        for i in 1..=self.last {
            let t = self.at(i);
            assert!(t.parent < i, "token {i} parent {} is not < {i}", t.parent);

            let mut cursor = t.parent;
            let mut steps = 0;
            while cursor != 0 {
                assert!(
                    self.at(cursor).kind.is_container(),
                    "token {i}'s parent chain passes through non-container {cursor}"
                );
                cursor = self.at(cursor).parent;
                steps += 1;
                assert!(steps <= self.last, "parent chain from {i} does not terminate");
            }

            if t.kind.is_container() {
                assert!(
                    t.next > i,
                    "container {i} has next {} <= its own index",
                    t.next
                );
                let mut child = i + 1;
                let mut counted = 0;
                while child < t.next {
                    assert_eq!(self.at(child).parent, i, "child {child} of {i} has wrong parent");
                    child = if self.at(child).kind.is_container() {
                        self.at(child).next
                    } else {
                        child + 1
                    };
                    counted += 1;
                }
                assert_eq!(child, t.next, "container {i}'s children do not end exactly at next");
                assert_eq!(counted, t.children, "container {i} children count mismatch");
            }
        }
    }
}
