//! Public entry point: [`Tree`], a compressed trie mapping path patterns to
//! values.

use crate::ci;
use crate::error::AddError;
use crate::node::{self, Node};
use crate::params::Params;

/// A compressed radix tree mapping URL path patterns to values of type `V`.
///
/// Build once, then serve: [`Tree::add`] is not safe to call concurrently
/// with itself or with [`Tree::get`] / [`Tree::find_case_insensitive`]. Once
/// construction is finished the tree is a plain immutable structure and
/// lookups may run from as many threads as the caller likes.
pub struct Tree<V> {
    root: Node<V>,
    /// When set, re-adding a pattern that already has a value overwrites it
    /// instead of panicking. Still not concurrency-safe.
    pub mutable: bool,
}

impl<V> Tree<V> {
    /// An empty tree with no registered patterns.
    pub fn new() -> Self {
        Tree {
            root: Node::root(),
            mutable: false,
        }
    }

    /// Register `pattern` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` does not start with `/`, or if it conflicts with
    /// an already-registered pattern (duplicate value, incompatible wild
    /// segment, misplaced catch-all). See [`AddError`] for the full list.
    /// Route tables are static artifacts built once at startup; a conflict
    /// here is a programming mistake, not a condition to recover from.
    pub fn add(&mut self, pattern: &str, value: V) {
        if let Err(err) = self.try_add(pattern, value) {
            tracing::error!(pattern, error = %err, "failed to add path pattern");
            panic!("{err}");
        }
        tracing::trace!(pattern, "added path pattern");
    }

    fn try_add(&mut self, pattern: &str, value: V) -> Result<(), AddError> {
        if !pattern.starts_with('/') {
            return Err(AddError::MissingLeadingSlash {
                pattern: pattern.to_string(),
            });
        }
        node::insert(&mut self.root, pattern, pattern, value, self.mutable)
    }

    /// Look up `path`, writing any bound parameters into `params` (pass
    /// `None` to discard them).
    ///
    /// Returns `(Some(value), false)` on a hit, `(None, true)` if no route
    /// matches `path` but one does match `path` with its trailing slash
    /// added or removed, and `(None, false)` otherwise.
    pub fn get<'s: 'r, 'r>(&'s self, path: &'r str, params: Option<&mut Params<'r>>) -> (Option<&'s V>, bool) {
        node::get(&self.root, path, params)
    }

    /// Case-insensitively search for a route matching `path`, writing the
    /// canonical (correctly-cased) path into `buf` on success.
    ///
    /// If the only match differs by a trailing slash, it is accepted only
    /// when `fix_trailing_slash` is true. `buf` is left untouched on a hit
    /// and cleared on a miss.
    pub fn find_case_insensitive(&self, path: &str, fix_trailing_slash: bool, buf: &mut String) -> bool {
        ci::find(&self.root, path, fix_trailing_slash, buf)
    }
}

impl<V> Default for Tree<V> {
    fn default() -> Self {
        Self::new()
    }
}
