//! Construction-time error types.
//!
//! These are the only errors this crate produces. A route table is a static
//! artifact built once at startup; [`crate::Tree::add`] panics on them the
//! same way the rest of this conflict-detecting family of routers does,
//! because a malformed pattern is a programming mistake, not a runtime
//! condition a caller should recover from.

use thiserror::Error;

/// A pattern could not be compiled into the trie.
#[derive(Debug, Error, Clone)]
pub enum AddError {
    /// Pattern did not start with `/`.
    #[error("path must begin with '/': {pattern:?}")]
    MissingLeadingSlash { pattern: String },

    /// Pattern already has a registered value and `Tree::mutable` is false.
    #[error("value already set for path: {pattern:?}")]
    DuplicateValue { pattern: String },

    /// A catch-all wildcard conflicts with an existing value at the same
    /// position, or `Tree::mutable` is false and it already has a value.
    #[error("value already set for wildcard path: {pattern:?}")]
    DuplicateWildcardValue { pattern: String },

    /// Two distinctly-named catch-all segments were registered at the same
    /// position in the tree.
    #[error("'{new}' in new path {pattern:?} conflicts with existing wild path '{existing}'")]
    WildPathConflict {
        pattern: String,
        new: String,
        existing: String,
    },

    /// A catch-all was registered at a position that already has children
    /// or a parameter child, or vice versa.
    #[error("catch-all conflicts with existing children in path {pattern:?}")]
    WildcardConflict { pattern: String },

    /// A catch-all segment was not the final segment of the pattern.
    #[error("catch-all segment is not at the end of path {pattern:?}")]
    WildcardNotAtEnd { pattern: String },

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// A pattern's `{...}` syntax could not be parsed.
#[derive(Debug, Error, Clone)]
pub enum ClassifyError {
    #[error("unbalanced '{{' in path segment {segment:?}")]
    UnbalancedBrace { segment: String },

    #[error("empty parameter name in path segment {segment:?}")]
    EmptyName { segment: String },

    #[error("invalid regex {regex:?} for parameter {name:?}: {source}")]
    InvalidRegex {
        name: String,
        regex: String,
        #[source]
        source: regex::Error,
    },
}
