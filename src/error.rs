//! Errors reported by the strict variants of the tree operations.

use thiserror::Error;

/// Failures reported by [`Tree::try_find`][crate::Tree::try_find] and
/// [`Tree::try_delete`][crate::Tree::try_delete]. The default operations
/// never fail; they return `None` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// No node in the tree holds the requested key.
    #[error("key not found in tree")]
    KeyNotFound,
}
