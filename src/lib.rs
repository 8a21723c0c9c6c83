//! This crate exposes a Binary Search Tree (BST) that stays exactly as unbalanced as its
//! insertions and deletions make it, until it is explicitly rebuilt.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined
//! as the longest path from the root `Node` to a leaf `Node`). A tree built from
//! `N` keys with [`Tree::build_tree`] has a height of `O(lg N)`, but unlucky
//! insertions can stretch it to `O(N)`.
//!
//! ## Balance
//!
//! A tree is balanced when, at every `Node`, the heights of its two subtrees
//! differ by at most one. Nothing here keeps track of that as the tree changes:
//! [`Tree::is_balanced`] measures it from scratch, and [`Tree::rebalance`]
//! throws away the nodes and builds a fresh tree from the sorted keys when the
//! check fails.
//!
//! ## Traversal
//!
//! Nodes can be visited breadth first or depth first in, pre- or post-order,
//! either through a callback ([`Tree::in_order`]) or a lazy iterator
//! ([`Tree::iter_in_order`]). In-order traversal yields the keys in ascending
//! order.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
mod pretty;
pub mod traversal;
pub mod tree;


pub use error::Error;
pub use tree::{Node, Tree};
