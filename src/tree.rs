//! An unbalanced BST with an opt-in full rebuild. Insertions and deletions never restructure
//! the tree beyond the nodes they touch, so the tree can drift out of balance. Balance is
//! recomputed from subtree heights whenever it is asked for, and [`Tree::rebalance`] rebuilds
//! the whole tree from its sorted keys when the check fails.
//!
//! # Examples
//!
//! ```
//! use bst_rebuild::Tree;
//!
//! // Duplicates are dropped and the keys sorted before the tree is built.
//! let mut tree = Tree::build_tree([10, 5, 15, 2, 7, 20, 21, 22, 23, 5]);
//! assert_eq!(tree.len(), 9);
//! assert_eq!(tree.root().map(|n| *n.key()), Some(15));
//! assert!(tree.is_balanced());
//!
//! // Inserting below the smallest key builds a chain under `2`.
//! tree.insert(1);
//! tree.insert(0);
//! assert!(!tree.is_balanced());
//!
//! // Rebalancing is explicit.
//! assert!(tree.rebalance());
//! assert!(tree.is_balanced());
//! assert_eq!(tree.root().map(|n| *n.key()), Some(10));
//! ```

use std::cmp::Ordering;
use std::mem;
use std::ptr;

use tracing::{debug, instrument, trace};

use crate::error::Error;
use crate::traversal::{InOrder, Keys, LevelOrder, PostOrder, PreOrder};

/// An owned, possibly empty, subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree over unique, totally ordered keys.
///
/// The tree is only guaranteed to be height-balanced right after it is built or rebalanced.
#[derive(Debug, Clone)]
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        // Unlink every node before it is dropped so a degenerate tree doesn't recurse once per
        // level.
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// The number of edges on the longest path from the root to a leaf, or `None` for an empty
    /// tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_rebuild::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), None);
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.height(), Some(0));
    ///
    /// tree.insert(2);
    /// tree.insert(3);
    /// assert_eq!(tree.height(), Some(2));
    /// ```
    pub fn height(&self) -> Option<usize> {
        self.root().map(Node::height)
    }

    /// Whether, at every node, the heights of the two subtrees differ by at most one. An empty
    /// tree is balanced.
    pub fn is_balanced(&self) -> bool {
        link_is_balanced(&self.root)
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.key)
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.key)
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K> {
        Keys::new(self.iter_in_order())
    }

    /// Visits the nodes breadth first, left to right within each level.
    pub fn iter_level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder::new(self.root())
    }

    /// Visits the nodes left subtree first, then the node, then the right subtree. This yields
    /// the keys in ascending order.
    pub fn iter_in_order(&self) -> InOrder<'_, K> {
        InOrder::new(self.root())
    }

    /// Visits each node before either of its subtrees.
    pub fn iter_pre_order(&self) -> PreOrder<'_, K> {
        PreOrder::new(self.root())
    }

    /// Visits each node after both of its subtrees.
    pub fn iter_post_order(&self) -> PostOrder<'_, K> {
        PostOrder::new(self.root())
    }

    /// Calls `visit` on every node in level order. See [`Tree::iter_level_order`].
    pub fn level_order(&self, visit: impl FnMut(&Node<K>)) {
        self.iter_level_order().for_each(visit);
    }

    /// Calls `visit` on every node in order. See [`Tree::iter_in_order`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_rebuild::Tree;
    ///
    /// let tree = Tree::build_tree([3, 1, 2]);
    /// let mut keys = Vec::new();
    /// tree.in_order(|node| keys.push(*node.key()));
    ///
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn in_order(&self, visit: impl FnMut(&Node<K>)) {
        self.iter_in_order().for_each(visit);
    }

    /// Calls `visit` on every node in pre-order. See [`Tree::iter_pre_order`].
    pub fn pre_order(&self, visit: impl FnMut(&Node<K>)) {
        self.iter_pre_order().for_each(visit);
    }

    /// Calls `visit` on every node in post-order. See [`Tree::iter_post_order`].
    pub fn post_order(&self, visit: impl FnMut(&Node<K>)) {
        self.iter_post_order().for_each(visit);
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Builds a height-balanced tree from `keys`. The keys may be in any order and may repeat;
    /// only one copy of each is kept.
    ///
    /// The shape only depends on the set of keys: with the sorted keys in `[start, end]`, the
    /// key at `(start + end) / 2` (rounded down) becomes the root, the keys before it build the
    /// left subtree and the keys after it build the right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_rebuild::Tree;
    ///
    /// let tree = Tree::build_tree([4, 1, 3, 2, 4]);
    /// let root = tree.root().unwrap();
    ///
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.left().map(|n| *n.key()), Some(1));
    /// assert_eq!(root.right().map(|n| *n.key()), Some(3));
    /// ```
    pub fn build_tree<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();

        let len = keys.len();
        let root = build_balanced(len, &mut keys.into_iter());
        debug!(len, "built tree from sorted keys");

        Self { root, len }
    }

    /// Finds the node holding `key`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_rebuild::Tree;
    ///
    /// let tree = Tree::build_tree([1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&3).map(|n| *n.key()), Some(3));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    /// Like [`Tree::find`] but reports a missing key as an error.
    pub fn try_find(&self, key: &K) -> Result<&Node<K>, Error> {
        self.find(key).ok_or(Error::KeyNotFound)
    }

    /// Whether a node holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts `key` as a new leaf and returns `true`. If the key is already present the tree is
    /// left untouched and `false` is returned.
    ///
    /// This never rebalances the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_rebuild::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => {
                    trace!("ignoring duplicate key");
                    return false;
                }
                Ordering::Greater => &mut node.right,
            };
        }

        *link = Some(Box::new(Node::new(key)));
        self.len += 1;
        true
    }

    /// Deletes the node holding `key` and returns the key. If the tree doesn't contain the key,
    /// nothing happens.
    ///
    /// A node with two children takes the key of its in-order successor (the smallest key in
    /// its right subtree) and the successor's node is removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_rebuild::Tree;
    ///
    /// let mut tree = Tree::build_tree([1, 2, 3]);
    ///
    /// assert_eq!(tree.delete_item(&2), Some(2));
    /// assert_eq!(tree.delete_item(&2), None);
    ///
    /// // `3` was promoted into the old root.
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(3));
    /// ```
    pub fn delete_item(&mut self, key: &K) -> Option<K> {
        let deleted = delete(&mut self.root, key);
        if deleted.is_some() {
            self.len -= 1;
        } else {
            trace!("ignoring delete of missing key");
        }

        deleted
    }

    /// Like [`Tree::delete_item`] but reports a missing key as an error.
    pub fn try_delete(&mut self, key: &K) -> Result<K, Error> {
        self.delete_item(key).ok_or(Error::KeyNotFound)
    }

    /// The number of edges between the root and `node`. See [`Node::depth_of`].
    pub fn depth(&self, node: &Node<K>) -> Option<usize> {
        self.root()?.depth_of(node)
    }

    /// Rebuilds the tree from its sorted keys if it isn't balanced and returns whether it did.
    /// Afterwards [`Tree::is_balanced`] holds.
    #[instrument(level = "debug", skip(self))]
    pub fn rebalance(&mut self) -> bool {
        if self.is_balanced() {
            trace!("tree is already balanced");
            return false;
        }

        debug!(len = self.len, height = ?self.height(), "rebuilding unbalanced tree");
        let keys = drain_in_order(self.root.take());
        self.root = build_balanced(keys.len(), &mut keys.into_iter());
        true
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::build_tree(iter)
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

/// A `Node` holds a key and owns its (possibly empty) left and right subtrees.
// TODO stack based Clone
#[derive(Debug, Clone)]
pub struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The number of edges on the longest path from this node down to a leaf. A leaf has a
    /// height of 0.
    pub fn height(&self) -> usize {
        // Both links are at least -1 so this is never negative.
        (1 + link_height(&self.left).max(link_height(&self.right))) as usize
    }

    /// Whether the subtree rooted at this node is balanced. See [`Tree::is_balanced`].
    pub fn is_balanced(&self) -> bool {
        link_height(&self.left).abs_diff(link_height(&self.right)) <= 1
            && link_is_balanced(&self.left)
            && link_is_balanced(&self.right)
    }
}

impl<K> Node<K>
where
    K: Ord,
{
    /// The number of edges from this node down to `target`.
    ///
    /// The search follows `target`'s key the way [`Tree::find`] would and only succeeds if it
    /// arrives at `target` itself. A node from another tree that happens to hold an equal key
    /// is not found.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_rebuild::Tree;
    ///
    /// let tree = Tree::build_tree([1, 2, 3, 4]);
    /// let other = Tree::build_tree([4]);
    ///
    /// let four = tree.find(&4).unwrap();
    /// assert_eq!(tree.depth(four), Some(2));
    /// assert_eq!(tree.find(&3).unwrap().depth_of(four), Some(1));
    ///
    /// assert_eq!(tree.depth(other.root().unwrap()), None);
    /// ```
    pub fn depth_of(&self, target: &Node<K>) -> Option<usize> {
        let mut current = Some(self);
        let mut depth = 0;
        while let Some(node) = current {
            if ptr::eq(node, target) {
                return Some(depth);
            }
            current = if target.key < node.key {
                node.left()
            } else {
                node.right()
            };
            depth += 1;
        }

        None
    }
}

/// Height of a possibly empty subtree: -1 when empty, so that a leaf has a height of 0.
pub(crate) fn link_height<K>(link: &Link<K>) -> isize {
    match link {
        None => -1,
        Some(node) => 1 + link_height(&node.left).max(link_height(&node.right)),
    }
}

fn link_is_balanced<K>(link: &Link<K>) -> bool {
    link.as_deref().map_or(true, Node::is_balanced)
}

/// Builds a subtree from the next `len` keys of `keys`, which must be sorted and unique.
///
/// Relative to a subrange `[start, end]` of the sorted keys, the root is at offset
/// `(len - 1) / 2`, which is the same index as `(start + end) / 2` rounded down.
fn build_balanced<K>(len: usize, keys: &mut impl Iterator<Item = K>) -> Link<K> {
    if len == 0 {
        return None;
    }

    let left_len = (len - 1) / 2;
    let left = build_balanced(left_len, keys);
    let key = keys.next()?;
    let right = build_balanced(len - 1 - left_len, keys);

    Some(Box::new(Node { key, left, right }))
}

/// Deletes the node holding `key` from the subtree at `link`, returning the deleted key.
fn delete<K>(link: &mut Link<K>, key: &K) -> Option<K>
where
    K: Ord,
{
    let node = link.as_mut()?;
    match key.cmp(&node.key) {
        Ordering::Less => delete(&mut node.left, key),
        Ordering::Greater => delete(&mut node.right, key),
        Ordering::Equal if node.left.is_some() && node.right.is_some() => {
            let successor = take_min(&mut node.right)?;
            Some(mem::replace(&mut node.key, successor))
        }
        Ordering::Equal => {
            let deleted = link.take()?;
            let Node {
                key: deleted_key,
                left,
                right,
            } = *deleted;
            // At most one of these is non-empty.
            *link = left.or(right);
            Some(deleted_key)
        }
    }
}

/// Removes the leftmost node of the subtree at `link`, moving its right child into its place,
/// and returns its key.
fn take_min<K>(link: &mut Link<K>) -> Option<K> {
    let node = link.as_mut()?;
    if node.left.is_some() {
        return take_min(&mut node.left);
    }

    let min = link.take()?;
    let Node { key, right, .. } = *min;
    *link = right;
    Some(key)
}

/// Consumes a subtree and returns its keys in ascending order.
fn drain_in_order<K>(root: Link<K>) -> Vec<K> {
    let mut keys = Vec::new();
    let mut stack: Vec<Box<Node<K>>> = Vec::new();
    let mut current = root;

    loop {
        while let Some(mut node) = current {
            current = node.left.take();
            stack.push(node);
        }

        match stack.pop() {
            Some(node) => {
                let Node { key, right, .. } = *node;
                keys.push(key);
                current = right;
            }
            None => return keys,
        }
    }
}
