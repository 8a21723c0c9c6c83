//! Lazy iterators over the nodes of a [`Tree`][crate::Tree]. Each one keeps its own queue or
//! stack of pending nodes, so walking a degenerate tree doesn't recurse.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::tree::Node;

/// Breadth first iterator, created by [`Tree::iter_level_order`][crate::Tree::iter_level_order].
pub struct LevelOrder<'a, K> {
    queue: VecDeque<&'a Node<K>>,
}

impl<'a, K> LevelOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for LevelOrder<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node)
    }
}

impl<K> FusedIterator for LevelOrder<'_, K> {}

/// Left, node, right iterator, created by [`Tree::iter_in_order`][crate::Tree::iter_in_order].
pub struct InOrder<'a, K> {
    /// Nodes whose left subtree is being (or has been) visited, deepest last.
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}

/// Node, left, right iterator, created by [`Tree::iter_pre_order`][crate::Tree::iter_pre_order].
pub struct PreOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree comes off the stack first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

impl<K> FusedIterator for PreOrder<'_, K> {}

/// Left, right, node iterator, created by
/// [`Tree::iter_post_order`][crate::Tree::iter_post_order].
pub struct PostOrder<'a, K> {
    /// Pending nodes and whether their children have already been pushed.
    stack: Vec<(&'a Node<K>, bool)>,
}

impl<'a, K> PostOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: root.into_iter().map(|node| (node, false)).collect(),
        }
    }
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(node);
            }

            self.stack.push((node, true));
            self.stack.extend(node.right().map(|right| (right, false)));
            self.stack.extend(node.left().map(|left| (left, false)));
        }
    }
}

impl<K> FusedIterator for PostOrder<'_, K> {}

/// Ascending iterator over the keys of a tree, created by [`Tree::keys`][crate::Tree::keys].
pub struct Keys<'a, K> {
    nodes: InOrder<'a, K>,
}

impl<'a, K> Keys<'a, K> {
    pub(crate) fn new(nodes: InOrder<'a, K>) -> Self {
        Self { nodes }
    }
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(Node::key)
    }
}

impl<K> FusedIterator for Keys<'_, K> {}
