//! Markup tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::instrument;

/// Element of a markup tree.
///
/// A node without children is a leaf and is rendered inline with its `text`.
/// A node with children is rendered by its tag alone; `text` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Element name, e.g. `div`
    pub tag: String,
    /// Display text, only meaningful for leaves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>, text: Option<String>, children: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            text,
            children,
        }
    }

    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(tag, Some(text.into()), Vec::new())
    }

    pub fn branch(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(tag, None, children)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth of the subtree rooted here; a single leaf has depth 1.
    ///
    /// Walks with an explicit stack so arbitrarily deep trees can be measured
    /// before choosing a traversal.
    #[instrument(level = "trace", skip(self), fields(tag = %self.tag))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in &node.children {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    /// Number of nodes in the subtree rooted here, including itself.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }

        count
    }

    /// Outline view for terminal display.
    pub fn outline(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(Node::outline).collect();
        Tree::new(self.to_string()).with_leaves(leaves)
    }
}

/// Drops descendants with an explicit stack so deep chains don't exhaust the call stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.text, self.is_leaf()) {
            (Some(text), true) => write!(f, "{}: {}", self.tag, text),
            _ => write!(f, "{}", self.tag),
        }
    }
}
