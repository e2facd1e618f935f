//! Depth-first rendering of a node tree into markup strings.
//!
//! Output is every opening tag and leaf string in pre-order, followed by the
//! closing tags of all branch nodes in reverse order of their opening tags.
//! Traversal state lives only for the duration of one call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

/// Recursion is only used for trees at most this deep under [`TraversalStrategy::Auto`].
pub const DEFAULT_RECURSION_LIMIT: usize = 512;

/// How the tree is walked. All strategies produce identical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalStrategy {
    /// Explicit visit stack, no call-stack growth
    Stack,
    /// Recursive walk with an accumulator
    Recursive,
    /// Recursive when the tree depth is within the limit, stack otherwise
    #[default]
    Auto,
}

impl fmt::Display for TraversalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalStrategy::Stack => "stack",
            TraversalStrategy::Recursive => "recursive",
            TraversalStrategy::Auto => "auto",
        };
        f.write_str(name)
    }
}

impl FromStr for TraversalStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stack" => Ok(TraversalStrategy::Stack),
            "recursive" => Ok(TraversalStrategy::Recursive),
            "auto" => Ok(TraversalStrategy::Auto),
            other => Err(DomainError::InvalidArgument(format!(
                "unknown traversal strategy '{other}' (expected stack, recursive or auto)"
            ))),
        }
    }
}

fn open_tag(tag: &str) -> String {
    format!("<{tag}>")
}

fn close_tag(tag: &str) -> String {
    format!("</{tag}>")
}

fn leaf_tag(node: &Node) -> DomainResult<String> {
    let text = node.text.as_deref().ok_or_else(|| DomainError::InvalidNode {
        tag: node.tag.clone(),
        reason: "leaf node has no text".to_string(),
    })?;
    Ok(format!("<{tag}> {text} </{tag}>", tag = node.tag))
}

/// Renders the tree with an explicit visit stack.
///
/// Children are pushed in reverse so the leftmost child is popped next. Tags of
/// branch nodes are collected on a separate stack and drained after the walk.
///
/// # Errors
/// [`DomainError::InvalidNode`] if a leaf carries no text.
#[instrument(level = "debug", skip(root), fields(tag = %root.tag))]
pub fn render(root: &Node) -> DomainResult<Vec<String>> {
    let mut result = Vec::new();
    let mut open_stack = vec![root];
    let mut close_stack: Vec<&str> = Vec::new();

    while let Some(node) = open_stack.pop() {
        trace!(tag = %node.tag, pending = open_stack.len(), "visit");

        if node.is_leaf() {
            result.push(leaf_tag(node)?);
            continue;
        }

        close_stack.push(&node.tag);
        result.push(open_tag(&node.tag));
        open_stack.extend(node.children.iter().rev());
    }

    result.extend(close_stack.into_iter().rev().map(close_tag));

    debug!(count = result.len(), "rendered");
    Ok(result)
}

/// Renders the tree recursively; output is identical to [`render`].
///
/// Call depth grows with tree depth, so prefer [`render`] for untrusted input.
#[instrument(level = "debug", skip(root), fields(tag = %root.tag))]
pub fn render_recursive(root: &Node) -> DomainResult<Vec<String>> {
    fn walk<'a>(
        node: &'a Node,
        result: &mut Vec<String>,
        close_stack: &mut Vec<&'a str>,
    ) -> DomainResult<()> {
        if node.is_leaf() {
            result.push(leaf_tag(node)?);
            return Ok(());
        }

        close_stack.push(&node.tag);
        result.push(open_tag(&node.tag));
        for child in &node.children {
            walk(child, result, close_stack)?;
        }
        Ok(())
    }

    let mut result = Vec::new();
    let mut close_stack = Vec::new();
    walk(root, &mut result, &mut close_stack)?;
    result.extend(close_stack.into_iter().rev().map(close_tag));

    debug!(count = result.len(), "rendered");
    Ok(result)
}

/// Renders with the given strategy.
///
/// `Auto` measures the depth iteratively first and only recurses when it is
/// within `recursion_limit`.
#[instrument(level = "debug", skip(root), fields(tag = %root.tag))]
pub fn render_with(
    root: &Node,
    strategy: TraversalStrategy,
    recursion_limit: usize,
) -> DomainResult<Vec<String>> {
    match strategy {
        TraversalStrategy::Stack => render(root),
        TraversalStrategy::Recursive => render_recursive(root),
        TraversalStrategy::Auto => {
            let depth = root.depth();
            if depth <= recursion_limit {
                debug!(depth, recursion_limit, "auto: recursive");
                render_recursive(root)
            } else {
                debug!(depth, recursion_limit, "auto: stack");
                render(root)
            }
        }
    }
}

/// Entry point of a markup tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    /// Builds a document from a possibly absent root.
    ///
    /// # Errors
    /// [`DomainError::InvalidArgument`] if `root` is `None`.
    pub fn from_root(root: Option<Node>) -> DomainResult<Self> {
        root.map(Self::new)
            .ok_or_else(|| DomainError::InvalidArgument("document has no root node".to_string()))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Renders with the explicit-stack traversal.
    pub fn render(&self) -> DomainResult<Vec<String>> {
        render(&self.root)
    }

    pub fn render_with(
        &self,
        strategy: TraversalStrategy,
        recursion_limit: usize,
    ) -> DomainResult<Vec<String>> {
        render_with(&self.root, strategy, recursion_limit)
    }
}
