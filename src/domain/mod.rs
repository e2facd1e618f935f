//! Domain layer: markup trees, rendering and substring removal
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod node;
pub mod render;
pub mod strip;

pub use error::{DomainError, DomainResult};
pub use node::Node;
pub use render::{
    render, render_recursive, render_with, Document, TraversalStrategy, DEFAULT_RECURSION_LIMIT,
};
pub use strip::remove_instances;
