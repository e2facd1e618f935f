//! Loading markup trees from TOML files.
//!
//! ```toml
//! [root]
//! tag = "html"
//!
//! [[root.children]]
//! tag = "p"
//! text = "hello world"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Document, Node};

/// On-disk shape of a document. A missing `[root]` table is a null root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeFile {
    pub root: Option<Node>,
}

impl TreeFile {
    pub fn into_document(self) -> ApplicationResult<Document> {
        Ok(Document::from_root(self.root)?)
    }
}

/// Parses TOML content into a document; `path` is used for error messages only.
#[instrument(level = "debug", skip(content))]
pub fn parse_document(content: &str, path: &Path) -> ApplicationResult<Document> {
    let file: TreeFile = toml::from_str(content).map_err(|e| ApplicationError::TreeFile {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    let doc = file.into_document()?;
    debug!(nodes = doc.root().node_count(), depth = doc.root().depth(), "parsed");
    Ok(doc)
}

/// Reads and parses a tree file.
#[instrument(level = "debug")]
pub fn load_document(path: &Path) -> ApplicationResult<Document> {
    let content = std::fs::read_to_string(path).with_path_context("read tree file", path)?;
    parse_document(&content, path)
}
