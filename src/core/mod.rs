//! Core page-builder abstractions
//!
//! This module defines the block/document data model, the block-type trait and
//! its registry, the shared settings envelope and the read-only catalog tables
//! handed to previews. Everything here is synchronous and free of UI state.

pub mod block;
pub mod catalog;
pub mod content;
pub mod document;
pub mod parameter;
pub mod preview;
pub mod registry;
pub mod settings;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use block::{Autoplay, Block, BlockError, BlockType, BlockTypeMetadata};
pub use catalog::{CatalogData, Collection, Product, ProductSource};
pub use content::{Content, ContentReader};
pub use document::{Document, DocumentError, Edit, EditStatus};
pub use preview::{PreviewContext, PreviewNode, PreviewState, RenderedBlock};
pub use registry::{BlockTypeRegistry, RegistryError};
pub use settings::{resolve, merge_update, RawSettings, Settings, SettingsPatch, Viewport};

/// Unique identifier for a block within a document
///
/// Ids are opaque strings. Persisted documents may carry any string; ids minted
/// by this crate look like `block-<uuid>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    /// Generate a new random block id
    pub fn new() -> Self {
        BlockId(format!("block-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        BlockId(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        BlockId(id)
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
