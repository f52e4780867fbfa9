//! Block model and block-type trait
//!
//! A [`Block`] is one persisted content unit. A [`BlockType`] is the single
//! registration point for everything type-specific about it: palette metadata,
//! default content, the settings-editor schema, content resolution and the
//! preview function.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::catalog::CatalogData;
use super::content::{overlay, Content};
use super::parameter::{validate_against, ContentField, ValidationResult};
use super::preview::{PreviewContext, PreviewNode};
use super::settings::{RawSettings, Settings};
use super::BlockId;
use crate::categories::BlockCategory;

/// One content unit of a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    /// Durable type key, e.g. `"hero"` or `"product-grid"`
    #[serde(rename = "type")]
    pub block_type: String,
    /// Anything but a JSON object loads as empty content
    #[serde(default, deserialize_with = "object_or_default")]
    pub content: Content,
    #[serde(default, deserialize_with = "object_or_default")]
    pub settings: RawSettings,
    /// Nested blocks of container types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(T::default()),
    }
}

impl Block {
    pub fn new(id: BlockId, block_type: impl Into<String>, content: Content, settings: RawSettings) -> Self {
        Self {
            id,
            block_type: block_type.into(),
            content,
            settings,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = Some(children);
        self
    }

    /// Settings with every envelope default filled in
    pub fn resolved_settings(&self) -> Settings {
        self.settings.resolve()
    }

    /// Deep copy with a fresh id for this block and every descendant
    pub fn duplicate(&self) -> Block {
        Block {
            id: BlockId::new(),
            block_type: self.block_type.clone(),
            content: self.content.clone(),
            settings: self.settings.clone(),
            children: self
                .children
                .as_ref()
                .map(|children| children.iter().map(Block::duplicate).collect()),
        }
    }

    /// Ids of this block and all descendants, depth first
    pub fn ids(&self) -> Vec<&BlockId> {
        let mut out = vec![&self.id];
        if let Some(children) = &self.children {
            for child in children {
                out.extend(child.ids());
            }
        }
        out
    }
}

/// Palette and registry metadata of a block type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockTypeMetadata {
    /// Durable type key stored in documents
    pub id: String,
    /// Palette label
    pub name: String,
    pub category: BlockCategory,
    pub description: String,
    pub version: String,
    /// Icon identifier
    pub icon: String,
    /// Extra search terms
    pub keywords: Vec<String>,
}

/// Behavior shared by every block type
///
/// Implementations are stateless; everything a preview needs arrives through
/// the [`PreviewContext`].
pub trait BlockType: Send + Sync {
    fn metadata(&self) -> &BlockTypeMetadata;

    /// Content given to a freshly inserted block
    fn default_content(&self) -> Content;

    /// Editable content fields, in settings-panel order
    fn content_schema(&self) -> &[ContentField];

    /// Legacy field names accepted on read, as `(legacy, canonical)` pairs
    fn content_aliases(&self) -> &[(&'static str, &'static str)] {
        &[]
    }

    /// Stored content with defaults and legacy aliases applied
    fn resolve_content(&self, raw: &Content) -> Content {
        overlay(self.default_content(), raw, self.content_aliases())
    }

    /// Advisory check of stored content against the schema
    fn validate_content(&self, content: &Content) -> ValidationResult {
        validate_against(self.content_schema(), &self.resolve_content(content))
    }

    /// Whether blocks of this type carry `children`
    fn is_container(&self) -> bool {
        false
    }

    /// Auto-advance behavior for resolved `content`, if the preview animates
    fn autoplay(&self, _content: &Content, _catalog: &CatalogData) -> Option<Autoplay> {
        None
    }

    /// Build the preview tree for one block
    fn preview(&self, ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError>;
}

/// Timer-driven slide rotation of a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Autoplay {
    pub interval_ms: u64,
    /// Number of positions to cycle through
    pub slides: usize,
}

/// Block errors
///
/// Raised by preview and content operations on a single block. The renderer
/// turns them into a placeholder; they never abort a render pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BlockError {
    /// Type key has no registration
    #[error("Unknown block type: {0}")]
    UnknownType(String),

    /// A content field cannot be used even after defaulting
    #[error("Invalid content field '{field}': {reason}")]
    InvalidContent { field: String, reason: String },

    /// Preview construction failed
    #[error("Preview failed: {0}")]
    PreviewError(String),
}
