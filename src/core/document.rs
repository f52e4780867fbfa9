//! Document store
//!
//! A [`Document`] is the ordered list of top-level blocks of one page. Every
//! mutation is a pure function of the current document: it returns an
//! [`Edit`] holding a new document and an [`EditStatus`], and leaves `self`
//! untouched, so history snapshots never alias live state.
//!
//! Referencing an id that is not in the document is not an error. The edit
//! comes back with [`EditStatus::NotFound`] and an unchanged document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use super::block::Block;
use super::content::{merge_patch, Content};
use super::settings::SettingsPatch;
use super::BlockId;

/// Ordered sequence of top-level blocks; render order is sequence order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Outcome of a document mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStatus {
    /// The document changed
    Applied,
    /// A block was added; carries its id
    Inserted(BlockId),
    /// The operation was valid but produced an identical document
    Unchanged,
    /// No block with this id
    NotFound(BlockId),
    /// The inserted block reuses an id already present
    DuplicateId(BlockId),
}

/// Result of a document mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub document: Document,
    pub status: EditStatus,
}

impl Edit {
    fn committed(document: Document, status: EditStatus) -> Self {
        Self { document, status }
    }

    fn unchanged(document: &Document, status: EditStatus) -> Self {
        Self {
            document: document.clone(),
            status,
        }
    }

    /// Whether the edit changed the document (and so deserves a history entry)
    pub fn is_committed(&self) -> bool {
        matches!(self.status, EditStatus::Applied | EditStatus::Inserted(_))
    }

    /// Id of the inserted block, if any
    pub fn inserted_id(&self) -> Option<&BlockId> {
        match &self.status {
            EditStatus::Inserted(id) => Some(id),
            _ => None,
        }
    }
}

/// Document load/save errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block with `id` at any depth
    pub fn find(&self, id: &BlockId) -> Option<&Block> {
        find_in(&self.blocks, id)
    }

    /// Index of a top-level block
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| &b.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.find(id).is_some()
    }

    /// Every block id, depth first
    pub fn ids(&self) -> Vec<&BlockId> {
        self.blocks.iter().flat_map(Block::ids).collect()
    }

    /// Top-level block ids in order
    pub fn top_level_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id.clone()).collect()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert `block` at `index` (clamped to the end)
    pub fn insert_at(&self, index: usize, block: Block) -> Edit {
        if let Some(duplicate) = self.first_clash(&block) {
            return Edit::unchanged(self, EditStatus::DuplicateId(duplicate));
        }
        let mut next = self.clone();
        let id = block.id.clone();
        let index = index.min(next.blocks.len());
        next.blocks.insert(index, block);
        Edit::committed(next, EditStatus::Inserted(id))
    }

    /// Insert `block` as child `index` of the container `parent`
    pub fn insert_child(&self, parent: &BlockId, index: usize, block: Block) -> Edit {
        if let Some(duplicate) = self.first_clash(&block) {
            return Edit::unchanged(self, EditStatus::DuplicateId(duplicate));
        }
        let mut next = self.clone();
        let Some(container) = find_in_mut(&mut next.blocks, parent) else {
            return Edit::unchanged(self, EditStatus::NotFound(parent.clone()));
        };
        let id = block.id.clone();
        let children = container.children.get_or_insert_with(Vec::new);
        let index = index.min(children.len());
        children.insert(index, block);
        Edit::committed(next, EditStatus::Inserted(id))
    }

    /// Remove the block with `id` (and its children), at any depth
    pub fn delete_by_id(&self, id: &BlockId) -> Edit {
        let mut next = self.clone();
        if remove_in(&mut next.blocks, id).is_some() {
            Edit::committed(next, EditStatus::Applied)
        } else {
            Edit::unchanged(self, EditStatus::NotFound(id.clone()))
        }
    }

    /// Deep-copy a block with fresh ids and insert it right after the source
    pub fn duplicate_by_id(&self, id: &BlockId) -> Edit {
        let mut next = self.clone();
        match duplicate_in(&mut next.blocks, id) {
            Some(new_id) => Edit::committed(next, EditStatus::Inserted(new_id)),
            None => Edit::unchanged(self, EditStatus::NotFound(id.clone())),
        }
    }

    /// Shallow-merge `patch` into the block's content
    pub fn update_content(&self, id: &BlockId, patch: &Content) -> Edit {
        self.modify(id, |block| block.content = merge_patch(&block.content, patch))
    }

    /// Merge `patch` into the block's settings, field by field
    pub fn update_settings(&self, id: &BlockId, patch: &SettingsPatch) -> Edit {
        self.modify(id, |block| block.settings = block.settings.apply_patch(patch))
    }

    /// Move a top-level block to `new_index` (clamped to the last position)
    pub fn move_to(&self, id: &BlockId, new_index: usize) -> Edit {
        let Some(from) = self.position(id) else {
            return Edit::unchanged(self, EditStatus::NotFound(id.clone()));
        };
        let to = new_index.min(self.blocks.len() - 1);
        if from == to {
            return Edit::unchanged(self, EditStatus::Unchanged);
        }
        let mut next = self.clone();
        let block = next.blocks.remove(from);
        next.blocks.insert(to, block);
        Edit::committed(next, EditStatus::Applied)
    }

    fn modify(&self, id: &BlockId, change: impl FnOnce(&mut Block)) -> Edit {
        let mut next = self.clone();
        let Some(block) = find_in_mut(&mut next.blocks, id) else {
            return Edit::unchanged(self, EditStatus::NotFound(id.clone()));
        };
        change(block);
        if next == *self {
            Edit::committed(next, EditStatus::Unchanged)
        } else {
            Edit::committed(next, EditStatus::Applied)
        }
    }

    /// First id of `block`'s subtree already used in this document
    fn first_clash(&self, block: &Block) -> Option<BlockId> {
        let existing: HashSet<&BlockId> = self.ids().into_iter().collect();
        let mut incoming = HashSet::new();
        block
            .ids()
            .into_iter()
            .find(|id| existing.contains(id) || !incoming.insert(*id))
            .cloned()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Parse a persisted `{ "blocks": [...] }` document
    ///
    /// Duplicate ids are repaired with fresh ones so the uniqueness invariant
    /// holds for every loaded document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Document = serde_json::from_str(json).map_err(DocumentError::Parse)?;
        Ok(document.with_unique_ids())
    }

    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let document: Document = serde_json::from_value(value).map_err(DocumentError::Parse)?;
        Ok(document.with_unique_ids())
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(DocumentError::Serialize)
    }

    pub fn to_value(&self) -> Result<Value, DocumentError> {
        serde_json::to_value(self).map_err(DocumentError::Serialize)
    }

    fn with_unique_ids(mut self) -> Self {
        let mut seen = HashSet::new();
        repair_ids(&mut self.blocks, &mut seen);
        self
    }
}

fn find_in<'a>(blocks: &'a [Block], id: &BlockId) -> Option<&'a Block> {
    blocks.iter().find_map(|block| {
        if &block.id == id {
            Some(block)
        } else {
            block.children.as_deref().and_then(|children| find_in(children, id))
        }
    })
}

fn find_in_mut<'a>(blocks: &'a mut [Block], id: &BlockId) -> Option<&'a mut Block> {
    for block in blocks.iter_mut() {
        if &block.id == id {
            return Some(block);
        }
        if let Some(found) = block.children.as_deref_mut().and_then(|c| find_in_mut(c, id)) {
            return Some(found);
        }
    }
    None
}

fn remove_in(blocks: &mut Vec<Block>, id: &BlockId) -> Option<Block> {
    if let Some(index) = blocks.iter().position(|b| &b.id == id) {
        return Some(blocks.remove(index));
    }
    blocks
        .iter_mut()
        .filter_map(|b| b.children.as_mut())
        .find_map(|children| remove_in(children, id))
}

fn duplicate_in(blocks: &mut Vec<Block>, id: &BlockId) -> Option<BlockId> {
    if let Some(index) = blocks.iter().position(|b| &b.id == id) {
        let copy = blocks[index].duplicate();
        let new_id = copy.id.clone();
        blocks.insert(index + 1, copy);
        return Some(new_id);
    }
    blocks
        .iter_mut()
        .filter_map(|b| b.children.as_mut())
        .find_map(|children| duplicate_in(children, id))
}

fn repair_ids(blocks: &mut [Block], seen: &mut HashSet<BlockId>) {
    for block in blocks {
        if !seen.insert(block.id.clone()) {
            let fresh = BlockId::new();
            warn!(duplicate = %block.id, replacement = %fresh, "repaired duplicate block id");
            block.id = fresh.clone();
            seen.insert(fresh);
        }
        if let Some(children) = block.children.as_mut() {
            repair_ids(children, seen);
        }
    }
}
