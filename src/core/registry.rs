//! Block Type Registry - Central catalog of insertable block types
//!
//! This module provides a thread-safe registry of [`BlockType`] descriptors. A
//! type registered once is insertable from the palette, editable in the
//! settings panel and renderable in previews. It supports:
//! - Type registration, unregistration and aliases
//! - Lookup by key, category, or search query
//! - Palette listing in registration order
//! - Default content and block creation for the editor
//!
//! Lookups used while editing never fail: an unknown key yields empty default
//! content, its raw key as label and a raw-JSON schema.

use crate::categories::BlockCategory;
use crate::core::content::Content;
use crate::core::parameter::ContentField;
use crate::core::settings::{RawSettings, Settings};
use crate::core::{Block, BlockId, BlockType};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Default)]
struct RegistryInner {
    types: HashMap<String, Arc<dyn BlockType>>,
    /// Registration order, used for palette listing
    order: Vec<String>,
    /// Alias key -> canonical key
    aliases: HashMap<String, String>,
}

impl RegistryInner {
    fn canonical<'a>(&'a self, key: &'a str) -> &'a str {
        self.aliases.get(key).map(String::as_str).unwrap_or(key)
    }

    fn lookup(&self, key: &str) -> Option<Arc<dyn BlockType>> {
        self.types.get(self.canonical(key)).cloned()
    }
}

/// Registry of block types
///
/// Cloning is cheap and clones share the same table, guarded by parking_lot's
/// `RwLock` for concurrent reads and exclusive writes.
#[derive(Clone, Default)]
pub struct BlockTypeRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

/// One palette entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub key: String,
    pub label: String,
    pub description: String,
    pub icon: String,
}

/// Palette entries of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteGroup {
    pub category: BlockCategory,
    pub label: String,
    pub entries: Vec<PaletteEntry>,
}

impl BlockTypeRegistry {
    /// Create a new empty registry
    ///
    /// # Example
    /// ```
    /// use page_builder::core::registry::BlockTypeRegistry;
    ///
    /// let registry = BlockTypeRegistry::new();
    /// assert_eq!(registry.count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with every built-in block type
    pub fn with_builtin_types() -> Self {
        let registry = Self::new();
        crate::categories::register_builtin_types(&registry);
        registry
    }

    /// Register a block type
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err(RegistryError)` if the key (or an alias of that name) already exists
    ///   or the type's definition is invalid
    pub fn register(&self, block_type: Arc<dyn BlockType>) -> Result<(), RegistryError> {
        Self::validate_type(&*block_type)?;

        let key = block_type.metadata().id.clone();
        let mut inner = self.inner.write();

        if inner.types.contains_key(&key) || inner.aliases.contains_key(&key) {
            return Err(RegistryError::DuplicateBlockType(key));
        }

        debug!(block_type = %key, "registered block type");
        inner.order.push(key.clone());
        inner.types.insert(key, block_type);
        Ok(())
    }

    /// Unregister a block type and every alias pointing at it
    pub fn unregister(&self, key: &str) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();

        inner
            .types
            .remove(key)
            .ok_or_else(|| RegistryError::BlockTypeNotFound(key.to_string()))?;
        inner.order.retain(|k| k != key);
        inner.aliases.retain(|_, target| target != key);

        Ok(())
    }

    /// Make `alias` resolve to the registered type `target`
    pub fn register_alias(&self, alias: &str, target: &str) -> Result<(), RegistryError> {
        let mut inner = self.inner.write();

        if !inner.types.contains_key(target) {
            return Err(RegistryError::BlockTypeNotFound(target.to_string()));
        }
        if inner.types.contains_key(alias) || inner.aliases.contains_key(alias) {
            return Err(RegistryError::DuplicateBlockType(alias.to_string()));
        }

        inner.aliases.insert(alias.to_string(), target.to_string());
        Ok(())
    }

    /// Get a block type by key or alias
    pub fn get(&self, key: &str) -> Result<Arc<dyn BlockType>, RegistryError> {
        self.lookup(key)
            .ok_or_else(|| RegistryError::BlockTypeNotFound(key.to_string()))
    }

    /// Get a block type by key or alias, `None` when unknown
    pub fn lookup(&self, key: &str) -> Option<Arc<dyn BlockType>> {
        self.inner.read().lookup(key)
    }

    /// Canonical key for `key` (itself unless it is an alias)
    pub fn canonical_key(&self, key: &str) -> String {
        self.inner.read().canonical(key).to_string()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    pub fn count(&self) -> usize {
        self.inner.read().types.len()
    }

    /// Remove every type and alias
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.types.clear();
        inner.order.clear();
        inner.aliases.clear();
    }

    /// Default content for `key`; empty for unknown types
    pub fn default_content(&self, key: &str) -> Content {
        match self.lookup(key) {
            Some(block_type) => block_type.default_content(),
            None => Content::new(),
        }
    }

    /// Palette label for `key`; the raw key for unknown types
    pub fn label(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(block_type) => block_type.metadata().name.clone(),
            None => key.to_string(),
        }
    }

    /// Settings-editor schema for `key`; one raw-JSON field for unknown types
    pub fn content_schema(&self, key: &str) -> Vec<ContentField> {
        match self.lookup(key) {
            Some(block_type) => block_type.content_schema().to_vec(),
            None => vec![ContentField::raw_json()],
        }
    }

    /// All registered types in registration order
    pub fn all_types(&self) -> Vec<Arc<dyn BlockType>> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|key| inner.types.get(key).cloned())
            .collect()
    }

    pub fn types_in_category(&self, category: &BlockCategory) -> Vec<Arc<dyn BlockType>> {
        self.all_types()
            .into_iter()
            .filter(|t| &t.metadata().category == category)
            .collect()
    }

    /// Palette groups in category order, entries in registration order
    ///
    /// Categories without types are omitted.
    pub fn palette(&self) -> Vec<PaletteGroup> {
        let types = self.all_types();
        let mut categories: Vec<BlockCategory> = BlockCategory::PALETTE_ORDER.to_vec();
        for block_type in &types {
            let category = &block_type.metadata().category;
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }

        categories
            .into_iter()
            .filter_map(|category| {
                let entries: Vec<PaletteEntry> = types
                    .iter()
                    .map(|t| t.metadata())
                    .filter(|meta| meta.category == category)
                    .map(|meta| PaletteEntry {
                        key: meta.id.clone(),
                        label: meta.name.clone(),
                        description: meta.description.clone(),
                        icon: meta.icon.clone(),
                    })
                    .collect();
                if entries.is_empty() {
                    return None;
                }
                Some(PaletteGroup {
                    label: category.display_name().to_string(),
                    category,
                    entries,
                })
            })
            .collect()
    }

    /// Search by key, label, description and keywords (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<Arc<dyn BlockType>> {
        let query = query.trim().to_lowercase();

        self.all_types()
            .into_iter()
            .filter(|t| {
                let meta = t.metadata();
                meta.id.to_lowercase().contains(&query)
                    || meta.name.to_lowercase().contains(&query)
                    || meta.description.to_lowercase().contains(&query)
                    || meta.keywords.iter().any(|k| k.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// New block of type `key` with a fresh id, default content and `settings`
    ///
    /// Unknown keys still produce a block (with empty content) so the renderer
    /// can show it as unrecognized.
    pub fn create_block(&self, key: &str, settings: &Settings) -> Block {
        let block_type = self.lookup(key);
        if block_type.is_none() {
            warn!(block_type = %key, "creating block of unregistered type");
        }

        let content = block_type
            .as_ref()
            .map(|t| t.default_content())
            .unwrap_or_default();
        let block = Block::new(BlockId::new(), key, content, RawSettings::from(settings));

        match block_type {
            Some(t) if t.is_container() => block.with_children(Vec::new()),
            _ => block,
        }
    }

    /// Validate a block type before registration
    fn validate_type(block_type: &dyn BlockType) -> Result<(), RegistryError> {
        let meta = block_type.metadata();

        if meta.id.trim().is_empty() {
            return Err(RegistryError::ValidationError("Block type key cannot be empty".into()));
        }

        if meta.name.is_empty() {
            return Err(RegistryError::ValidationError(format!(
                "Block type '{}' needs a palette label",
                meta.id
            )));
        }

        if meta.version.is_empty() {
            return Err(RegistryError::ValidationError(format!(
                "Block type '{}' needs a version",
                meta.id
            )));
        }

        // Field defaults must satisfy the type's own schema.
        for field in block_type.content_schema() {
            let check = field.check(Some(&field.default_value));
            if check.has_warnings() {
                return Err(RegistryError::ValidationError(format!(
                    "Block type '{}': default of {}",
                    meta.id,
                    check.warnings.join("; ")
                )));
            }
        }

        Ok(())
    }
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No type (or alias) with the given key
    #[error("Block type not found: {0}")]
    BlockTypeNotFound(String),

    /// Attempted to register a key that is already taken
    #[error("Duplicate block type: {0}")]
    DuplicateBlockType(String),

    /// Block type definition failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::{BlockError, BlockTypeMetadata};
    use crate::core::parameter::{FieldConstraints, FieldType};
    use crate::core::preview::{PreviewContext, PreviewNode};
    use serde_json::json;

    // Mock block type for testing
    struct MockType {
        metadata: BlockTypeMetadata,
        schema: Vec<ContentField>,
        container: bool,
    }

    impl MockType {
        fn new(key: &str, name: &str, category: BlockCategory) -> Self {
            Self {
                metadata: BlockTypeMetadata {
                    id: key.to_string(),
                    name: name.to_string(),
                    category,
                    description: format!("{} block", name),
                    version: "1.0.0".to_string(),
                    icon: "square".to_string(),
                    keywords: vec![],
                },
                schema: vec![ContentField::new("title", "Titre", FieldType::String, json!("Hi"))],
                container: false,
            }
        }
    }

    impl BlockType for MockType {
        fn metadata(&self) -> &BlockTypeMetadata {
            &self.metadata
        }

        fn default_content(&self) -> Content {
            let mut content = Content::new();
            content.insert("title".into(), json!("Hi"));
            content
        }

        fn content_schema(&self) -> &[ContentField] {
            &self.schema
        }

        fn is_container(&self) -> bool {
            self.container
        }

        fn preview(&self, _ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError> {
            Ok(PreviewNode::placeholder("mock"))
        }
    }

    fn mock(key: &str, name: &str, category: BlockCategory) -> Arc<dyn BlockType> {
        Arc::new(MockType::new(key, name, category))
    }

    #[test]
    fn test_registry_creation() {
        let registry = BlockTypeRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_registration_and_lookup() {
        let registry = BlockTypeRegistry::new();
        registry.register(mock("hero", "Hero", BlockCategory::Layout)).unwrap();

        assert_eq!(registry.count(), 1);
        assert!(registry.contains("hero"));
        assert_eq!(registry.get("hero").unwrap().metadata().name, "Hero");
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = BlockTypeRegistry::new();
        registry.register(mock("hero", "Hero", BlockCategory::Layout)).unwrap();

        let result = registry.register(mock("hero", "Hero 2", BlockCategory::Layout));
        assert!(matches!(result.unwrap_err(), RegistryError::DuplicateBlockType(_)));
    }

    #[test]
    fn test_unregister_removes_aliases() {
        let registry = BlockTypeRegistry::new();
        registry.register(mock("contact-form", "Contact", BlockCategory::Engagement)).unwrap();
        registry.register_alias("contact", "contact-form").unwrap();
        assert!(registry.contains("contact"));

        registry.unregister("contact-form").unwrap();
        assert!(!registry.contains("contact"));
        assert!(matches!(
            registry.unregister("contact-form").unwrap_err(),
            RegistryError::BlockTypeNotFound(_)
        ));
    }

    #[test]
    fn test_alias_resolution() {
        let registry = BlockTypeRegistry::new();
        registry.register(mock("contact-form", "Contact", BlockCategory::Engagement)).unwrap();
        registry.register_alias("contact", "contact-form").unwrap();

        assert_eq!(registry.canonical_key("contact"), "contact-form");
        assert_eq!(registry.label("contact"), "Contact");
        assert!(registry.register_alias("x", "missing").is_err());
        assert!(registry.register_alias("contact", "contact-form").is_err());
    }

    #[test]
    fn test_unknown_type_fallbacks() {
        let registry = BlockTypeRegistry::new();

        assert!(registry.default_content("mystery").is_empty());
        assert_eq!(registry.label("mystery"), "mystery");
        let schema = registry.content_schema("mystery");
        assert_eq!(schema.len(), 1);
        assert_eq!(schema[0].id, "content");
    }

    #[test]
    fn test_palette_groups_in_category_order() {
        let registry = BlockTypeRegistry::new();
        registry.register(mock("text", "Texte", BlockCategory::Content)).unwrap();
        registry.register(mock("hero", "Hero", BlockCategory::Layout)).unwrap();
        registry.register(mock("spacer", "Espace", BlockCategory::Layout)).unwrap();

        let palette = registry.palette();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette[0].category, BlockCategory::Layout);
        let keys: Vec<&str> = palette[0].entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["hero", "spacer"]);
        assert_eq!(palette[1].entries[0].key, "text");
    }

    #[test]
    fn test_types_in_category() {
        let registry = BlockTypeRegistry::new();
        registry.register(mock("a", "A", BlockCategory::Commerce)).unwrap();
        registry.register(mock("b", "B", BlockCategory::Commerce)).unwrap();
        registry.register(mock("c", "C", BlockCategory::Forms)).unwrap();

        assert_eq!(registry.types_in_category(&BlockCategory::Commerce).len(), 2);
        assert_eq!(registry.types_in_category(&BlockCategory::Forms).len(), 1);
        assert!(registry.types_in_category(&BlockCategory::Advanced).is_empty());
    }

    #[test]
    fn test_search() {
        let registry = BlockTypeRegistry::new();
        registry.register(mock("product-grid", "Grille produits", BlockCategory::Commerce)).unwrap();
        registry.register(mock("gallery", "Galerie", BlockCategory::Content)).unwrap();

        assert_eq!(registry.search("GRILLE").len(), 1);
        assert_eq!(registry.search("product").len(), 1);
        assert_eq!(registry.search("block").len(), 2);
    }

    #[test]
    fn test_create_block() {
        let registry = BlockTypeRegistry::new();
        let mut container = MockType::new("columns", "Colonnes", BlockCategory::Layout);
        container.container = true;
        registry.register(Arc::new(container)).unwrap();
        registry.register(mock("hero", "Hero", BlockCategory::Layout)).unwrap();

        let settings = Settings::standard_insert();
        let hero = registry.create_block("hero", &settings);
        assert_eq!(hero.content["title"], json!("Hi"));
        assert_eq!(hero.resolved_settings(), settings);
        assert!(hero.children.is_none());

        let columns = registry.create_block("columns", &settings);
        assert_eq!(columns.children, Some(vec![]));

        let unknown = registry.create_block("mystery", &settings);
        assert!(unknown.content.is_empty());
        assert_ne!(hero.id, columns.id);
    }

    #[test]
    fn test_validation_empty_name() {
        let registry = BlockTypeRegistry::new();
        let result = registry.register(mock("hero", "", BlockCategory::Layout));
        assert!(matches!(result.unwrap_err(), RegistryError::ValidationError(_)));
    }

    #[test]
    fn test_validation_default_violates_schema() {
        let registry = BlockTypeRegistry::new();
        let mut bad = MockType::new("spacer", "Espace", BlockCategory::Layout);
        bad.schema = vec![ContentField::new("height", "Hauteur", FieldType::Number, json!(900))
            .with_constraints(FieldConstraints::new().with_range(0.0, 400.0))];

        let result = registry.register(Arc::new(bad));
        assert!(matches!(result.unwrap_err(), RegistryError::ValidationError(_)));
    }

    #[test]
    fn test_clear() {
        let registry = BlockTypeRegistry::new();
        registry.register(mock("a", "A", BlockCategory::Layout)).unwrap();
        registry.register_alias("b", "a").unwrap();
        registry.clear();
        assert_eq!(registry.count(), 0);
        assert!(!registry.contains("b"));
    }

    #[test]
    fn test_clones_share_table() {
        let registry = BlockTypeRegistry::new();
        let clone = registry.clone();
        clone.register(mock("a", "A", BlockCategory::Layout)).unwrap();
        assert!(registry.contains("a"));
    }

    #[test]
    fn test_thread_safety() {
        use std::thread;

        let registry = BlockTypeRegistry::new();
        let mut handles = vec![];

        for i in 0..10 {
            let registry_clone = registry.clone();
            let handle = thread::spawn(move || {
                registry_clone
                    .register(mock(&format!("type-{}", i), &format!("Type {}", i), BlockCategory::Advanced))
                    .unwrap();
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.count(), 10);
    }
}
