//! Editing session
//!
//! [`EditorSession`] ties the pure pieces together for one page: the live
//! document, its history, the drag controller, session-local UI state
//! (selection, preview slides, autoplay timers) and save bookkeeping.
//!
//! Every committed document mutation goes through one path: apply the pure
//! document edit, push exactly one history entry, bump the revision. Edits
//! that change nothing (stale id, drop at the same place, identical patch)
//! push nothing.

pub mod drag;
pub mod history;
pub mod persistence;
pub mod render;
pub mod timer;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigError, EditorConfig};
use crate::core::{
    BlockId, BlockTypeRegistry, CatalogData, Content, Document, DocumentError, Edit, EditStatus, PreviewState,
    SettingsPatch, Viewport,
};

pub use drag::{BlockBounds, Direction, DragController, DragPhase, DragSource, DropCommand, NoDrop};
pub use history::{History, HistoryLimit};
pub use persistence::{
    JsonFileStore, MemoryStore, PersistenceAdapter, PersistenceError, SaveCoordinator, SavePayload, SaveTicket,
};
pub use render::{RenderPass, ViewportRenderer};
pub use timer::{PreviewTimers, Timer};

/// Recommended maximum length of the page title
pub const META_TITLE_MAX: usize = 60;
/// Recommended maximum length of the page description
pub const META_DESCRIPTION_MAX: usize = 160;

// ── Session-local state ─────────────────────────────────────────────────────

/// Selected block and settings panel; never persisted or snapshotted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    block: Option<BlockId>,
    panel_open: bool,
}

impl Selection {
    pub fn block(&self) -> Option<&BlockId> {
        self.block.as_ref()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    fn select(&mut self, id: BlockId) {
        self.block = Some(id);
        self.panel_open = true;
    }

    fn clear(&mut self) {
        self.block = None;
        self.panel_open = false;
    }
}

/// SEO metadata of the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaWarning {
    MissingTitle,
    MissingDescription,
    TitleTooLong { length: usize },
    DescriptionTooLong { length: usize },
}

impl PageMeta {
    /// Advisory checks against the recommended lengths
    pub fn lint(&self) -> Vec<MetaWarning> {
        let mut warnings = Vec::new();
        match self.meta_title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            None => warnings.push(MetaWarning::MissingTitle),
            Some(title) if title.chars().count() > META_TITLE_MAX => warnings.push(MetaWarning::TitleTooLong {
                length: title.chars().count(),
            }),
            Some(_) => {}
        }
        match self.meta_description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            None => warnings.push(MetaWarning::MissingDescription),
            Some(desc) if desc.chars().count() > META_DESCRIPTION_MAX => {
                warnings.push(MetaWarning::DescriptionTooLong {
                    length: desc.chars().count(),
                })
            }
            Some(_) => {}
        }
        warnings
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Session ─────────────────────────────────────────────────────────────────

pub struct EditorSession {
    registry: BlockTypeRegistry,
    catalog: CatalogData,
    config: EditorConfig,
    document: Document,
    history: History,
    drag: DragController,
    selection: Selection,
    meta: PageMeta,
    preview: PreviewState,
    timers: PreviewTimers,
    preview_mounted: bool,
    clock: Timer,
    now_ms: f64,
    revision: u64,
    saves: SaveCoordinator,
}

impl EditorSession {
    /// Session over an empty document
    pub fn new(registry: BlockTypeRegistry, config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(registry, config))
    }

    /// Session with the built-in block types and default configuration
    pub fn with_defaults() -> Self {
        Self::build(BlockTypeRegistry::with_builtin_types(), EditorConfig::default())
    }

    fn build(registry: BlockTypeRegistry, config: EditorConfig) -> Self {
        Self {
            history: History::new(Document::default(), config.history_limit),
            drag: DragController::new(config.drag.activation_distance),
            registry,
            catalog: CatalogData::default(),
            config,
            document: Document::default(),
            selection: Selection::default(),
            meta: PageMeta::default(),
            preview: PreviewState::new(),
            timers: PreviewTimers::new(),
            preview_mounted: true,
            clock: Timer::now(),
            now_ms: 0.0,
            revision: 0,
            saves: SaveCoordinator::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: CatalogData) -> Self {
        self.catalog = catalog;
        self.sync_timers();
        self
    }

    /// Start editing `document` (freshly loaded from storage)
    ///
    /// History restarts with the document as baseline and the session is
    /// considered saved.
    pub fn load(&mut self, document: Document, meta: PageMeta) {
        self.drag.force_cancel();
        self.selection.clear();
        self.timers.teardown();
        self.preview.clear();
        self.history.reset(document.clone());
        self.document = document;
        self.meta = meta;
        self.revision += 1;
        self.saves.mark_saved(self.revision);
        self.sync_timers();
        debug!(blocks = self.document.len(), "document loaded");
    }

    /// Parse and load a persisted `{ "blocks": [...] }` document
    pub fn load_json(&mut self, json: &str, meta: PageMeta) -> Result<(), DocumentError> {
        let document = Document::from_json(json)?;
        self.load(document, meta);
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &BlockTypeRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &CatalogData {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    pub fn preview_state(&self) -> &PreviewState {
        &self.preview
    }

    pub fn timers(&self) -> &PreviewTimers {
        &self.timers
    }

    /// Monotonic counter bumped on every document or metadata change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ── Document mutations ──────────────────────────────────────────────────

    /// Insert a new block of `block_type` at `index` and select it
    pub fn insert_block(&mut self, block_type: &str, index: usize) -> EditStatus {
        let block = self.registry.create_block(block_type, &self.config.insert_settings);
        let edit = self.document.insert_at(index, block);
        self.commit("insert", edit)
    }

    /// Insert a new block of `block_type` inside the container `parent`
    pub fn insert_child(&mut self, parent: &BlockId, index: usize, block_type: &str) -> EditStatus {
        let block = self.registry.create_block(block_type, &self.config.insert_settings);
        let edit = self.document.insert_child(parent, index, block);
        self.commit("insert-child", edit)
    }

    pub fn delete_block(&mut self, id: &BlockId) -> EditStatus {
        let edit = self.document.delete_by_id(id);
        self.commit("delete", edit)
    }

    /// Copy a block right after itself and select the copy
    pub fn duplicate_block(&mut self, id: &BlockId) -> EditStatus {
        let edit = self.document.duplicate_by_id(id);
        self.commit("duplicate", edit)
    }

    pub fn update_content(&mut self, id: &BlockId, patch: &Content) -> EditStatus {
        let edit = self.document.update_content(id, patch);
        self.commit("update-content", edit)
    }

    pub fn update_settings(&mut self, id: &BlockId, patch: &SettingsPatch) -> EditStatus {
        let edit = self.document.update_settings(id, patch);
        self.commit("update-settings", edit)
    }

    pub fn move_block(&mut self, id: &BlockId, index: usize) -> EditStatus {
        let edit = self.document.move_to(id, index);
        self.commit("move", edit)
    }

    /// Move a top-level block one step, through the keyboard drag path
    pub fn keyboard_move(&mut self, id: &BlockId, direction: Direction) -> EditStatus {
        if !self.drag.start_keyboard(id, &self.document) {
            return EditStatus::NotFound(id.clone());
        }
        self.drag.nudge(direction);
        self.drop()
    }

    fn commit(&mut self, action: &'static str, edit: Edit) -> EditStatus {
        let status = edit.status.clone();
        if !edit.is_committed() {
            debug!(action, ?status, "edit not applied");
            return status;
        }

        self.document = edit.document;
        self.history.push(self.document.clone());
        self.revision += 1;
        debug!(
            action,
            revision = self.revision,
            blocks = self.document.len(),
            history = self.history.len(),
            "document committed"
        );

        if let EditStatus::Inserted(id) = &status {
            self.selection.select(id.clone());
        }
        self.after_document_change();
        status
    }

    fn after_document_change(&mut self) {
        if let Some(selected) = self.selection.block() {
            if !self.document.contains(selected) {
                self.selection.clear();
            }
        }
        self.sync_timers();
    }

    fn sync_timers(&mut self) {
        if !self.preview_mounted {
            return;
        }
        let cancelled = self
            .timers
            .sync(&self.document.blocks, &self.registry, &self.catalog, self.now_ms);
        for id in cancelled {
            self.preview.forget(&id);
        }
    }

    // ── History ─────────────────────────────────────────────────────────────

    /// Step back one committed mutation; cancels any drag in progress
    pub fn undo(&mut self) -> bool {
        self.drag.force_cancel();
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.document = snapshot.clone();
        self.revision += 1;
        self.after_document_change();
        true
    }

    /// Re-apply the last undone mutation; cancels any drag in progress
    pub fn redo(&mut self) -> bool {
        self.drag.force_cancel();
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.document = snapshot.clone();
        self.revision += 1;
        self.after_document_change();
        true
    }

    // ── Drag and drop ───────────────────────────────────────────────────────

    pub fn start_drag(&mut self, source: DragSource, x: f64, y: f64) {
        self.drag.start_pointer(source, x, y);
    }

    pub fn start_keyboard_drag(&mut self, id: &BlockId) -> bool {
        self.drag.start_keyboard(id, &self.document)
    }

    /// Pointer moved; returns the insertion gap under it (visual only)
    pub fn drag_over(&mut self, x: f64, y: f64, bounds: &[BlockBounds]) -> Option<usize> {
        self.drag.drag_over(x, y, bounds)
    }

    pub fn drag_leave(&mut self) {
        self.drag.drag_leave();
    }

    pub fn nudge(&mut self, direction: Direction) -> Option<usize> {
        self.drag.nudge(direction)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Finish the current gesture and apply its command
    pub fn drop(&mut self) -> EditStatus {
        let source = self.drag_source_id();
        let command = self.drag.drop(&self.document);
        let status = match command {
            DropCommand::Insert { block_type, index } => self.insert_block(&block_type, index),
            DropCommand::Move { id, to } => self.move_block(&id, to),
            DropCommand::None(NoDrop::SourceMissing) => match source {
                Some(id) => EditStatus::NotFound(id),
                None => EditStatus::Unchanged,
            },
            DropCommand::None(_) => EditStatus::Unchanged,
        };
        self.drag.acknowledge();
        status
    }

    fn drag_source_id(&self) -> Option<BlockId> {
        match self.drag.session()?.source() {
            DragSource::ExistingBlock(id) => Some(id.clone()),
            DragSource::PaletteTemplate(_) => None,
        }
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Select a block; `false` when it is not in the document
    pub fn select(&mut self, id: &BlockId) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.selection.select(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn close_panel(&mut self) {
        self.selection.panel_open = false;
    }

    // ── Page metadata ───────────────────────────────────────────────────────

    pub fn set_meta_title(&mut self, title: Option<String>) {
        let title = non_empty(title);
        if self.meta.meta_title != title {
            self.meta.meta_title = title;
            self.revision += 1;
        }
    }

    pub fn set_meta_description(&mut self, description: Option<String>) {
        let description = non_empty(description);
        if self.meta.meta_description != description {
            self.meta.meta_description = description;
            self.revision += 1;
        }
    }

    // ── Preview ─────────────────────────────────────────────────────────────

    /// Render the live document for `viewport`
    pub fn render(&self, viewport: Viewport) -> RenderPass {
        ViewportRenderer::new(&self.registry, &self.catalog, &self.preview).render(&self.document.blocks, viewport)
    }

    /// Jump a carousel-like preview to `index`
    pub fn show_slide(&mut self, id: &BlockId, index: usize) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        self.preview.set_slide(id, index);
        true
    }

    /// Fire due autoplay timers using the session clock
    pub fn tick(&mut self) -> Vec<BlockId> {
        let now = self.clock.elapsed_ms();
        self.tick_at(now)
    }

    /// Fire due autoplay timers at `now_ms`; returns the blocks that advanced
    pub fn tick_at(&mut self, now_ms: f64) -> Vec<BlockId> {
        self.now_ms = self.now_ms.max(now_ms);
        self.timers.poll(self.now_ms, &mut self.preview)
    }

    /// Preview unmounted: cancel every timer and forget preview state
    ///
    /// Edits made while unmounted do not start timers again.
    pub fn teardown_preview(&mut self) {
        self.preview_mounted = false;
        self.timers.teardown();
        self.preview.clear();
    }

    /// Preview mounted again: restart timers for the current document
    pub fn resume_preview(&mut self) {
        self.preview_mounted = true;
        self.sync_timers();
    }

    pub fn is_preview_mounted(&self) -> bool {
        self.preview_mounted
    }

    // ── Saving ──────────────────────────────────────────────────────────────

    pub fn is_dirty(&self) -> bool {
        self.saves.is_dirty(self.revision)
    }

    pub fn is_saving(&self) -> bool {
        self.saves.is_saving()
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.saves.last_error()
    }

    /// Payload for the current revision; `None` while a save is in flight
    ///
    /// Editing may continue while the save runs; hand the result to
    /// [`complete_save`](Self::complete_save).
    pub fn request_save(&mut self, publish: bool) -> Option<(SaveTicket, SavePayload)> {
        let ticket = self.saves.begin(self.revision, publish)?;
        let payload = SavePayload::new(&self.document)
            .with_meta(self.meta.meta_title.clone(), self.meta.meta_description.clone())
            .publish(publish);
        Some((ticket, payload))
    }

    /// Record the adapter's result; a failure leaves every edit in place
    pub fn complete_save(&mut self, ticket: SaveTicket, result: Result<(), PersistenceError>) -> Result<(), PersistenceError> {
        self.saves.finish(ticket, result)
    }

    /// Save through `adapter`; `Ok(None)` when coalesced with a save in flight
    pub async fn save(
        &mut self,
        adapter: &dyn PersistenceAdapter,
        publish: bool,
    ) -> Result<Option<u64>, PersistenceError> {
        let Some((ticket, payload)) = self.request_save(publish) else {
            return Ok(None);
        };
        let result = adapter.save(&payload).await;
        self.complete_save(ticket, result)?;
        Ok(Some(ticket.revision))
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::with_defaults()
    }
}
