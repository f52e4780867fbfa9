//! WASM API: `#[wasm_bindgen]` exports for the admin page editor.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_editor` / `destroy_editor`: lifecycle
//! - `load_document` / `get_document`: persisted JSON in and out
//! - `insert_block`, `delete_block`, `duplicate_block`, `update_content`,
//!   `update_settings`, `move_block`, `keyboard_move`: committed edits
//! - `undo` / `redo`
//! - `start_drag`, `drag_over`, `drag_leave`, `drop_drag`, `cancel_drag`
//! - `render` / `tick` / `teardown_preview`: preview
//! - `request_save` / `complete_save`: the JS side owns the transport
//! - `get_palette` / `get_templates` / `create_from_template`: discovery
//!
//! Every function returns a JSON string; failures are `{ "error": "..." }`.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::EditorConfig;
use crate::core::content::content_from;
use crate::core::{BlockId, BlockTypeRegistry, CatalogData, EditStatus, SettingsPatch, Viewport};
use crate::runtime::{
    BlockBounds, Direction, DragSource, EditorSession, PageMeta, PersistenceError, SaveTicket,
};
use crate::templates::PageTemplate;

// ── Global state ────────────────────────────────────────────────────────────

thread_local! {
    static EDITOR: RefCell<Option<EditorSession>> = RefCell::new(None);
}

fn with_editor<R>(f: impl FnOnce(&mut EditorSession) -> R) -> Result<R, String> {
    EDITOR.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(editor) => Ok(f(editor)),
            None => Err("Editor not initialized. Call init_editor() first.".into()),
        }
    })
}

// ── JSON interchange types ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DragSourceJson {
    #[serde(default)]
    block_id: Option<String>,
    #[serde(default)]
    block_type: Option<String>,
}

#[derive(Deserialize)]
struct BoundsJson {
    id: String,
    top: f64,
    height: f64,
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    block_id: Option<String>,
    revision: u64,
    can_undo: bool,
    can_redo: bool,
    dirty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveRequestResponse {
    /// `false` when a save is already in flight
    started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    revision: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<crate::runtime::SavePayload>,
}

#[derive(Serialize)]
struct TemplateInfo {
    key: &'static str,
    label: &'static str,
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_err(format!("Serialization failed: {}", e)))
}

fn edit_response(editor: &EditorSession, status: EditStatus) -> String {
    let (name, block_id) = match status {
        EditStatus::Applied => ("applied", None),
        EditStatus::Inserted(id) => ("inserted", Some(id.0)),
        EditStatus::Unchanged => ("unchanged", None),
        EditStatus::NotFound(id) => ("not-found", Some(id.0)),
        EditStatus::DuplicateId(id) => ("duplicate-id", Some(id.0)),
    };
    to_json(&EditResponse {
        status: name,
        block_id,
        revision: editor.revision(),
        can_undo: editor.can_undo(),
        can_redo: editor.can_redo(),
        dirty: editor.is_dirty(),
    })
}

fn edit(f: impl FnOnce(&mut EditorSession) -> EditStatus) -> String {
    with_editor(|editor| {
        let status = f(editor);
        edit_response(editor, status)
    })
    .unwrap_or_else(json_err)
}

// ── Exported functions ──────────────────────────────────────────────────────

#[wasm_bindgen]
pub fn init_editor(config_json: &str, catalog_json: &str) -> String {
    console_error_panic_hook::set_once();

    let config = if config_json.trim().is_empty() {
        EditorConfig::default()
    } else {
        match EditorConfig::from_json(config_json) {
            Ok(c) => c,
            Err(e) => return json_err(e.to_string()),
        }
    };
    let catalog: CatalogData = if catalog_json.trim().is_empty() {
        CatalogData::default()
    } else {
        match serde_json::from_str(catalog_json) {
            Ok(c) => c,
            Err(e) => return json_err(format!("Invalid catalog JSON: {}", e)),
        }
    };

    match EditorSession::new(BlockTypeRegistry::with_builtin_types(), config) {
        Ok(session) => {
            EDITOR.with(|cell| *cell.borrow_mut() = Some(session.with_catalog(catalog)));
            "{}".into()
        }
        Err(e) => json_err(e.to_string()),
    }
}

#[wasm_bindgen]
pub fn destroy_editor() {
    EDITOR.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn load_document(document_json: &str, meta_json: &str) -> String {
    let meta: PageMeta = serde_json::from_str(meta_json).unwrap_or_default();
    match with_editor(|editor| editor.load_json(document_json, meta).map(|_| editor.document().len())) {
        Ok(Ok(count)) => format!("{{\"blocks\":{}}}", count),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn get_document() -> String {
    match with_editor(|editor| editor.document().to_json()) {
        Ok(Ok(json)) => json,
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn insert_block(block_type: &str, index: usize) -> String {
    edit(|editor| editor.insert_block(block_type, index))
}

#[wasm_bindgen]
pub fn delete_block(id: &str) -> String {
    edit(|editor| editor.delete_block(&BlockId::from(id)))
}

#[wasm_bindgen]
pub fn duplicate_block(id: &str) -> String {
    edit(|editor| editor.duplicate_block(&BlockId::from(id)))
}

#[wasm_bindgen]
pub fn update_content(id: &str, patch_json: &str) -> String {
    let patch = match serde_json::from_str::<serde_json::Value>(patch_json) {
        Ok(value @ serde_json::Value::Object(_)) => content_from(value),
        Ok(_) => return json_err("Content patch must be a JSON object"),
        Err(e) => return json_err(format!("Invalid patch JSON: {}", e)),
    };
    edit(|editor| editor.update_content(&BlockId::from(id), &patch))
}

#[wasm_bindgen]
pub fn update_settings(id: &str, patch_json: &str) -> String {
    let patch: SettingsPatch = match serde_json::from_str(patch_json) {
        Ok(p) => p,
        Err(e) => return json_err(format!("Invalid settings patch: {}", e)),
    };
    edit(|editor| editor.update_settings(&BlockId::from(id), &patch))
}

#[wasm_bindgen]
pub fn move_block(id: &str, index: usize) -> String {
    edit(|editor| editor.move_block(&BlockId::from(id), index))
}

#[wasm_bindgen]
pub fn keyboard_move(id: &str, direction: &str) -> String {
    let direction = match direction {
        "up" => Direction::Up,
        "down" => Direction::Down,
        other => return json_err(format!("Unknown direction '{}'", other)),
    };
    edit(|editor| editor.keyboard_move(&BlockId::from(id), direction))
}

#[wasm_bindgen]
pub fn undo() -> bool {
    with_editor(|editor| editor.undo()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn redo() -> bool {
    with_editor(|editor| editor.redo()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn select_block(id: &str) -> bool {
    with_editor(|editor| editor.select(&BlockId::from(id))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn start_drag(source_json: &str, x: f64, y: f64) -> String {
    let source: DragSourceJson = match serde_json::from_str(source_json) {
        Ok(s) => s,
        Err(e) => return json_err(format!("Invalid drag source: {}", e)),
    };
    let source = match (source.block_id, source.block_type) {
        (Some(id), _) => DragSource::ExistingBlock(BlockId::from(id)),
        (None, Some(block_type)) => DragSource::PaletteTemplate(block_type),
        (None, None) => return json_err("Drag source needs blockId or blockType"),
    };
    with_editor(|editor| editor.start_drag(source, x, y))
        .map(|_| "{}".to_string())
        .unwrap_or_else(json_err)
}

/// Returns the insertion gap under the pointer, or -1 when there is none
#[wasm_bindgen]
pub fn drag_over(x: f64, y: f64, bounds_json: &str) -> i32 {
    let bounds: Vec<BlockBounds> = match serde_json::from_str::<Vec<BoundsJson>>(bounds_json) {
        Ok(raw) => raw
            .into_iter()
            .map(|b| BlockBounds::new(BlockId::from(b.id), b.top, b.height))
            .collect(),
        Err(_) => return -1,
    };
    with_editor(|editor| editor.drag_over(x, y, &bounds))
        .ok()
        .flatten()
        .map_or(-1, |gap| gap as i32)
}

#[wasm_bindgen]
pub fn drag_leave() {
    let _ = with_editor(|editor| editor.drag_leave());
}

#[wasm_bindgen]
pub fn drop_drag() -> String {
    edit(|editor| editor.drop())
}

#[wasm_bindgen]
pub fn cancel_drag() {
    let _ = with_editor(|editor| editor.cancel_drag());
}

#[wasm_bindgen]
pub fn render(viewport: &str) -> String {
    let viewport: Viewport = match viewport.parse() {
        Ok(v) => v,
        Err(e) => return json_err(e),
    };
    with_editor(|editor| to_json(&editor.render(viewport))).unwrap_or_else(json_err)
}

/// Advance autoplay previews; returns the ids that changed slide
#[wasm_bindgen]
pub fn tick() -> String {
    with_editor(|editor| to_json(&editor.tick())).unwrap_or_else(json_err)
}

#[wasm_bindgen]
pub fn teardown_preview() {
    let _ = with_editor(|editor| editor.teardown_preview());
}

#[wasm_bindgen]
pub fn set_meta(title: Option<String>, description: Option<String>) -> String {
    with_editor(|editor| {
        editor.set_meta_title(title);
        editor.set_meta_description(description);
        let warnings: Vec<String> = editor.meta().lint().iter().map(|w| format!("{:?}", w)).collect();
        to_json(&warnings)
    })
    .unwrap_or_else(json_err)
}

#[wasm_bindgen]
pub fn request_save(publish: bool) -> String {
    with_editor(|editor| {
        let response = match editor.request_save(publish) {
            Some((ticket, payload)) => SaveRequestResponse {
                started: true,
                revision: Some(ticket.revision),
                payload: Some(payload),
            },
            None => SaveRequestResponse {
                started: false,
                revision: None,
                payload: None,
            },
        };
        to_json(&response)
    })
    .unwrap_or_else(json_err)
}

/// Report the transport result of the save started for `revision`
///
/// `status` 0 means success; anything else is the HTTP status of the refusal.
#[wasm_bindgen]
pub fn complete_save(revision: u64, publish: bool, status: u16, message: &str) -> String {
    let ticket = SaveTicket { revision, publish };
    let result = if status == 0 {
        Ok(())
    } else {
        Err(PersistenceError::Rejected {
            status,
            message: message.to_string(),
        })
    };
    match with_editor(|editor| editor.complete_save(ticket, result)) {
        Ok(Ok(())) => "{}".into(),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn get_palette() -> String {
    with_editor(|editor| to_json(&editor.registry().palette())).unwrap_or_else(json_err)
}

#[wasm_bindgen]
pub fn get_content_schema(block_type: &str) -> String {
    with_editor(|editor| to_json(&editor.registry().content_schema(block_type))).unwrap_or_else(json_err)
}

#[wasm_bindgen]
pub fn get_templates() -> String {
    let templates: Vec<TemplateInfo> = PageTemplate::ALL
        .iter()
        .map(|t| TemplateInfo {
            key: t.key(),
            label: t.label(),
        })
        .collect();
    to_json(&templates)
}

/// Persisted JSON of a fresh document built from `template`
#[wasm_bindgen]
pub fn create_from_template(template: &str) -> String {
    match PageTemplate::from_key(template).instantiate().to_json() {
        Ok(json) => json,
        Err(e) => json_err(e.to_string()),
    }
}
