//! Page Builder - block-based page editing engine
//!
//! This crate provides the document model, block-type registry, undo/redo
//! history, drag/drop controller and viewport renderer behind the admin page
//! editor, plus the built-in block types and starter templates.

pub mod categories;
pub mod config;
pub mod core;
pub mod runtime;
pub mod templates;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use categories::BlockCategory;
pub use config::{ConfigError, EditorConfig};
pub use core::{Block, BlockId, BlockTypeRegistry, Document, EditStatus, Settings, SettingsPatch, Viewport};
pub use runtime::{EditorSession, HistoryLimit, RenderPass};
pub use templates::PageTemplate;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
