//! Viewport renderer
//!
//! Filters a document by per-device visibility and dispatches every remaining
//! block to its type's preview function. A block that cannot be previewed
//! (unknown type, preview error) becomes a placeholder; its siblings still
//! render.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::core::preview::BlockFrame;
use crate::core::{
    Block, BlockId, BlockTypeRegistry, CatalogData, PreviewContext, PreviewNode, PreviewState, RenderedBlock,
    Viewport,
};

use super::timer::Timer;

pub const UNKNOWN_BLOCK_MESSAGE: &str = "Bloc non reconnu";
pub const BROKEN_BLOCK_MESSAGE: &str = "Aperçu indisponible";

// ── Result types ────────────────────────────────────────────────────────────

/// Output of one render pass
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPass {
    pub viewport: Viewport,
    /// Visible top-level blocks, in document order
    pub blocks: Vec<RenderedBlock>,
    /// Blocks (at any depth) skipped because they are hidden on this viewport
    pub hidden: Vec<BlockId>,
    /// Blocks rendered through the placeholder path
    pub fallbacks: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: f64,
}

impl RenderPass {
    pub fn ids(&self) -> Vec<&BlockId> {
        self.blocks.iter().map(|b| &b.block_id).collect()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.iter().any(|b| &b.block_id == id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&RenderedBlock> {
        self.blocks.iter().find(|b| &b.block_id == id)
    }
}

// ── Renderer ────────────────────────────────────────────────────────────────

/// Read-only view over everything a render pass needs
pub struct ViewportRenderer<'a> {
    registry: &'a BlockTypeRegistry,
    catalog: &'a CatalogData,
    state: &'a PreviewState,
}

impl<'a> ViewportRenderer<'a> {
    pub fn new(registry: &'a BlockTypeRegistry, catalog: &'a CatalogData, state: &'a PreviewState) -> Self {
        Self {
            registry,
            catalog,
            state,
        }
    }

    /// Render every visible top-level block of `blocks`
    pub fn render(&self, blocks: &[Block], viewport: Viewport) -> RenderPass {
        let timer = Timer::now();
        let mut hidden = Vec::new();
        let mut fallbacks = 0;
        let rendered = self.render_list(blocks, viewport, &mut hidden, &mut fallbacks);

        RenderPass {
            viewport,
            blocks: rendered,
            hidden,
            fallbacks,
            duration_ms: timer.elapsed_ms(),
        }
    }

    /// Render a single block, `None` when it is hidden on `viewport`
    pub fn render_block(&self, block: &Block, viewport: Viewport) -> Option<RenderedBlock> {
        let mut hidden = Vec::new();
        let mut fallbacks = 0;
        self.render_one(block, viewport, &mut hidden, &mut fallbacks)
    }

    fn render_list(
        &self,
        blocks: &[Block],
        viewport: Viewport,
        hidden: &mut Vec<BlockId>,
        fallbacks: &mut usize,
    ) -> Vec<RenderedBlock> {
        blocks
            .iter()
            .filter_map(|block| self.render_one(block, viewport, hidden, fallbacks))
            .collect()
    }

    fn render_one(
        &self,
        block: &Block,
        viewport: Viewport,
        hidden: &mut Vec<BlockId>,
        fallbacks: &mut usize,
    ) -> Option<RenderedBlock> {
        let settings = block.resolved_settings();
        if !settings.is_visible(viewport) {
            hidden.push(block.id.clone());
            return None;
        }

        let Some(block_type) = self.registry.lookup(&block.block_type) else {
            warn!(block = %block.id, block_type = %block.block_type, "unknown block type, rendering placeholder");
            *fallbacks += 1;
            return Some(RenderedBlock {
                block_id: block.id.clone(),
                block_type: block.block_type.clone(),
                label: self.registry.label(&block.block_type),
                frame: BlockFrame::from(&settings),
                body: PreviewNode::Placeholder {
                    message: format!("{} : {}", UNKNOWN_BLOCK_MESSAGE, block.block_type),
                    raw: Some(Value::Object(block.content.clone())),
                },
                fallback: true,
            });
        };

        let children = match &block.children {
            Some(children) => self.render_list(children, viewport, hidden, fallbacks),
            None => Vec::new(),
        };
        let content = block_type.resolve_content(&block.content);
        let ctx = PreviewContext {
            block_id: &block.id,
            block_type: &block.block_type,
            content: &content,
            settings: &settings,
            viewport,
            catalog: self.catalog,
            state: self.state,
            children: &children,
        };

        let (body, fallback) = match block_type.preview(&ctx) {
            Ok(body) => (body, false),
            Err(err) => {
                warn!(block = %block.id, block_type = %block.block_type, error = %err, "preview failed, rendering placeholder");
                *fallbacks += 1;
                (
                    PreviewNode::Placeholder {
                        message: format!("{} : {}", BROKEN_BLOCK_MESSAGE, err),
                        raw: Some(Value::Object(block.content.clone())),
                    },
                    true,
                )
            }
        };

        Some(RenderedBlock {
            block_id: block.id.clone(),
            block_type: block.block_type.clone(),
            label: block_type.metadata().name.clone(),
            frame: BlockFrame::from(&settings),
            body,
            fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
    use crate::core::parameter::ContentField;
    use crate::core::{Content, RawSettings};
    use crate::categories::BlockCategory;
    use serde_json::json;
    use std::sync::Arc;

    fn block(id: &str, block_type: &str, settings: Value) -> Block {
        Block::new(
            BlockId::from(id),
            block_type,
            Content::new(),
            serde_json::from_value::<RawSettings>(settings).unwrap(),
        )
    }

    fn pass(blocks: &[Block], viewport: Viewport) -> RenderPass {
        let registry = BlockTypeRegistry::with_builtin_types();
        let catalog = CatalogData::default();
        let state = PreviewState::new();
        ViewportRenderer::new(&registry, &catalog, &state).render(blocks, viewport)
    }

    #[test]
    fn test_visibility_filter() {
        let blocks = vec![
            block("a", "text", json!({})),
            block("b", "text", json!({ "visibility": { "mobile": false } })),
        ];
        let mobile = pass(&blocks, Viewport::Mobile);
        assert_eq!(mobile.ids(), vec![&BlockId::from("a")]);
        assert_eq!(mobile.hidden, vec![BlockId::from("b")]);

        for viewport in [Viewport::Desktop, Viewport::Tablet] {
            assert!(pass(&blocks, viewport).contains(&BlockId::from("b")));
        }
    }

    #[test]
    fn test_non_boolean_visibility_counts_as_visible() {
        let blocks = vec![block("a", "text", json!({ "visibility": { "mobile": "no" } }))];
        assert!(pass(&blocks, Viewport::Mobile).contains(&BlockId::from("a")));
    }

    #[test]
    fn test_unknown_type_does_not_halt_siblings() {
        let mut mystery = block("m", "mystery-widget", json!({}));
        mystery.content.insert("foo".into(), json!(1));
        let blocks = vec![block("a", "text", json!({})), mystery, block("c", "spacer", json!({}))];

        let rendered = pass(&blocks, Viewport::Desktop);
        assert_eq!(rendered.blocks.len(), 3);
        assert_eq!(rendered.fallbacks, 1);

        let fallback = rendered.get(&BlockId::from("m")).unwrap();
        assert!(fallback.fallback);
        assert_eq!(fallback.label, "mystery-widget");
        match &fallback.body {
            PreviewNode::Placeholder { message, raw } => {
                assert!(message.starts_with(UNKNOWN_BLOCK_MESSAGE));
                assert_eq!(raw, &Some(json!({ "foo": 1 })));
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_frame_carries_resolved_settings() {
        let blocks = vec![block("a", "text", json!({ "padding": { "top": 12 }, "backgroundColor": "#fafafa" }))];
        let rendered = pass(&blocks, Viewport::Desktop);
        let frame = &rendered.blocks[0].frame;
        assert_eq!(frame.padding.top, 12.0);
        assert_eq!(frame.padding.bottom, 0.0);
        assert_eq!(frame.background_color.as_deref(), Some("#fafafa"));
    }

    #[test]
    fn test_hidden_children_are_skipped() {
        let columns = block("cols", "columns", json!({})).with_children(vec![
            block("c1", "text", json!({})),
            block("c2", "text", json!({ "visibility": { "tablet": false } })),
        ]);
        let rendered = pass(&[columns], Viewport::Tablet);
        assert_eq!(rendered.hidden, vec![BlockId::from("c2")]);
        let nested: Vec<&BlockId> = rendered.blocks[0]
            .body
            .children()
            .into_iter()
            .filter_map(|n| match n {
                PreviewNode::Nested { block } => Some(&block.block_id),
                _ => None,
            })
            .collect();
        assert_eq!(nested, vec![&BlockId::from("c1")]);
    }

    struct FailingBlock {
        metadata: BlockTypeMetadata,
    }

    impl BlockType for FailingBlock {
        fn metadata(&self) -> &BlockTypeMetadata {
            &self.metadata
        }

        fn default_content(&self) -> Content {
            Content::new()
        }

        fn content_schema(&self) -> &[ContentField] {
            &[]
        }

        fn preview(&self, _ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError> {
            Err(BlockError::PreviewError("boom".into()))
        }
    }

    #[test]
    fn test_preview_error_becomes_placeholder() {
        let registry = BlockTypeRegistry::new();
        registry
            .register(Arc::new(FailingBlock {
                metadata: BlockTypeMetadata {
                    id: "failing".into(),
                    name: "Failing".into(),
                    category: BlockCategory::Advanced,
                    description: "Always fails".into(),
                    version: "1.0.0".into(),
                    icon: "x".into(),
                    keywords: vec![],
                },
            }))
            .unwrap();
        let catalog = CatalogData::default();
        let state = PreviewState::new();
        let renderer = ViewportRenderer::new(&registry, &catalog, &state);

        let rendered = renderer.render_block(&block("f", "failing", json!({})), Viewport::Desktop).unwrap();
        assert!(rendered.fallback);
        assert!(rendered.body.is_placeholder());
    }
}
