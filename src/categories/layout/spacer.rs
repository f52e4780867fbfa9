//! Spacer Block
//!
//! Empty vertical space. Mobile previews use half the configured height.

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

pub struct SpacerBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl SpacerBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "spacer".into(),
                name: "Espacement".into(),
                category: BlockCategory::Layout,
                description: "Espace vertical".into(),
                version: "1.0.0".into(),
                icon: "move-vertical".into(),
                keywords: vec!["space".into(), "gap".into()],
            },
            schema: vec![ContentField::new("height", "Hauteur", FieldType::Number, json!(60))
                .with_constraints(FieldConstraints::new().with_range(0.0, 400.0))
                .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(10.0).with_unit("px"))],
        }
    }
}

impl Default for SpacerBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for SpacerBlock {
    fn metadata(&self) -> &BlockTypeMetadata {
        &self.metadata
    }

    fn default_content(&self) -> Content {
        defaults_from_schema(&self.schema)
    }

    fn content_schema(&self) -> &[ContentField] {
        &self.schema
    }

    fn preview(&self, ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError> {
        let height = ctx.reader().number("height", 60.0).max(0.0);
        let height = if ctx.is_mobile() { height * 0.5 } else { height };
        Ok(PreviewNode::Spacer {
            height: height.round() as u32,
        })
    }
}
