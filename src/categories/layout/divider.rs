//! Divider Block
//!
//! Horizontal rule with configurable line style, color and thickness.

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

pub struct DividerBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl DividerBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "divider".into(),
                name: "Séparateur".into(),
                category: BlockCategory::Layout,
                description: "Ligne de séparation".into(),
                version: "1.0.0".into(),
                icon: "minus".into(),
                keywords: vec!["hr".into(), "line".into()],
            },
            schema: Self::build_schema(),
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("style", "Style", FieldType::Enum, json!("solid"))
                .with_constraints(FieldConstraints::new().with_options(&["solid", "dashed", "dotted"]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("color", "Couleur", FieldType::Color, json!("#e5e7eb"))
                .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ContentField::new("width", "Épaisseur", FieldType::Number, json!(1))
                .with_constraints(FieldConstraints::new().with_range(1.0, 10.0))
                .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(1.0).with_unit("px")),
        ]
    }
}

impl Default for DividerBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for DividerBlock {
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
        let c = ctx.reader();
        Ok(PreviewNode::Divider {
            style: c.str("style", "solid"),
            color: c.opt_str("color").unwrap_or_else(|| "#e5e7eb".into()),
            thickness: c.count("width", 1, 1, 10),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::preview;
    use crate::core::settings::Viewport;

    #[test]
    fn test_defaults() {
        let node = preview(&DividerBlock::new(), json!({}), Viewport::Desktop);
        assert_eq!(
            node,
            PreviewNode::Divider {
                style: "solid".into(),
                color: "#e5e7eb".into(),
                thickness: 1,
            }
        );
    }

    #[test]
    fn test_thickness_is_clamped() {
        let node = preview(&DividerBlock::new(), json!({ "width": 50, "style": "dashed" }), Viewport::Mobile);
        assert!(matches!(node, PreviewNode::Divider { thickness: 10, ref style, .. } if style == "dashed"));
    }
}
