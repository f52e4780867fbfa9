//! Columns Block
//!
//! Container that lays its child blocks out in a grid. Children are regular
//! blocks stored in the block's `children`; empty column slots preview as
//! numbered placeholders. Collapses to a single column on mobile.

use serde_json::json;

use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

pub struct ColumnsBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl ColumnsBlock {
    pub fn new() -> Self {
        Self {
            metadata: Self::build_metadata(),
            schema: Self::build_schema(),
        }
    }

    fn build_metadata() -> BlockTypeMetadata {
        BlockTypeMetadata {
            id: "columns".into(),
            name: "Colonnes".into(),
            category: BlockCategory::Layout,
            description: "Disposition en plusieurs colonnes".into(),
            version: "1.0.0".into(),
            icon: "columns".into(),
            keywords: vec!["grid".into(), "grille".into()],
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("columns", "Nombre de colonnes", FieldType::Enum, json!(2))
                .with_constraints(FieldConstraints::new().with_numeric_options(&[2, 3, 4]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("gap", "Espacement", FieldType::Number, json!(24))
                .with_constraints(FieldConstraints::new().with_range(0.0, 96.0))
                .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(4.0).with_unit("px")),
        ]
    }
}

impl Default for ColumnsBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for ColumnsBlock {
    fn metadata(&self) -> &BlockTypeMetadata {
        &self.metadata
    }

    fn default_content(&self) -> Content {
        defaults_from_schema(&self.schema)
    }

    fn content_schema(&self) -> &[ContentField] {
        &self.schema
    }

    fn is_container(&self) -> bool {
        true
    }

    fn preview(&self, ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError> {
        let c = ctx.reader();
        let columns = c.count("columns", 2, 1, 6);
        let gap = c.count("gap", 24, 0, 200);

        let mut items: Vec<PreviewNode> = ctx
            .children
            .iter()
            .map(|child| PreviewNode::Nested {
                block: Box::new(child.clone()),
            })
            .collect();
        for slot in items.len()..columns as usize {
            items.push(PreviewNode::placeholder(format!("Colonne {}", slot + 1)));
        }

        Ok(PreviewNode::Grid {
            columns: responsive_columns(ctx.viewport, columns, columns, 1),
            gap,
            items,
        })
    }
}
