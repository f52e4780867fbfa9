//! Counter Block
//!
//! Key figures ("10K clients", "99% satisfaits"). Large values are
//! abbreviated with `K` / `M`.

use serde_json::json;

use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

pub struct CounterBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl CounterBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "counter".into(),
                name: "Compteurs".into(),
                category: BlockCategory::Advanced,
                description: "Chiffres clés animés".into(),
                version: "1.0.0".into(),
                icon: "hash".into(),
                keywords: vec!["stats".into(), "numbers".into(), "chiffres".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("")),
                ContentField::new("items", "Compteurs", FieldType::Array, json!([]))
                    .with_description("Liste de { value, prefix, suffix, label }")
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
                ContentField::new("columns", "Colonnes", FieldType::Enum, json!(4))
                    .with_constraints(FieldConstraints::new().with_numeric_options(&[2, 3, 4]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("style", "Style", FieldType::Enum, json!("default"))
                    .with_constraints(FieldConstraints::new().with_options(&["default", "cards", "minimal"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("valueColor", "Couleur des chiffres", FieldType::Color, json!("#000000"))
                    .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
                ContentField::new("animated", "Animation", FieldType::Boolean, json!(true)),
            ],
        }
    }
}

impl Default for CounterBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Abbreviate a figure: `1500` → `1.5K`, `2000000` → `2.0M`
pub fn format_number(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl BlockType for CounterBlock {
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
        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }

        let entries = c.objects("items");
        if entries.is_empty() {
            children.push(PreviewNode::placeholder("Ajoutez des compteurs"));
            return Ok(PreviewNode::stack(children));
        }

        let items = entries
            .iter()
            .map(|entry| PreviewNode::Stat {
                value: format!(
                    "{}{}{}",
                    entry.str("prefix", ""),
                    format_number(entry.number("value", 0.0)),
                    entry.str("suffix", "")
                ),
                label: entry.str("label", ""),
            })
            .collect();

        let columns = c.count("columns", 4, 1, 6);
        children.push(PreviewNode::Grid {
            columns: responsive_columns(ctx.viewport, columns, columns.min(3), 2),
            gap: 32,
            items,
        });
        Ok(PreviewNode::stack(children))
    }
}
