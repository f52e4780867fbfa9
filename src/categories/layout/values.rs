//! Values Block
//!
//! Three-up list of brand values on a colored band. An empty list previews the
//! default values.

use serde_json::{json, Value};

use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::{Content, ContentReader};
use crate::core::parameter::{defaults_from_schema, ContentField, FieldType, FieldUiHint, WidgetType};
use crate::core::preview::{Align, PreviewContext, PreviewNode};

fn default_values() -> Value {
    json!([
        { "title": "Éthique", "text": "Nous privilégions des matières biologiques et une production responsable." },
        { "title": "Qualité", "text": "Des cotons épais, des coutures renforcées et des finitions impeccables." },
        { "title": "Communauté", "text": "Faith Shop rassemble ceux qui croient en quelque chose de plus grand." }
    ])
}

pub struct ValuesBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl ValuesBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "values".into(),
                name: "Valeurs".into(),
                category: BlockCategory::Layout,
                description: "Les valeurs de la marque en trois colonnes".into(),
                version: "1.0.0".into(),
                icon: "heart".into(),
                keywords: vec!["about".into()],
            },
            schema: vec![
                ContentField::new("values", "Valeurs", FieldType::Array, default_values())
                    .with_description("Liste de { title, text }")
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
                ContentField::new("backgroundColor", "Couleur de fond", FieldType::Color, json!(""))
                    .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
                ContentField::new("textColor", "Couleur du texte", FieldType::Color, json!(""))
                    .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ],
        }
    }
}

impl Default for ValuesBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for ValuesBlock {
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

        let fallback = default_values();
        let fallback = fallback.as_array().map(Vec::as_slice).unwrap_or(&[]);
        let values: Vec<ContentReader<'_>> = if c.objects("values").is_empty() {
            fallback.iter().filter_map(|v| v.as_object().map(ContentReader::new)).collect()
        } else {
            c.objects("values")
        };

        let items = values
            .iter()
            .map(|value| PreviewNode::Card {
                image: None,
                icon: None,
                title: value.str("title", ""),
                subtitle: None,
                body: Some(value.str("text", "")),
                rating: None,
                badge: None,
                bullets: Vec::new(),
                highlighted: false,
                action: None,
            })
            .collect();

        Ok(PreviewNode::Section {
            background_image: None,
            background_color: c.opt_str("backgroundColor"),
            overlay: None,
            min_height: None,
            align: Align::Center,
            children: vec![PreviewNode::Grid {
                columns: responsive_columns(ctx.viewport, 3, 3, 1),
                gap: 48,
                items,
            }],
        })
    }
}
