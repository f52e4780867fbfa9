//! Image Block

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

const WIDTHS: [&str; 4] = ["full", "large", "medium", "small"];

pub struct ImageBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl ImageBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "image".into(),
                name: "Image".into(),
                category: BlockCategory::Content,
                description: "Image avec légende optionnelle".into(),
                version: "1.0.0".into(),
                icon: "image".into(),
                keywords: vec!["photo".into(), "picture".into()],
            },
            schema: vec![
                ContentField::new("src", "Image", FieldType::Image, json!(""))
                    .with_ui_hint(FieldUiHint::new(WidgetType::ImagePicker)),
                ContentField::new("alt", "Texte alternatif", FieldType::String, json!("")),
                ContentField::new("caption", "Légende", FieldType::String, json!("")),
                ContentField::new("width", "Largeur", FieldType::Enum, json!("full"))
                    .with_constraints(FieldConstraints::new().with_options(&WIDTHS))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("link", "Lien", FieldType::Url, json!("")),
            ],
        }
    }
}

impl Default for ImageBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for ImageBlock {
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
        let src = match c.opt_str("src") {
            Some(src) => src,
            None => return Ok(PreviewNode::placeholder("Aucune image sélectionnée")),
        };

        let width = c.str("width", "full");
        // Narrow viewports always use the full width.
        let width = if ctx.is_mobile() || !WIDTHS.contains(&width.as_str()) {
            "full".to_string()
        } else {
            width
        };

        Ok(PreviewNode::Image {
            src,
            alt: c.str("alt", ""),
            caption: c.opt_str("caption"),
            link: c.opt_str("link"),
            width,
        })
    }
}
