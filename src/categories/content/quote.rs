//! Quote Block

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{defaults_from_schema, ContentField, FieldType, FieldUiHint, WidgetType};
use crate::core::preview::{Align, PreviewContext, PreviewNode};

const DEFAULT_TEXT: &str = "La mode passe, le style reste. La foi est éternelle.";
const DEFAULT_AUTHOR: &str = "— Le Fondateur";

pub struct QuoteBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl QuoteBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "quote".into(),
                name: "Citation".into(),
                category: BlockCategory::Content,
                description: "Citation mise en avant".into(),
                version: "1.0.0".into(),
                icon: "quote".into(),
                keywords: vec!["citation".into(), "blockquote".into()],
            },
            schema: vec![
                ContentField::new("text", "Citation", FieldType::String, json!(DEFAULT_TEXT))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
                ContentField::new("author", "Auteur", FieldType::String, json!(DEFAULT_AUTHOR)),
                ContentField::new("backgroundColor", "Couleur de fond", FieldType::Color, json!(""))
                    .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ],
        }
    }
}

impl Default for QuoteBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for QuoteBlock {
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
        Ok(PreviewNode::Section {
            background_image: None,
            background_color: c.opt_str("backgroundColor"),
            overlay: None,
            min_height: None,
            align: Align::Center,
            children: vec![PreviewNode::Quote {
                text: c.opt_str("text").unwrap_or_else(|| DEFAULT_TEXT.into()),
                author: c.str("author", ""),
            }],
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
        let node = preview(&QuoteBlock::new(), json!({}), Viewport::Desktop);
        assert_eq!(node.texts(), vec![DEFAULT_TEXT.to_string(), DEFAULT_AUTHOR.to_string()]);
    }

    #[test]
    fn test_empty_author_kept_empty() {
        let node = preview(
            &QuoteBlock::new(),
            json!({ "text": "Hello", "author": "", "backgroundColor": "#f5f5f5" }),
            Viewport::Mobile,
        );
        assert!(matches!(
            node,
            PreviewNode::Section { background_color: Some(ref bg), .. } if bg == "#f5f5f5"
        ));
        assert_eq!(node.texts(), vec!["Hello".to_string(), String::new()]);
    }
}
