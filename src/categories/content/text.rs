//! Text Block
//!
//! Rich text produced by the rich-text editor, stored as HTML in `content`.
//! Documents from the first editor stored plain `title` and `text` fields
//! instead; those are folded into an equivalent HTML fragment on read.

use serde_json::{json, Value};

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::{overlay, Content, ContentReader};
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{Align, PreviewContext, PreviewNode};

const DEFAULT_HTML: &str = "<p>Votre texte ici...</p>";

pub struct TextBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl TextBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "text".into(),
                name: "Texte".into(),
                category: BlockCategory::Content,
                description: "Paragraphe de texte enrichi".into(),
                version: "1.0.0".into(),
                icon: "type".into(),
                keywords: vec!["paragraph".into(), "paragraphe".into(), "rich text".into()],
            },
            schema: vec![
                ContentField::new("content", "Texte", FieldType::RichText, json!(DEFAULT_HTML))
                    .with_ui_hint(FieldUiHint::new(WidgetType::RichText)),
                ContentField::new("alignment", "Alignement", FieldType::Enum, json!("left"))
                    .with_constraints(FieldConstraints::new().with_options(&["left", "center", "right"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ],
        }
    }
}

impl Default for TextBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// HTML equivalent of the legacy `title` / `text` pair
fn legacy_html(raw: &Content) -> Option<String> {
    let r = ContentReader::new(raw);
    let title = r.opt_str("title");
    let text = r.opt_str("text");
    if title.is_none() && text.is_none() {
        return None;
    }

    let mut html = String::new();
    if let Some(title) = title {
        html.push_str(&format!("<h2 class=\"text-2xl font-bold mb-4\">{}</h2>", title));
    }
    if let Some(text) = text {
        html.push_str(&format!("<p>{}</p>", text));
    }
    Some(html)
}

impl BlockType for TextBlock {
    fn metadata(&self) -> &BlockTypeMetadata {
        &self.metadata
    }

    fn default_content(&self) -> Content {
        defaults_from_schema(&self.schema)
    }

    fn content_schema(&self) -> &[ContentField] {
        &self.schema
    }

    fn resolve_content(&self, raw: &Content) -> Content {
        let mut resolved = overlay(self.default_content(), raw, self.content_aliases());
        if !raw.contains_key("content") {
            if let Some(html) = legacy_html(raw) {
                resolved.insert("content".into(), Value::String(html));
            }
        }
        resolved
    }

    fn preview(&self, ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError> {
        let c = ctx.reader();
        let html = c.opt_str("content").unwrap_or_else(|| DEFAULT_HTML.into());
        Ok(PreviewNode::RichText {
            html,
            align: Align::parse_or(&c.str("alignment", "left"), Align::Left),
        })
    }
}
