//! Gallery Block

use serde_json::{json, Value};

use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::{Content, ContentReader};
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

pub struct GalleryBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl GalleryBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "gallery".into(),
                name: "Galerie".into(),
                category: BlockCategory::Content,
                description: "Grille d'images".into(),
                version: "1.0.0".into(),
                icon: "grid".into(),
                keywords: vec!["images".into(), "photos".into(), "lightbox".into()],
            },
            schema: vec![
                ContentField::new("images", "Images", FieldType::Array, json!([]))
                    .with_description("Liste de { src, alt } ou d'URL")
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
                ContentField::new("columns", "Colonnes", FieldType::Enum, json!(3))
                    .with_constraints(FieldConstraints::new().with_numeric_options(&[2, 3, 4]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("gap", "Espacement", FieldType::Number, json!(16))
                    .with_constraints(FieldConstraints::new().with_range(0.0, 64.0))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_unit("px")),
                ContentField::new("lightbox", "Agrandir au clic", FieldType::Boolean, json!(true)),
            ],
        }
    }
}

impl Default for GalleryBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for GalleryBlock {
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

        // Entries are either plain URLs or { src, alt } objects.
        let items: Vec<PreviewNode> = c
            .array("images")
            .iter()
            .filter_map(|entry| {
                let (src, alt) = match entry {
                    Value::String(src) => (src.clone(), String::new()),
                    Value::Object(map) => {
                        let r = ContentReader::new(map);
                        (r.opt_str("src")?, r.str("alt", ""))
                    }
                    _ => return None,
                };
                (!src.trim().is_empty()).then(|| PreviewNode::Image {
                    src,
                    alt,
                    caption: None,
                    link: None,
                    width: "full".into(),
                })
            })
            .collect();

        if items.is_empty() {
            return Ok(PreviewNode::placeholder("Ajoutez des images à la galerie"));
        }

        let columns = c.count("columns", 3, 1, 6);
        Ok(PreviewNode::Grid {
            columns: responsive_columns(ctx.viewport, columns, columns, columns.min(2)),
            gap: c.count("gap", 16, 0, 64),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::preview;
    use crate::core::settings::Viewport;

    #[test]
    fn test_empty_gallery_is_placeholder() {
        assert!(preview(&GalleryBlock::new(), json!({}), Viewport::Desktop).is_placeholder());
    }

    #[test]
    fn test_mixed_entries_and_mobile_columns() {
        let raw = json!({
            "images": ["/a.jpg", { "src": "/b.jpg", "alt": "B" }, { "alt": "no src" }, 7],
            "columns": 4
        });
        match preview(&GalleryBlock::new(), raw.clone(), Viewport::Desktop) {
            PreviewNode::Grid { columns, items, .. } => {
                assert_eq!(columns, 4);
                assert_eq!(items.len(), 2);
            }
            other => panic!("unexpected node {:?}", other),
        }
        assert!(matches!(
            preview(&GalleryBlock::new(), raw, Viewport::Mobile),
            PreviewNode::Grid { columns: 2, .. }
        ));
    }
}
