//! Manifesto Block
//!
//! Brand statement: a two-part title, two paragraphs and the brand name next to
//! an optional image. `layout: "right"` puts the image first on wide viewports.

use serde_json::json;

use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{Align, PreviewContext, PreviewNode, TextSize};
use crate::core::settings::Viewport;

const DEFAULT_TITLE: &str = "Plus qu'une marque, un mouvement.";
const DEFAULT_TEXT1: &str =
    "Faith Shop est né d'une conviction simple : la mode peut être un vecteur de valeurs.";
const DEFAULT_TEXT2: &str = "Chaque vêtement est conçu comme une toile vierge sur laquelle s'expriment la foi, l'espoir et l'amour.";
const DEFAULT_BRAND: &str = "Faith-Shop";

pub struct ManifestoBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl ManifestoBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "manifesto".into(),
                name: "Manifeste".into(),
                category: BlockCategory::Layout,
                description: "Présentation de la marque avec image".into(),
                version: "1.0.0".into(),
                icon: "book-open".into(),
                keywords: vec!["about".into(), "brand".into(), "marque".into()],
            },
            schema: Self::build_schema(),
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("title", "Titre", FieldType::String, json!(DEFAULT_TITLE))
                .with_ui_hint(FieldUiHint::new(WidgetType::Input).with_help_text(
                    "Une virgule coupe le titre en deux lignes",
                )),
            ContentField::new("text1", "Premier paragraphe", FieldType::String, json!(DEFAULT_TEXT1))
                .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
            ContentField::new("text2", "Second paragraphe", FieldType::String, json!(DEFAULT_TEXT2))
                .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
            ContentField::new("brandName", "Nom de la marque", FieldType::String, json!(DEFAULT_BRAND)),
            ContentField::new("imageUrl", "Image", FieldType::Image, json!(""))
                .with_ui_hint(FieldUiHint::new(WidgetType::ImagePicker)),
            ContentField::new("layout", "Position de l'image", FieldType::Enum, json!("left"))
                .with_constraints(FieldConstraints::new().with_options(&["left", "right"]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
        ]
    }
}

impl Default for ManifestoBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a title at its first comma, keeping the comma on the first line
fn title_lines(title: &str) -> Vec<String> {
    match title.split_once(',') {
        Some((first, rest)) => vec![format!("{},", first.trim()), rest.trim().to_string()],
        None => vec![title.trim().to_string()],
    }
}

impl BlockType for ManifestoBlock {
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
        let title = c.opt_str("title").unwrap_or_else(|| DEFAULT_TITLE.into());
        let size = match ctx.viewport {
            Viewport::Mobile => TextSize::Xl3,
            _ => TextSize::Xl4,
        };

        let mut text: Vec<PreviewNode> = title_lines(&title)
            .into_iter()
            .map(|line| PreviewNode::Heading {
                text: line,
                level: 2,
                size,
            })
            .collect();
        text.push(PreviewNode::Paragraph {
            text: c.opt_str("text1").unwrap_or_else(|| DEFAULT_TEXT1.into()),
            align: Align::Left,
        });
        text.push(PreviewNode::Paragraph {
            text: c.opt_str("text2").unwrap_or_else(|| DEFAULT_TEXT2.into()),
            align: Align::Left,
        });
        text.push(PreviewNode::Paragraph {
            text: c.opt_str("brandName").unwrap_or_else(|| DEFAULT_BRAND.into()),
            align: Align::Left,
        });

        let image = match c.opt_str("imageUrl") {
            Some(src) => PreviewNode::Image {
                src,
                alt: "Manifeste".into(),
                caption: None,
                link: None,
                width: "full".into(),
            },
            None => PreviewNode::placeholder("Aucune image"),
        };

        let text = PreviewNode::stack(text);
        let image_first = c.str("layout", "left") == "right" && !ctx.is_mobile();
        let items = if image_first { vec![image, text] } else { vec![text, image] };

        Ok(PreviewNode::Grid {
            columns: responsive_columns(ctx.viewport, 2, 2, 1),
            gap: 64,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::preview;

    #[test]
    fn test_title_split() {
        assert_eq!(
            title_lines("Plus qu'une marque, un mouvement."),
            vec!["Plus qu'une marque,".to_string(), "un mouvement.".to_string()]
        );
        assert_eq!(title_lines("Sans virgule"), vec!["Sans virgule".to_string()]);
    }

    #[test]
    fn test_right_layout_puts_image_first_except_on_mobile() {
        let block = ManifestoBlock::new();
        let raw = json!({ "layout": "right", "imageUrl": "/m.jpg" });

        match preview(&block, raw.clone(), Viewport::Desktop) {
            PreviewNode::Grid { items, columns, .. } => {
                assert_eq!(columns, 2);
                assert!(matches!(items[0], PreviewNode::Image { .. }));
            }
            other => panic!("unexpected node {:?}", other),
        }

        match preview(&block, raw, Viewport::Mobile) {
            PreviewNode::Grid { items, columns, .. } => {
                assert_eq!(columns, 1);
                assert!(matches!(items[0], PreviewNode::Stack { .. }));
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_defaults_render_brand() {
        let node = preview(&ManifestoBlock::new(), json!({}), Viewport::Tablet);
        assert!(node.texts().contains(&"Faith-Shop".to_string()));
        assert!(node.texts().contains(&"Aucune image".to_string()));
    }
}
