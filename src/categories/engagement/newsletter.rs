//! Newsletter Block
//!
//! Email sign-up band. Text is painted black on light backgrounds and white
//! on dark ones.

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{defaults_from_schema, ContentField, FieldType, FieldUiHint, WidgetType};
use crate::core::preview::{Align, FormField, PreviewContext, PreviewNode};

const DEFAULT_BACKGROUND: &str = "#000000";

pub struct NewsletterBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl NewsletterBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "newsletter".into(),
                name: "Newsletter".into(),
                category: BlockCategory::Engagement,
                description: "Inscription à la newsletter".into(),
                version: "1.0.0".into(),
                icon: "mail".into(),
                keywords: vec!["email".into(), "signup".into(), "inscription".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("Restez informé")),
                ContentField::new(
                    "description",
                    "Description",
                    FieldType::String,
                    json!("Inscrivez-vous à notre newsletter pour recevoir nos dernières actualités et offres exclusives."),
                )
                .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
                ContentField::new("buttonText", "Texte du bouton", FieldType::String, json!("S'inscrire")),
                ContentField::new("backgroundColor", "Couleur de fond", FieldType::Color, json!(DEFAULT_BACKGROUND))
                    .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ],
        }
    }
}

impl Default for NewsletterBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Perceived brightness of a `#rrggbb` color above the midpoint
///
/// Unparseable colors count as dark.
pub fn is_light_color(color: &str) -> bool {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() < 6 || !hex.is_ascii() {
        return false;
    }
    let channel = |range: std::ops::Range<usize>| hex.get(range).and_then(|h| u8::from_str_radix(h, 16).ok());
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => {
            let brightness = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000;
            brightness > 128
        }
        _ => false,
    }
}

impl BlockType for NewsletterBlock {
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
        let background = c.opt_str("backgroundColor").unwrap_or_else(|| DEFAULT_BACKGROUND.into());
        let light = is_light_color(&background);
        let button_label = c.opt_str("buttonText").unwrap_or_else(|| "S'inscrire".into());

        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }
        if let Some(description) = c.opt_str("description") {
            children.push(PreviewNode::Paragraph {
                text: description,
                align: Align::Center,
            });
        }
        children.push(PreviewNode::Form {
            fields: vec![FormField {
                name: "email".into(),
                label: "Votre email".into(),
                input: "email".into(),
                required: true,
                options: Vec::new(),
            }],
            submit_label: button_label.clone(),
            success_message: None,
        });
        children.push(PreviewNode::Button {
            label: button_label,
            href: "#".into(),
            style: "solid".into(),
            size: "medium".into(),
            full_width: ctx.is_mobile(),
            background_color: Some(if light { "#000000" } else { "#ffffff" }.into()),
            text_color: Some(if light { "#ffffff" } else { "#000000" }.into()),
        });

        Ok(PreviewNode::Section {
            background_image: None,
            background_color: Some(background),
            overlay: None,
            min_height: None,
            align: Align::Center,
            children: vec![PreviewNode::Stack {
                align: Align::Center,
                children,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::{find, preview};
    use crate::core::settings::Viewport;

    #[test]
    fn test_light_color_detection() {
        assert!(is_light_color("#ffffff"));
        assert!(is_light_color("fafafa"));
        assert!(!is_light_color("#000000"));
        assert!(!is_light_color("#1a1a"));
        assert!(!is_light_color("rebeccapurple"));
    }

    /// Multibyte input is treated as unparseable, not sliced
    #[test]
    fn test_non_ascii_color_is_dark() {
        assert!(!is_light_color("#aé345"));
        assert!(!is_light_color("#ffé"));
        assert!(!is_light_color("ééé"));

        let node = preview(&NewsletterBlock::new(), json!({ "backgroundColor": "#aé345" }), Viewport::Desktop);
        assert!(node.texts().contains(&"Restez informé".to_string()));
    }

    #[test]
    fn test_button_contrasts_with_background() {
        let node = preview(&NewsletterBlock::new(), json!({ "backgroundColor": "#ffffff" }), Viewport::Desktop);
        let button = find(&node, &|n| matches!(n, PreviewNode::Button { .. })).unwrap();
        assert!(matches!(
            button,
            PreviewNode::Button { background_color: Some(bg), text_color: Some(fg), .. }
                if bg == "#000000" && fg == "#ffffff"
        ));
    }

    #[test]
    fn test_defaults_on_dark_background() {
        let node = preview(&NewsletterBlock::new(), json!({}), Viewport::Mobile);
        assert!(matches!(node, PreviewNode::Section { background_color: Some(ref bg), .. } if bg == "#000000"));
        assert!(node.texts().contains(&"Restez informé".to_string()));
    }
}
