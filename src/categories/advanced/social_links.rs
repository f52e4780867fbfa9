//! Social Links Block

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{Align, LinkItem, PreviewContext, PreviewNode};

pub struct SocialLinksBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl SocialLinksBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "social-links".into(),
                name: "Réseaux sociaux".into(),
                category: BlockCategory::Advanced,
                description: "Liens vers les réseaux sociaux".into(),
                version: "1.0.0".into(),
                icon: "share-2".into(),
                keywords: vec!["social".into(), "instagram".into(), "facebook".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("")),
                ContentField::new("links", "Liens", FieldType::Array, json!([]))
                    .with_description("Liste de { platform, url }")
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
                ContentField::new("style", "Style", FieldType::Enum, json!("icons"))
                    .with_constraints(FieldConstraints::new().with_options(&["icons", "buttons", "pills"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("size", "Taille", FieldType::Enum, json!("medium"))
                    .with_constraints(FieldConstraints::new().with_options(&["small", "medium", "large"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("alignment", "Alignement", FieldType::Enum, json!("center"))
                    .with_constraints(FieldConstraints::new().with_options(&["left", "center", "right"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("color", "Couleurs", FieldType::Enum, json!("brand"))
                    .with_constraints(FieldConstraints::new().with_options(&["brand", "dark", "light", "custom"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("customColor", "Couleur personnalisée", FieldType::Color, json!("#000000"))
                    .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ],
        }
    }
}

impl Default for SocialLinksBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Official brand color of a platform
pub fn brand_color(platform: &str) -> Option<&'static str> {
    let color = match platform.to_ascii_lowercase().as_str() {
        "facebook" => "#1877F2",
        "instagram" => "#E4405F",
        "twitter" => "#1DA1F2",
        "x" => "#000000",
        "linkedin" => "#0A66C2",
        "youtube" => "#FF0000",
        "tiktok" => "#000000",
        "pinterest" => "#BD081C",
        "whatsapp" => "#25D366",
        "telegram" => "#0088CC",
        "snapchat" => "#FFFC00",
        "discord" => "#5865F2",
        _ => return None,
    };
    Some(color)
}

/// Color a link is painted with under the block's color scheme
pub fn link_color(scheme: &str, platform: &str, custom: &str) -> String {
    match scheme {
        "dark" => "#000000".into(),
        "light" => "#ffffff".into(),
        "custom" => custom.into(),
        _ => brand_color(platform).unwrap_or("#000000").into(),
    }
}

impl BlockType for SocialLinksBlock {
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

        let scheme = c.str("color", "brand");
        let custom = c.str("customColor", "#000000");
        let items: Vec<LinkItem> = c
            .objects("links")
            .iter()
            .filter_map(|link| {
                let platform = link.opt_str("platform")?;
                Some(LinkItem {
                    color: link_color(&scheme, &platform, &custom),
                    url: link.str("url", "#"),
                    platform,
                })
            })
            .collect();

        if items.is_empty() {
            children.push(PreviewNode::placeholder("Ajoutez des réseaux sociaux"));
        } else {
            children.push(PreviewNode::Links {
                style: c.str("style", "icons"),
                size: c.str("size", "medium"),
                align: Align::parse_or(&c.str("alignment", "center"), Align::Center),
                items,
            });
        }
        Ok(PreviewNode::stack(children))
    }
}
