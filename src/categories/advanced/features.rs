//! Features Block
//!
//! Icon + title + description grid, e.g. shipping, secure payment, support.

use serde_json::json;

use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{Align, PreviewContext, PreviewNode};

/// Icons offered by the editor; anything else renders as `check`
pub const ICONS: [&str; 12] = [
    "truck",
    "shield",
    "creditCard",
    "headphones",
    "gift",
    "clock",
    "star",
    "heart",
    "zap",
    "award",
    "check",
    "package",
];

pub struct FeaturesBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl FeaturesBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "features".into(),
                name: "Avantages".into(),
                category: BlockCategory::Advanced,
                description: "Grille d'avantages avec icônes".into(),
                version: "1.0.0".into(),
                icon: "sparkles".into(),
                keywords: vec!["features".into(), "benefits".into(), "icons".into()],
            },
            schema: Self::build_schema(),
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("title", "Titre", FieldType::String, json!("")),
            ContentField::new("subtitle", "Sous-titre", FieldType::String, json!("")),
            ContentField::new("items", "Avantages", FieldType::Array, json!([]))
                .with_description("Liste de { icon, title, description, link }")
                .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
            ContentField::new("columns", "Colonnes", FieldType::Enum, json!(3))
                .with_constraints(FieldConstraints::new().with_numeric_options(&[2, 3, 4]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("layout", "Style", FieldType::Enum, json!("cards"))
                .with_constraints(FieldConstraints::new().with_options(&["cards", "minimal", "centered"]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("iconColor", "Couleur des icônes", FieldType::Color, json!("#000000"))
                .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ContentField::new("iconSize", "Taille des icônes", FieldType::Enum, json!("medium"))
                .with_constraints(FieldConstraints::new().with_options(&["small", "medium", "large"]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
        ]
    }
}

impl Default for FeaturesBlock {
    fn default() -> Self {
        Self::new()
    }
}

pub fn icon_or_default(icon: &str) -> &'static str {
    ICONS.iter().copied().find(|known| *known == icon).unwrap_or("check")
}

impl BlockType for FeaturesBlock {
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
        if let Some(subtitle) = c.opt_str("subtitle") {
            children.push(PreviewNode::Paragraph {
                text: subtitle,
                align: Align::Center,
            });
        }

        let entries = c.objects("items");
        if entries.is_empty() {
            children.push(PreviewNode::placeholder("Ajoutez des fonctionnalités"));
            return Ok(PreviewNode::stack(children));
        }

        let highlighted = c.str("layout", "cards") == "cards";
        let items = entries
            .iter()
            .map(|entry| PreviewNode::Card {
                image: None,
                icon: Some(icon_or_default(&entry.str("icon", "check")).to_string()),
                title: entry.str("title", ""),
                subtitle: None,
                body: entry.opt_str("description"),
                rating: None,
                badge: None,
                bullets: Vec::new(),
                highlighted,
                action: entry.opt_str("link").map(|href| {
                    Box::new(PreviewNode::Button {
                        label: "En savoir plus".into(),
                        href,
                        style: "ghost".into(),
                        size: "small".into(),
                        full_width: false,
                        background_color: None,
                        text_color: None,
                    })
                }),
            })
            .collect();

        let columns = c.count("columns", 3, 1, 6);
        children.push(PreviewNode::Grid {
            columns: responsive_columns(ctx.viewport, columns, columns.min(2), 1),
            gap: 32,
            items,
        });
        Ok(PreviewNode::stack(children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::{find, preview};
    use crate::core::settings::Viewport;

    #[test]
    fn test_unknown_icon_falls_back_to_check() {
        assert_eq!(icon_or_default("truck"), "truck");
        assert_eq!(icon_or_default("rocket"), "check");
    }

    #[test]
    fn test_columns_by_viewport() {
        let raw = json!({
            "items": [{ "icon": "truck", "title": "Livraison offerte" }],
            "columns": 4
        });
        for (viewport, expected) in [(Viewport::Desktop, 4), (Viewport::Tablet, 2), (Viewport::Mobile, 1)] {
            let node = preview(&FeaturesBlock::new(), raw.clone(), viewport);
            let grid = find(&node, &|n| matches!(n, PreviewNode::Grid { .. })).unwrap();
            assert!(matches!(grid, PreviewNode::Grid { columns, .. } if *columns == expected));
        }
    }

    #[test]
    fn test_empty_items_placeholder() {
        let node = preview(&FeaturesBlock::new(), json!({ "title": "Pourquoi nous" }), Viewport::Desktop);
        assert_eq!(
            node.texts(),
            vec!["Pourquoi nous".to_string(), "Ajoutez des fonctionnalités".to_string()]
        );
    }
}
