//! Button Block

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{Align, PreviewContext, PreviewNode};

pub struct ButtonBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl ButtonBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "button".into(),
                name: "Bouton".into(),
                category: BlockCategory::Content,
                description: "Bouton d'appel à l'action".into(),
                version: "1.0.0".into(),
                icon: "mouse-pointer".into(),
                keywords: vec!["cta".into(), "link".into(), "lien".into()],
            },
            schema: Self::build_schema(),
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("text", "Texte", FieldType::String, json!("Cliquez ici")),
            ContentField::new("link", "Lien", FieldType::Url, json!("#")),
            ContentField::new("style", "Style", FieldType::Enum, json!("solid"))
                .with_constraints(FieldConstraints::new().with_options(&["solid", "outline", "ghost"]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("size", "Taille", FieldType::Enum, json!("medium"))
                .with_constraints(FieldConstraints::new().with_options(&["small", "medium", "large"]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("alignment", "Alignement", FieldType::Enum, json!("center"))
                .with_constraints(FieldConstraints::new().with_options(&["left", "center", "right"]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("fullWidth", "Pleine largeur", FieldType::Boolean, json!(false)),
            ContentField::new("backgroundColor", "Couleur de fond", FieldType::Color, json!("#000000"))
                .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ContentField::new("textColor", "Couleur du texte", FieldType::Color, json!("#ffffff"))
                .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ContentField::new("borderRadius", "Arrondi", FieldType::Number, json!(8))
                .with_constraints(FieldConstraints::new().with_range(0.0, 50.0))
                .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_unit("px")),
            ContentField::new("openInNewTab", "Nouvel onglet", FieldType::Boolean, json!(false)),
        ]
    }
}

impl Default for ButtonBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for ButtonBlock {
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
        let style = c.str("style", "solid");
        // Ghost buttons never paint a background.
        let background_color = match style.as_str() {
            "solid" => c.opt_str("backgroundColor"),
            _ => None,
        };

        let button = PreviewNode::Button {
            label: c.opt_str("text").unwrap_or_else(|| "Cliquez ici".into()),
            href: c.opt_str("link").unwrap_or_else(|| "#".into()),
            size: c.str("size", "medium"),
            full_width: c.bool("fullWidth", false),
            background_color,
            text_color: c.opt_str("textColor"),
            style,
        };

        Ok(PreviewNode::Stack {
            align: Align::parse_or(&c.str("alignment", "center"), Align::Center),
            children: vec![button],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::preview;
    use crate::core::settings::Viewport;

    #[test]
    fn test_default_button() {
        let node = preview(&ButtonBlock::new(), json!({}), Viewport::Desktop);
        match node {
            PreviewNode::Stack { align, children } => {
                assert_eq!(align, Align::Center);
                assert!(matches!(
                    &children[0],
                    PreviewNode::Button { label, background_color: Some(bg), .. }
                        if label == "Cliquez ici" && bg == "#000000"
                ));
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_outline_has_no_background() {
        let node = preview(
            &ButtonBlock::new(),
            json!({ "style": "outline", "alignment": "right" }),
            Viewport::Desktop,
        );
        assert!(matches!(
            node,
            PreviewNode::Stack { align: Align::Right, ref children }
                if matches!(children[0], PreviewNode::Button { background_color: None, .. })
        ));
    }
}
