//! Hero Block
//!
//! Full-width banner with a title, a subtitle and one call-to-action button,
//! optionally over a background image with a dark overlay.
//!
//! Documents written by older editors use `ctaText`, `ctaLink` and `image`;
//! they are read as `buttonText`, `buttonLink` and `backgroundImage`.

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{Align, PreviewContext, PreviewNode, TextSize};
use crate::core::settings::Viewport;

const DEFAULT_TITLE: &str = "Titre principal";
const DEFAULT_SUBTITLE: &str = "Sous-titre accrocheur";
const DEFAULT_BUTTON: &str = "Découvrir";

// ---------------------------------------------------------------------------
// HeroBlock
// ---------------------------------------------------------------------------

pub struct HeroBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl HeroBlock {
    pub fn new() -> Self {
        Self {
            metadata: Self::build_metadata(),
            schema: Self::build_schema(),
        }
    }

    fn build_metadata() -> BlockTypeMetadata {
        BlockTypeMetadata {
            id: "hero".into(),
            name: "Hero".into(),
            category: BlockCategory::Layout,
            description: "Bannière principale avec titre et bouton".into(),
            version: "1.0.0".into(),
            icon: "layout".into(),
            keywords: vec!["banner".into(), "bannière".into(), "header".into()],
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("title", "Titre", FieldType::String, json!(DEFAULT_TITLE)),
            ContentField::new("subtitle", "Sous-titre", FieldType::String, json!(DEFAULT_SUBTITLE))
                .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
            ContentField::new("buttonText", "Texte du bouton", FieldType::String, json!(DEFAULT_BUTTON)),
            ContentField::new("buttonLink", "Lien du bouton", FieldType::Url, json!("/shop")),
            ContentField::new("backgroundImage", "Image de fond", FieldType::Image, json!(""))
                .with_ui_hint(FieldUiHint::new(WidgetType::ImagePicker)),
            ContentField::new("alignment", "Alignement", FieldType::Enum, json!("center"))
                .with_constraints(FieldConstraints::new().with_options(&["left", "center", "right"]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("overlay", "Assombrir l'image", FieldType::Boolean, json!(true))
                .with_ui_hint(FieldUiHint::new(WidgetType::Checkbox)),
            ContentField::new("overlayOpacity", "Opacité du voile", FieldType::Number, json!(50))
                .with_constraints(FieldConstraints::new().with_range(0.0, 100.0))
                .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(5.0).with_unit("%")),
        ]
    }
}

impl Default for HeroBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for HeroBlock {
    fn metadata(&self) -> &BlockTypeMetadata {
        &self.metadata
    }

    fn default_content(&self) -> Content {
        defaults_from_schema(&self.schema)
    }

    fn content_schema(&self) -> &[ContentField] {
        &self.schema
    }

    fn content_aliases(&self) -> &[(&'static str, &'static str)] {
        &[
            ("ctaText", "buttonText"),
            ("ctaLink", "buttonLink"),
            ("image", "backgroundImage"),
        ]
    }

    fn preview(&self, ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError> {
        let c = ctx.reader();

        let title = c.opt_str("title").unwrap_or_else(|| DEFAULT_TITLE.into());
        let subtitle = c.opt_str("subtitle").unwrap_or_else(|| DEFAULT_SUBTITLE.into());
        let button_text = c.opt_str("buttonText").unwrap_or_else(|| DEFAULT_BUTTON.into());
        let button_link = c.opt_str("buttonLink").unwrap_or_else(|| "#".into());
        let align = Align::parse_or(&c.str("alignment", "center"), Align::Center);
        let overlay = c
            .bool("overlay", true)
            .then(|| c.number("overlayOpacity", 50.0).clamp(0.0, 100.0) / 100.0);

        let size = match ctx.viewport {
            Viewport::Mobile => TextSize::Xl3,
            _ => TextSize::Xl4,
        };

        Ok(PreviewNode::Section {
            background_image: c.opt_str("backgroundImage"),
            background_color: None,
            overlay,
            min_height: Some(if ctx.is_mobile() { "70vh" } else { "400px" }.into()),
            align,
            children: vec![
                PreviewNode::Heading {
                    text: title,
                    level: 1,
                    size,
                },
                PreviewNode::Paragraph { text: subtitle, align },
                PreviewNode::Button {
                    label: button_text,
                    href: button_link,
                    style: "solid".into(),
                    size: "large".into(),
                    full_width: false,
                    background_color: None,
                    text_color: None,
                },
            ],
        })
    }
}
