//! Slider Block
//!
//! Full-width image slideshow. Each slide carries its own title, subtitle,
//! button and alignment. The current slide is ephemeral preview state; the
//! session's preview timers advance it every `autoplaySpeed` milliseconds.

use serde_json::{json, Value};

use crate::categories::BlockCategory;
use crate::core::block::{Autoplay, BlockError, BlockType, BlockTypeMetadata};
use crate::core::catalog::CatalogData;
use crate::core::content::{Content, ContentReader};
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{Align, PreviewContext, PreviewNode, TextSize};

const DEFAULT_SPEED_MS: u64 = 5000;

fn default_slides() -> Value {
    json!([{
        "image": "/hero-bg.png",
        "title": "Collection Hiver 2025",
        "subtitle": "Découvrez nos nouvelles pièces",
        "buttonText": "Découvrir",
        "buttonLink": "/shop",
        "alignment": "center"
    }])
}

pub struct SliderBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl SliderBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "slider".into(),
                name: "Slider".into(),
                category: BlockCategory::Layout,
                description: "Diaporama plein écran".into(),
                version: "1.0.0".into(),
                icon: "images".into(),
                keywords: vec!["carousel".into(), "slideshow".into(), "diaporama".into()],
            },
            schema: Self::build_schema(),
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("slides", "Diapositives", FieldType::Array, default_slides())
                .with_description("Liste de { image, title, subtitle, buttonText, buttonLink, alignment }")
                .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
            ContentField::new("autoplay", "Défilement automatique", FieldType::Boolean, json!(true))
                .with_ui_hint(FieldUiHint::new(WidgetType::Checkbox)),
            ContentField::new("autoplaySpeed", "Vitesse", FieldType::Number, json!(DEFAULT_SPEED_MS))
                .with_constraints(FieldConstraints::new().with_range(1000.0, 20000.0))
                .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(500.0).with_unit("ms")),
            ContentField::new("showArrows", "Flèches", FieldType::Boolean, json!(true)),
            ContentField::new("showDots", "Points", FieldType::Boolean, json!(true)),
            ContentField::new("height", "Hauteur", FieldType::String, json!("80vh")),
            ContentField::new("overlay", "Assombrir l'image", FieldType::Boolean, json!(true)),
            ContentField::new("overlayOpacity", "Opacité du voile", FieldType::Number, json!(40))
                .with_constraints(FieldConstraints::new().with_range(0.0, 100.0))
                .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(5.0).with_unit("%")),
        ]
    }
}

impl Default for SliderBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Slides to show: the stored list, or the default slide when it is empty
fn slides_of(content: &Content) -> Vec<Content> {
    let stored: Vec<Content> = ContentReader::new(content)
        .array("slides")
        .iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();
    if !stored.is_empty() {
        return stored;
    }
    match default_slides() {
        Value::Array(items) => items.into_iter().filter_map(|v| v.as_object().cloned()).collect(),
        _ => Vec::new(),
    }
}

fn speed_of(content: &Content) -> u64 {
    let speed = ContentReader::new(content).number("autoplaySpeed", DEFAULT_SPEED_MS as f64);
    if speed >= 1.0 {
        speed as u64
    } else {
        DEFAULT_SPEED_MS
    }
}

impl BlockType for SliderBlock {
    fn metadata(&self) -> &BlockTypeMetadata {
        &self.metadata
    }

    fn default_content(&self) -> Content {
        defaults_from_schema(&self.schema)
    }

    fn content_schema(&self) -> &[ContentField] {
        &self.schema
    }

    fn autoplay(&self, content: &Content, _catalog: &CatalogData) -> Option<Autoplay> {
        let slides = slides_of(content).len();
        if !ContentReader::new(content).bool("autoplay", true) || slides <= 1 {
            return None;
        }
        Some(Autoplay {
            interval_ms: speed_of(content),
            slides,
        })
    }

    fn preview(&self, ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError> {
        let c = ctx.reader();
        let slides = slides_of(ctx.content);
        let overlay = c
            .bool("overlay", true)
            .then(|| c.number("overlayOpacity", 40.0).clamp(0.0, 100.0) / 100.0);
        let height = c.opt_str("height").unwrap_or_else(|| "80vh".into());
        let heading_size = TextSize::Xl5.for_viewport(ctx.viewport);

        let items: Vec<PreviewNode> = slides
            .iter()
            .map(|slide| {
                let s = ContentReader::new(slide);
                let align = Align::parse_or(&s.str("alignment", "center"), Align::Center);
                let mut children = Vec::new();
                if let Some(title) = s.opt_str("title") {
                    children.push(PreviewNode::Heading {
                        text: title,
                        level: 2,
                        size: heading_size,
                    });
                }
                if let Some(subtitle) = s.opt_str("subtitle") {
                    children.push(PreviewNode::Paragraph { text: subtitle, align });
                }
                if let Some(label) = s.opt_str("buttonText") {
                    children.push(PreviewNode::Button {
                        label,
                        href: s.opt_str("buttonLink").unwrap_or_else(|| "#".into()),
                        style: "solid".into(),
                        size: if ctx.is_mobile() { "medium" } else { "large" }.into(),
                        full_width: false,
                        background_color: None,
                        text_color: None,
                    });
                }
                PreviewNode::Section {
                    background_image: s.opt_str("image"),
                    background_color: None,
                    overlay,
                    min_height: Some(height.clone()),
                    align,
                    children,
                }
            })
            .collect();

        let count = items.len();
        Ok(PreviewNode::Carousel {
            per_view: 1,
            current: if count == 0 { 0 } else { ctx.state.slide(ctx.block_id) % count },
            pages: count,
            show_arrows: c.bool("showArrows", true) && count > 1,
            show_dots: c.bool("showDots", true) && count > 1,
            autoplay: c.bool("autoplay", true),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::{preview, preview_with};
    use crate::core::content::content_from;
    use crate::core::preview::PreviewState;
    use crate::core::settings::Viewport;
    use crate::core::BlockId;

    fn two_slides() -> Value {
        json!({
            "slides": [
                { "image": "/a.jpg", "title": "A" },
                { "image": "/b.jpg", "title": "B" }
            ],
            "autoplaySpeed": 3000
        })
    }

    #[test]
    fn test_default_slide_when_empty() {
        let node = preview(&SliderBlock::new(), json!({ "slides": [] }), Viewport::Desktop);
        match node {
            PreviewNode::Carousel {
                pages, show_dots, items, ..
            } => {
                assert_eq!(pages, 1);
                assert!(!show_dots);
                assert!(items[0].texts().contains(&"Collection Hiver 2025".to_string()));
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_current_slide_comes_from_preview_state() {
        let mut state = PreviewState::new();
        state.set_slide(&BlockId::from("test-block"), 3);

        let node = preview_with(
            &SliderBlock::new(),
            two_slides(),
            Viewport::Desktop,
            &CatalogData::default(),
            &state,
            &[],
        );
        assert!(matches!(node, PreviewNode::Carousel { current: 1, pages: 2, .. }));
    }

    #[test]
    fn test_autoplay_parameters() {
        let slider = SliderBlock::new();
        let content = slider.resolve_content(&content_from(two_slides()));
        assert_eq!(
            slider.autoplay(&content, &CatalogData::default()),
            Some(Autoplay {
                interval_ms: 3000,
                slides: 2
            })
        );

        let single = slider.resolve_content(&Content::new());
        assert_eq!(slider.autoplay(&single, &CatalogData::default()), None);

        let mut off = content.clone();
        off.insert("autoplay".into(), json!(false));
        assert_eq!(slider.autoplay(&off, &CatalogData::default()), None);
    }
}
