//! Testimonials Block

use serde_json::{json, Value};

use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

fn default_items() -> Value {
    json!([
        { "name": "Client 1", "text": "Super produit !", "rating": 5 },
        { "name": "Client 2", "text": "Très satisfait de ma commande", "rating": 5 },
        { "name": "Client 3", "text": "Je recommande vivement", "rating": 4 }
    ])
}

pub struct TestimonialsBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl TestimonialsBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "testimonials".into(),
                name: "Témoignages".into(),
                category: BlockCategory::Engagement,
                description: "Avis clients avec note".into(),
                version: "1.0.0".into(),
                icon: "message-square".into(),
                keywords: vec!["reviews".into(), "avis".into(), "rating".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("Ce que disent nos clients")),
                ContentField::new("items", "Témoignages", FieldType::Array, default_items())
                    .with_description("Liste de { name, text, rating, role, image }")
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
                ContentField::new("layout", "Disposition", FieldType::Enum, json!("grid"))
                    .with_constraints(FieldConstraints::new().with_options(&["grid", "carousel", "stack"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ],
        }
    }
}

impl Default for TestimonialsBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for TestimonialsBlock {
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
        let cards: Vec<PreviewNode> = c
            .objects("items")
            .iter()
            .map(|item| PreviewNode::Card {
                image: item.opt_str("image"),
                icon: None,
                title: item.str("name", ""),
                subtitle: item.opt_str("role"),
                body: Some(item.str("text", "")),
                rating: Some(item.count("rating", 5, 0, 5) as u8),
                badge: None,
                bullets: Vec::new(),
                highlighted: false,
                action: None,
            })
            .collect();

        let list = match c.str("layout", "grid").as_str() {
            "stack" => PreviewNode::stack(cards),
            "carousel" => {
                let pages = cards.len();
                PreviewNode::Carousel {
                    per_view: 1,
                    current: 0,
                    pages,
                    show_arrows: false,
                    show_dots: false,
                    autoplay: false,
                    items: cards,
                }
            }
            _ => PreviewNode::Grid {
                columns: responsive_columns(ctx.viewport, 3, 2, 1),
                gap: 24,
                items: cards,
            },
        };

        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }
        children.push(list);
        Ok(PreviewNode::stack(children))
    }
}
