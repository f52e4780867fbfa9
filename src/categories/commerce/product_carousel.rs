//! Product Carousel Block
//!
//! Horizontally paged products. The number of products per page depends on
//! the viewport; the current page is preview state advanced by the session's
//! timers.

use serde_json::json;

use super::{product_card, selected_products, EMPTY_CATALOG};
use crate::categories::BlockCategory;
use crate::core::block::{Autoplay, BlockError, BlockType, BlockTypeMetadata};
use crate::core::catalog::{CatalogData, ProductSource};
use crate::core::content::{Content, ContentReader};
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};
use crate::core::settings::Viewport;

const MAX_PRODUCTS: usize = 10;
const AUTOPLAY_INTERVAL_MS: u64 = 5000;

pub struct ProductCarouselBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl ProductCarouselBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "product-carousel".into(),
                name: "Carrousel produits".into(),
                category: BlockCategory::Commerce,
                description: "Produits en défilement horizontal".into(),
                version: "1.0.0".into(),
                icon: "gallery-horizontal".into(),
                keywords: vec!["products".into(), "carousel".into(), "slider".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("À découvrir")),
                ContentField::new("source", "Source", FieldType::Enum, json!("featured"))
                    .with_constraints(FieldConstraints::new().with_options(&[
                        "manual",
                        "collection",
                        "featured",
                        "new",
                        "bestsellers",
                    ]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("productIds", "Produits", FieldType::Array, json!([]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::CatalogPicker)),
                ContentField::new("collectionId", "Collection", FieldType::String, json!(""))
                    .with_ui_hint(FieldUiHint::new(WidgetType::CatalogPicker)),
                ContentField::new("autoplay", "Défilement automatique", FieldType::Boolean, json!(true)),
                ContentField::new("showDots", "Points", FieldType::Boolean, json!(true)),
                ContentField::new("showArrows", "Flèches", FieldType::Boolean, json!(true)),
            ],
        }
    }
}

impl Default for ProductCarouselBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Products visible at once
pub fn items_per_view(viewport: Viewport) -> usize {
    match viewport {
        Viewport::Mobile => 2,
        Viewport::Tablet => 3,
        Viewport::Desktop => 4,
    }
}

fn page_count(products: usize, per_view: usize) -> usize {
    (products + per_view - 1) / per_view
}

impl BlockType for ProductCarouselBlock {
    fn metadata(&self) -> &BlockTypeMetadata {
        &self.metadata
    }

    fn default_content(&self) -> Content {
        defaults_from_schema(&self.schema)
    }

    fn content_schema(&self) -> &[ContentField] {
        &self.schema
    }

    /// Rotates pages at the desktop page size
    fn autoplay(&self, content: &Content, catalog: &CatalogData) -> Option<Autoplay> {
        let c = ContentReader::new(content);
        if !c.bool("autoplay", true) {
            return None;
        }
        let products = selected_products(c, catalog, ProductSource::Featured, MAX_PRODUCTS).len();
        let pages = page_count(products, items_per_view(Viewport::Desktop));
        (pages > 1).then_some(Autoplay {
            interval_ms: AUTOPLAY_INTERVAL_MS,
            slides: pages,
        })
    }

    fn preview(&self, ctx: &PreviewContext<'_>) -> Result<PreviewNode, BlockError> {
        let c = ctx.reader();
        let products = selected_products(c, ctx.catalog, ProductSource::Featured, MAX_PRODUCTS);
        if products.is_empty() {
            return Ok(PreviewNode::placeholder(EMPTY_CATALOG));
        }

        let per_view = items_per_view(ctx.viewport);
        let pages = page_count(products.len(), per_view);

        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }
        children.push(PreviewNode::Carousel {
            per_view: per_view as u32,
            current: ctx.state.slide(ctx.block_id) % pages,
            pages,
            show_arrows: c.bool("showArrows", true),
            show_dots: c.bool("showDots", true),
            autoplay: c.bool("autoplay", true),
            items: products.into_iter().map(|p| product_card(p, true, false)).collect(),
        });
        Ok(PreviewNode::stack(children))
    }
}
