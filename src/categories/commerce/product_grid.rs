//! Product Grid Block
//!
//! Grid of catalog products. A manual source with ids shows exactly those
//! products in catalog order; every other source previews the catalog head.

use serde_json::json;

use super::{product_card, selected_products, EMPTY_CATALOG};
use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::catalog::ProductSource;
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

pub struct ProductGridBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl ProductGridBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "product-grid".into(),
                name: "Grille produits".into(),
                category: BlockCategory::Commerce,
                description: "Grille de produits du catalogue".into(),
                version: "1.0.0".into(),
                icon: "shopping-bag".into(),
                keywords: vec!["products".into(), "shop".into(), "boutique".into()],
            },
            schema: Self::build_schema(),
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("title", "Titre", FieldType::String, json!("Nos produits")),
            ContentField::new("source", "Source", FieldType::Enum, json!("manual"))
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
            ContentField::new("columns", "Colonnes", FieldType::Enum, json!(4))
                .with_constraints(FieldConstraints::new().with_numeric_options(&[2, 3, 4, 5]))
                .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ContentField::new("limit", "Nombre maximum", FieldType::Number, json!(8))
                .with_constraints(FieldConstraints::new().with_range(1.0, 48.0))
                .with_ui_hint(FieldUiHint::new(WidgetType::Slider)),
            ContentField::new("showPrice", "Afficher le prix", FieldType::Boolean, json!(true)),
            ContentField::new("showAddToCart", "Bouton panier", FieldType::Boolean, json!(true)),
        ]
    }
}

impl Default for ProductGridBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for ProductGridBlock {
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
        let limit = c.count("limit", 8, 1, 48) as usize;
        let products = selected_products(c, ctx.catalog, ProductSource::Manual, limit);
        if products.is_empty() {
            return Ok(PreviewNode::placeholder(EMPTY_CATALOG));
        }

        let show_price = c.bool("showPrice", true);
        let show_add_to_cart = c.bool("showAddToCart", true);
        let columns = c.count("columns", 4, 1, 6);

        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }
        children.push(PreviewNode::Grid {
            columns: responsive_columns(ctx.viewport, columns, 3, 2),
            gap: 24,
            items: products
                .into_iter()
                .map(|p| product_card(p, show_price, show_add_to_cart))
                .collect(),
        });
        Ok(PreviewNode::stack(children))
    }
}
