//! Catalog-aware blocks
//!
//! These previews read products from the [`CatalogData`] handed to the
//! render pass. They never fetch anything themselves.

pub mod product_carousel;
pub mod product_grid;

pub use product_carousel::ProductCarouselBlock;
pub use product_grid::ProductGridBlock;

use crate::core::catalog::{CatalogData, Product, ProductSource};
use crate::core::content::ContentReader;
use crate::core::preview::PreviewNode;

pub(crate) const EMPTY_CATALOG: &str = "Aucun produit à afficher";

/// Products selected by the `source` / `productIds` fields of `content`
pub(crate) fn selected_products<'c>(
    content: ContentReader<'_>,
    catalog: &'c CatalogData,
    default_source: ProductSource,
    limit: usize,
) -> Vec<&'c Product> {
    let source = ProductSource::parse_or(&content.str("source", ""), default_source);
    let ids = content.strings("productIds");
    catalog.select_products(source, &ids, limit)
}

pub(crate) fn product_card(product: &Product, show_price: bool, show_add_to_cart: bool) -> PreviewNode {
    PreviewNode::Card {
        image: product.primary_image().map(str::to_string),
        icon: None,
        title: product.name.clone(),
        subtitle: show_price.then(|| product.display_price()),
        body: None,
        rating: None,
        badge: None,
        bullets: Vec::new(),
        highlighted: false,
        action: show_add_to_cart.then(|| {
            Box::new(PreviewNode::Button {
                label: "Ajouter au panier".into(),
                href: format!("/products/{}", product.slug),
                style: "solid".into(),
                size: "small".into(),
                full_width: true,
                background_color: None,
                text_color: None,
            })
        }),
    }
}
