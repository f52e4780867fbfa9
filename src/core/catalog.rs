//! Read-only catalog lookup tables
//!
//! Products and collections are supplied by the host application. The engine
//! only reads them to fill catalog-aware previews.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Price as shown in previews, e.g. `12.50 €`
    pub fn display_price(&self) -> String {
        format!("{:.2} €", self.price)
    }
}

/// How a catalog block picks its products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSource {
    Manual,
    Collection,
    Featured,
    New,
    Bestsellers,
}

impl ProductSource {
    pub fn parse_or(value: &str, default: ProductSource) -> ProductSource {
        match value {
            "manual" => ProductSource::Manual,
            "collection" => ProductSource::Collection,
            "featured" => ProductSource::Featured,
            "new" => ProductSource::New,
            "bestsellers" => ProductSource::Bestsellers,
            _ => default,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl CatalogData {
    pub fn new(collections: Vec<Collection>, products: Vec<Product>) -> Self {
        Self { collections, products }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Products a catalog block would show
    ///
    /// A manual source with ids keeps the catalog's order and drops unknown
    /// ids. Every other source previews the catalog head.
    pub fn select_products(&self, source: ProductSource, ids: &[String], limit: usize) -> Vec<&Product> {
        let candidates: Vec<&Product> = match source {
            ProductSource::Manual if !ids.is_empty() => {
                self.products.iter().filter(|p| ids.contains(&p.id)).collect()
            }
            _ => self.products.iter().collect(),
        };
        candidates.into_iter().take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {}", id),
            slug: id.into(),
            price,
            images: vec![],
        }
    }

    #[test]
    fn test_manual_selection_keeps_catalog_order() {
        let catalog = CatalogData::new(vec![], vec![product("a", 1.0), product("b", 2.0), product("c", 3.0)]);
        let ids = vec!["c".to_string(), "a".to_string(), "zzz".to_string()];

        let picked: Vec<&str> = catalog
            .select_products(ProductSource::Manual, &ids, 10)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(picked, vec!["a", "c"]);
    }

    #[test]
    fn test_other_sources_take_head() {
        let catalog = CatalogData::new(vec![], (0..12).map(|i| product(&i.to_string(), 1.0)).collect());
        assert_eq!(catalog.select_products(ProductSource::Featured, &[], 8).len(), 8);
        assert_eq!(catalog.select_products(ProductSource::Manual, &[], 4).len(), 4);
    }

    #[test]
    fn test_display_price() {
        assert_eq!(product("a", 12.5).display_price(), "12.50 €");
    }
}
