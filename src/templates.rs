//! Starter documents for new pages
//!
//! Each instantiation mints fresh block ids, so two pages created from the
//! same template never share ids.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::content::content_from;
use crate::core::settings::RawPadding;
use crate::core::{Block, BlockId, Document, RawSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageTemplate {
    Blank,
    Landing,
    About,
    Contact,
    Faq,
}

impl PageTemplate {
    pub const ALL: [PageTemplate; 5] = [
        PageTemplate::Blank,
        PageTemplate::Landing,
        PageTemplate::About,
        PageTemplate::Contact,
        PageTemplate::Faq,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PageTemplate::Blank => "blank",
            PageTemplate::Landing => "landing",
            PageTemplate::About => "about",
            PageTemplate::Contact => "contact",
            PageTemplate::Faq => "faq",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageTemplate::Blank => "Page vierge",
            PageTemplate::Landing => "Page d'accueil",
            PageTemplate::About => "À propos",
            PageTemplate::Contact => "Contact",
            PageTemplate::Faq => "FAQ",
        }
    }

    /// Template for `key`; unknown keys give the blank page
    pub fn from_key(key: &str) -> PageTemplate {
        Self::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key.trim()))
            .unwrap_or(PageTemplate::Blank)
    }

    /// Fresh document built from this template
    pub fn instantiate(&self) -> Document {
        let blocks = match self {
            PageTemplate::Blank => Vec::new(),
            PageTemplate::Landing => landing(),
            PageTemplate::About => about(),
            PageTemplate::Contact => contact(),
            PageTemplate::Faq => faq(),
        };
        Document::new(blocks)
    }
}

fn block(block_type: &str, content: Value, settings: RawSettings) -> Block {
    Block::new(BlockId::new(), block_type, content_from(content), settings)
}

fn padding(top: u32, bottom: u32, left: u32, right: u32) -> RawSettings {
    RawSettings {
        padding: Some(RawPadding {
            top: Some(json!(top)),
            bottom: Some(json!(bottom)),
            left: Some(json!(left)),
            right: Some(json!(right)),
        }),
        ..RawSettings::default()
    }
}

fn landing() -> Vec<Block> {
    vec![
        block(
            "hero",
            json!({
                "title": "Bienvenue sur notre site",
                "subtitle": "Découvrez nos produits exceptionnels",
                "buttonText": "Découvrir",
                "buttonLink": "/shop",
                "alignment": "center",
                "overlay": true,
                "overlayOpacity": 50
            }),
            padding(0, 0, 0, 0),
        ),
        block(
            "product-grid",
            json!({
                "title": "Nos produits vedettes",
                "source": "featured",
                "columns": 4,
                "limit": 8,
                "showPrice": true,
                "showAddToCart": true
            }),
            padding(60, 60, 20, 20),
        ),
        block(
            "testimonials",
            json!({
                "title": "Ce que disent nos clients",
                "items": [
                    { "name": "Marie D.", "text": "Produits de qualité exceptionnelle !", "rating": 5 },
                    { "name": "Thomas L.", "text": "Livraison rapide et service client au top", "rating": 5 }
                ],
                "layout": "grid"
            }),
            RawSettings {
                background_color: Some("#f8f8f8".into()),
                ..padding(60, 60, 20, 20)
            },
        ),
        block(
            "newsletter",
            json!({
                "title": "Restez informé",
                "description": "Inscrivez-vous pour recevoir nos offres exclusives",
                "buttonText": "S'inscrire",
                "backgroundColor": "#000000"
            }),
            padding(0, 0, 0, 0),
        ),
    ]
}

fn about() -> Vec<Block> {
    vec![
        block(
            "hero",
            json!({
                "title": "Notre histoire",
                "subtitle": "Une passion pour la qualité depuis le début",
                "alignment": "center",
                "overlay": true,
                "overlayOpacity": 60
            }),
            padding(0, 0, 0, 0),
        ),
        block(
            "text",
            json!({
                "content": "<h2>Notre mission</h2><p>Nous croyons en...</p>",
                "alignment": "center"
            }),
            padding(60, 60, 40, 40),
        ),
    ]
}

fn contact() -> Vec<Block> {
    vec![
        block(
            "text",
            json!({
                "content": "<h1 style=\"text-align: center\">Contactez-nous</h1><p style=\"text-align: center\">Nous sommes là pour vous aider</p>",
                "alignment": "center"
            }),
            padding(60, 40, 20, 20),
        ),
        block(
            "contact-form",
            json!({
                "title": "",
                "fields": ["name", "email", "subject", "message"],
                "submitText": "Envoyer le message",
                "successMessage": "Message envoyé avec succès !"
            }),
            padding(0, 60, 20, 20),
        ),
    ]
}

fn faq() -> Vec<Block> {
    vec![
        block(
            "text",
            json!({
                "content": "<h1 style=\"text-align: center\">Questions fréquentes</h1>",
                "alignment": "center"
            }),
            padding(60, 20, 20, 20),
        ),
        block(
            "faq",
            json!({
                "title": "",
                "items": [
                    {
                        "question": "Comment puis-je suivre ma commande ?",
                        "answer": "Vous pouvez suivre votre commande depuis votre espace client."
                    },
                    {
                        "question": "Quels sont les délais de livraison ?",
                        "answer": "Les délais sont généralement de 2 à 5 jours ouvrés."
                    },
                    {
                        "question": "Comment effectuer un retour ?",
                        "answer": "Contactez-nous dans les 30 jours suivant la réception."
                    }
                ]
            }),
            padding(20, 60, 20, 20),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockTypeRegistry;
    use std::collections::HashSet;

    #[test]
    fn test_from_key() {
        assert_eq!(PageTemplate::from_key("landing"), PageTemplate::Landing);
        assert_eq!(PageTemplate::from_key("FAQ"), PageTemplate::Faq);
        assert_eq!(PageTemplate::from_key("nope"), PageTemplate::Blank);
        assert!(PageTemplate::Blank.instantiate().is_empty());
    }

    #[test]
    fn test_landing_layout() {
        let document = PageTemplate::Landing.instantiate();
        let types: Vec<&str> = document.blocks.iter().map(|b| b.block_type.as_str()).collect();
        assert_eq!(types, vec!["hero", "product-grid", "testimonials", "newsletter"]);

        let testimonials = document.blocks[2].resolved_settings();
        assert_eq!(testimonials.padding.top, 60.0);
        assert_eq!(testimonials.background_color.as_deref(), Some("#f8f8f8"));
    }

    #[test]
    fn test_fresh_ids_per_instantiation() {
        let a = PageTemplate::Faq.instantiate();
        let b = PageTemplate::Faq.instantiate();
        let ids: HashSet<&BlockId> = a.ids().into_iter().chain(b.ids()).collect();
        assert_eq!(ids.len(), a.len() + b.len());
    }

    #[test]
    fn test_every_template_uses_registered_types() {
        let registry = BlockTypeRegistry::with_builtin_types();
        for template in PageTemplate::ALL {
            for block in template.instantiate().blocks {
                assert!(registry.contains(&block.block_type), "{} in {}", block.block_type, template.key());
                let check = registry.get(&block.block_type).unwrap().validate_content(&block.content);
                assert!(!check.has_warnings(), "{}: {:?}", block.block_type, check.warnings);
            }
        }
    }
}
