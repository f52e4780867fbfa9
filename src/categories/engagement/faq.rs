//! FAQ Block
//!
//! Question/answer accordion. The first question starts open.

use serde_json::{json, Value};

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{defaults_from_schema, ContentField, FieldType, FieldUiHint, WidgetType};
use crate::core::preview::{AccordionItem, PreviewContext, PreviewNode};

fn default_items() -> Value {
    json!([
        {
            "question": "Comment puis-je suivre ma commande ?",
            "answer": "Vous pouvez suivre votre commande depuis votre espace client ou via le lien envoyé par email."
        },
        {
            "question": "Quels sont les délais de livraison ?",
            "answer": "Les délais de livraison sont généralement de 2 à 5 jours ouvrés pour la France métropolitaine."
        },
        {
            "question": "Comment effectuer un retour ?",
            "answer": "Vous disposez de 30 jours pour retourner un article. Contactez-nous pour obtenir une étiquette de retour."
        }
    ])
}

pub struct FaqBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl FaqBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "faq".into(),
                name: "FAQ".into(),
                category: BlockCategory::Engagement,
                description: "Questions fréquentes en accordéon".into(),
                version: "1.0.0".into(),
                icon: "help-circle".into(),
                keywords: vec!["questions".into(), "accordion".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("Questions fréquentes")),
                ContentField::new("items", "Questions", FieldType::Array, default_items())
                    .with_description("Liste de { question, answer }")
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
            ],
        }
    }
}

impl Default for FaqBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for FaqBlock {
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
        let items = c
            .objects("items")
            .iter()
            .enumerate()
            .map(|(index, item)| AccordionItem {
                title: item.str("question", ""),
                body: item.str("answer", ""),
                open: index == 0,
            })
            .collect();

        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }
        children.push(PreviewNode::Accordion { tabs: false, items });
        Ok(PreviewNode::stack(children))
    }
}
