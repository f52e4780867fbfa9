//! Contact Form Block
//!
//! Fixed-vocabulary contact form: `fields` lists keys from a known set
//! (`name`, `email`, `phone`, `subject`, `message`, `order`). Unknown keys are
//! skipped. Registered under `contact-form`; documents from the first editor
//! use the `contact` key, which the registry aliases to this type.

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{defaults_from_schema, ContentField, FieldType, FieldUiHint, WidgetType};
use crate::core::preview::{Align, FormField, PreviewContext, PreviewNode};

pub struct ContactFormBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl ContactFormBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "contact-form".into(),
                name: "Formulaire de contact".into(),
                category: BlockCategory::Engagement,
                description: "Formulaire de contact prêt à l'emploi".into(),
                version: "1.0.0".into(),
                icon: "send".into(),
                keywords: vec!["contact".into(), "form".into(), "email".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("Contactez-nous")),
                ContentField::new("description", "Description", FieldType::String, json!(""))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
                ContentField::new("fields", "Champs", FieldType::Array, json!(["name", "email", "message"]))
                    .with_description("name, email, phone, subject, message, order")
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
                ContentField::new("submitText", "Texte du bouton", FieldType::String, json!("Envoyer")),
                ContentField::new("successMessage", "Message de confirmation", FieldType::String, json!("Message envoyé !")),
            ],
        }
    }
}

impl Default for ContactFormBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Label and input kind of a known contact field
pub fn field_config(key: &str) -> Option<(&'static str, &'static str)> {
    match key {
        "name" => Some(("Nom", "text")),
        "email" => Some(("Email", "email")),
        "phone" => Some(("Téléphone", "tel")),
        "subject" => Some(("Sujet", "text")),
        "message" => Some(("Message", "textarea")),
        "order" => Some(("N° de commande", "text")),
        _ => None,
    }
}

impl BlockType for ContactFormBlock {
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
        let fields = c
            .strings("fields")
            .into_iter()
            .filter_map(|key| {
                let (label, input) = field_config(&key)?;
                Some(FormField {
                    required: matches!(key.as_str(), "name" | "email" | "message"),
                    name: key,
                    label: label.into(),
                    input: input.into(),
                    options: Vec::new(),
                })
            })
            .collect();

        let mut children = vec![PreviewNode::section_title(
            c.opt_str("title").unwrap_or_else(|| "Contactez-nous".into()),
            ctx.viewport,
        )];
        if let Some(description) = c.opt_str("description") {
            children.push(PreviewNode::Paragraph {
                text: description,
                align: Align::Center,
            });
        }
        children.push(PreviewNode::Form {
            fields,
            submit_label: c.opt_str("submitText").unwrap_or_else(|| "Envoyer".into()),
            success_message: c.opt_str("successMessage"),
        });
        Ok(PreviewNode::stack(children))
    }
}
