//! Custom Form Block
//!
//! Author-defined form: each entry of `fields` is
//! `{ id, type, label, placeholder, required, options, width }`. Entries with
//! an unsupported `type` are shown as text inputs; entries that are not
//! objects are skipped.

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::{Content, ContentReader};
use crate::core::parameter::{defaults_from_schema, ContentField, FieldType, FieldUiHint, WidgetType};
use crate::core::preview::{Align, FormField, PreviewContext, PreviewNode};

const INPUT_TYPES: [&str; 10] = [
    "text", "email", "tel", "number", "textarea", "select", "checkbox", "radio", "date", "file",
];

pub struct CustomFormBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl CustomFormBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "custom-form".into(),
                name: "Formulaire personnalisé".into(),
                category: BlockCategory::Forms,
                description: "Formulaire aux champs configurables".into(),
                version: "1.0.0".into(),
                icon: "clipboard-list".into(),
                keywords: vec!["form".into(), "formulaire".into(), "survey".into()],
            },
            schema: Self::build_schema(),
        }
    }

    fn build_schema() -> Vec<ContentField> {
        vec![
            ContentField::new("title", "Titre", FieldType::String, json!("Formulaire")),
            ContentField::new("description", "Description", FieldType::String, json!(""))
                .with_ui_hint(FieldUiHint::new(WidgetType::Textarea)),
            ContentField::new("fields", "Champs", FieldType::Array, json!([]))
                .with_description("Liste de { id, type, label, placeholder, required, options, width }")
                .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
            ContentField::new("submitText", "Texte du bouton", FieldType::String, json!("Envoyer")),
            ContentField::new("successMessage", "Message de confirmation", FieldType::String, json!("Merci !")),
            ContentField::new("recipient", "Destinataire", FieldType::String, json!("")),
            ContentField::new("buttonColor", "Couleur du bouton", FieldType::Color, json!("#000000"))
                .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
            ContentField::new("buttonTextColor", "Couleur du texte du bouton", FieldType::Color, json!("#ffffff"))
                .with_ui_hint(FieldUiHint::new(WidgetType::ColorPicker)),
        ]
    }
}

impl Default for CustomFormBlock {
    fn default() -> Self {
        Self::new()
    }
}

fn form_field(index: usize, entry: ContentReader<'_>) -> FormField {
    let input = entry.str("type", "text");
    let input = if INPUT_TYPES.contains(&input.as_str()) {
        input
    } else {
        "text".to_string()
    };
    FormField {
        name: entry.opt_str("id").unwrap_or_else(|| format!("field-{}", index + 1)),
        label: entry.str("label", ""),
        input,
        required: entry.bool("required", false),
        options: entry.strings("options"),
    }
}

impl BlockType for CustomFormBlock {
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
        let fields: Vec<FormField> = c
            .objects("fields")
            .into_iter()
            .enumerate()
            .map(|(index, entry)| form_field(index, entry))
            .collect();

        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }
        if let Some(description) = c.opt_str("description") {
            children.push(PreviewNode::Paragraph {
                text: description,
                align: Align::Center,
            });
        }

        if fields.is_empty() {
            children.push(PreviewNode::placeholder("Ajoutez des champs au formulaire"));
            return Ok(PreviewNode::stack(children));
        }

        let submit = c.opt_str("submitText").unwrap_or_else(|| "Envoyer".into());
        children.push(PreviewNode::Form {
            fields,
            submit_label: submit.clone(),
            success_message: c.opt_str("successMessage"),
        });
        children.push(PreviewNode::Button {
            label: submit,
            href: "#".into(),
            style: "solid".into(),
            size: "medium".into(),
            full_width: true,
            background_color: c.opt_str("buttonColor"),
            text_color: c.opt_str("buttonTextColor"),
        });
        Ok(PreviewNode::stack(children))
    }
}
