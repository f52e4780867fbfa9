//! Accordion / Tabs Block
//!
//! The same `{ title, content }` items shown either as an accordion or as a
//! tab strip. `defaultOpen` selects the initially open item; an out-of-range
//! index opens nothing in accordion mode and falls back to the first tab.

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{AccordionItem, PreviewContext, PreviewNode};

pub struct AccordionTabsBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl AccordionTabsBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "accordion-tabs".into(),
                name: "Accordéon / Onglets".into(),
                category: BlockCategory::Advanced,
                description: "Contenu repliable ou en onglets".into(),
                version: "1.0.0".into(),
                icon: "panel-top".into(),
                keywords: vec!["accordion".into(), "tabs".into(), "onglets".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("")),
                ContentField::new("mode", "Mode", FieldType::Enum, json!("accordion"))
                    .with_constraints(FieldConstraints::new().with_options(&["accordion", "tabs"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("items", "Éléments", FieldType::Array, json!([]))
                    .with_description("Liste de { title, content }")
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
                ContentField::new("allowMultiple", "Plusieurs ouverts", FieldType::Boolean, json!(false)),
                ContentField::new("defaultOpen", "Ouvert par défaut", FieldType::Number, json!(0))
                    .with_constraints(FieldConstraints::new().with_min(0.0)),
            ],
        }
    }
}

impl Default for AccordionTabsBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for AccordionTabsBlock {
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
        let tabs = c.str("mode", "accordion") == "tabs";
        let entries = c.objects("items");

        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }

        if entries.is_empty() {
            let message = if tabs { "Ajoutez des onglets" } else { "Ajoutez des éléments" };
            children.push(PreviewNode::placeholder(message));
            return Ok(PreviewNode::stack(children));
        }

        let mut open = c.count("defaultOpen", 0, 0, u32::MAX) as usize;
        if tabs && open >= entries.len() {
            open = 0;
        }
        let items = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| AccordionItem {
                title: entry.str("title", ""),
                body: entry.str("content", ""),
                open: index == open,
            })
            .collect();

        children.push(PreviewNode::Accordion { tabs, items });
        Ok(PreviewNode::stack(children))
    }
}
