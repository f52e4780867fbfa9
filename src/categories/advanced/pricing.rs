//! Pricing Block
//!
//! Side-by-side plans with price, feature list and call to action. A
//! highlighted plan is emphasized and may carry a badge.

use serde_json::json;

use crate::categories::{responsive_columns, BlockCategory};
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::{Content, ContentReader};
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{Align, PreviewContext, PreviewNode};

pub struct PricingBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl PricingBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "pricing".into(),
                name: "Tarifs".into(),
                category: BlockCategory::Advanced,
                description: "Grille tarifaire".into(),
                version: "1.0.0".into(),
                icon: "tag".into(),
                keywords: vec!["prices".into(), "plans".into(), "prix".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("")),
                ContentField::new("subtitle", "Sous-titre", FieldType::String, json!("")),
                ContentField::new("plans", "Offres", FieldType::Array, json!([]))
                    .with_description(
                        "Liste de { name, description, price, currency, period, features, buttonText, buttonLink, highlighted, badge }",
                    )
                    .with_ui_hint(FieldUiHint::new(WidgetType::ListEditor)),
                ContentField::new("columns", "Colonnes", FieldType::Enum, json!(3))
                    .with_constraints(FieldConstraints::new().with_numeric_options(&[2, 3, 4]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("style", "Style", FieldType::Enum, json!("cards"))
                    .with_constraints(FieldConstraints::new().with_options(&["cards", "minimal", "bordered"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ],
        }
    }
}

impl Default for PricingBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Price line of a plan, e.g. `29 €/mois`
fn price_line(plan: &ContentReader<'_>) -> String {
    let mut line = format!("{} {}", plan.str("price", "0"), plan.str("currency", "€"));
    if let Some(period) = plan.opt_str("period") {
        line.push('/');
        line.push_str(period.trim_start_matches('/'));
    }
    line
}

impl BlockType for PricingBlock {
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
        let mut children = Vec::new();
        if let Some(title) = c.opt_str("title") {
            children.push(PreviewNode::section_title(title, ctx.viewport));
        }
        if let Some(subtitle) = c.opt_str("subtitle") {
            children.push(PreviewNode::Paragraph {
                text: subtitle,
                align: Align::Center,
            });
        }

        let plans = c.objects("plans");
        if plans.is_empty() {
            children.push(PreviewNode::placeholder("Ajoutez des offres"));
            return Ok(PreviewNode::stack(children));
        }

        let items = plans
            .iter()
            .map(|plan| {
                let highlighted = plan.bool("highlighted", false);
                PreviewNode::Card {
                    image: None,
                    icon: None,
                    title: plan.str("name", ""),
                    subtitle: Some(price_line(plan)),
                    body: plan.opt_str("description"),
                    rating: None,
                    badge: if highlighted { plan.opt_str("badge") } else { None },
                    bullets: plan.strings("features"),
                    highlighted,
                    action: Some(Box::new(PreviewNode::Button {
                        label: plan.opt_str("buttonText").unwrap_or_else(|| "Choisir".into()),
                        href: plan.opt_str("buttonLink").unwrap_or_else(|| "#".into()),
                        style: if highlighted { "solid" } else { "outline" }.into(),
                        size: "medium".into(),
                        full_width: true,
                        background_color: None,
                        text_color: None,
                    })),
                }
            })
            .collect();

        let columns = c.count("columns", 3, 1, 6);
        children.push(PreviewNode::Grid {
            columns: responsive_columns(ctx.viewport, columns, columns.min(2), 1),
            gap: 24,
            items,
        });
        Ok(PreviewNode::stack(children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::test_support::{find, preview};
    use crate::core::settings::Viewport;

    fn plans() -> serde_json::Value {
        json!({
            "plans": [
                { "name": "Essentiel", "price": 9, "period": "mois", "features": ["1 boutique"] },
                { "name": "Pro", "price": "29", "period": "/mois", "highlighted": true, "badge": "Populaire" }
            ]
        })
    }

    #[test]
    fn test_plan_cards() {
        let node = preview(&PricingBlock::new(), plans(), Viewport::Desktop);
        let texts = node.texts();
        assert!(texts.contains(&"9 €/mois".to_string()));
        assert!(texts.contains(&"29 €/mois".to_string()));
        assert!(texts.contains(&"1 boutique".to_string()));
        assert!(texts.contains(&"Choisir".to_string()));

        let highlighted = find(&node, &|n| matches!(n, PreviewNode::Card { highlighted: true, .. })).unwrap();
        assert!(matches!(highlighted, PreviewNode::Card { badge: Some(b), .. } if b == "Populaire"));
    }

    #[test]
    fn test_tablet_columns_capped() {
        let node = preview(&PricingBlock::new(), plans(), Viewport::Tablet);
        let grid = find(&node, &|n| matches!(n, PreviewNode::Grid { .. })).unwrap();
        assert!(matches!(grid, PreviewNode::Grid { columns: 2, .. }));
    }

    #[test]
    fn test_empty_plans_placeholder() {
        let node = preview(&PricingBlock::new(), json!({}), Viewport::Desktop);
        assert_eq!(node.texts(), vec!["Ajoutez des offres".to_string()]);
    }
}
