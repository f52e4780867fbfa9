//! Map Block

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

const DEFAULT_ADDRESS: &str = "1 rue de la Paix, 75001 Paris";
const DEFAULT_LAT: f64 = 48.8566;
const DEFAULT_LNG: f64 = 2.3522;

pub struct MapBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl MapBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "map".into(),
                name: "Carte".into(),
                category: BlockCategory::Advanced,
                description: "Carte avec adresse".into(),
                version: "1.0.0".into(),
                icon: "map-pin".into(),
                keywords: vec!["carte".into(), "location".into(), "adresse".into()],
            },
            schema: vec![
                ContentField::new("title", "Titre", FieldType::String, json!("")),
                ContentField::new("address", "Adresse", FieldType::String, json!(DEFAULT_ADDRESS)),
                ContentField::new("latitude", "Latitude", FieldType::Number, json!(DEFAULT_LAT))
                    .with_constraints(FieldConstraints::new().with_range(-90.0, 90.0)),
                ContentField::new("longitude", "Longitude", FieldType::Number, json!(DEFAULT_LNG))
                    .with_constraints(FieldConstraints::new().with_range(-180.0, 180.0)),
                ContentField::new("zoom", "Zoom", FieldType::Number, json!(15))
                    .with_constraints(FieldConstraints::new().with_range(1.0, 20.0))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Slider)),
                ContentField::new("height", "Hauteur", FieldType::Number, json!(400))
                    .with_constraints(FieldConstraints::new().with_range(200.0, 800.0))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(50.0).with_unit("px")),
                ContentField::new("showMarker", "Afficher le marqueur", FieldType::Boolean, json!(true)),
                ContentField::new("mapStyle", "Style de carte", FieldType::Enum, json!("roadmap"))
                    .with_constraints(FieldConstraints::new().with_options(&["roadmap", "satellite", "terrain"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
            ],
        }
    }
}

impl Default for MapBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockType for MapBlock {
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
        let lat = c.number("latitude", DEFAULT_LAT).clamp(-90.0, 90.0);
        let lng = c.number("longitude", DEFAULT_LNG).clamp(-180.0, 180.0);
        let height = c.count("height", 400, 100, 2000);

        let map = PreviewNode::Map {
            address: c.opt_str("address").unwrap_or_else(|| DEFAULT_ADDRESS.into()),
            lat,
            lng,
            zoom: c.count("zoom", 15, 1, 20),
            // Mobile previews cap the map height.
            height: if ctx.is_mobile() { height.min(300) } else { height },
            marker: c.bool("showMarker", true),
            style: c.str("mapStyle", "roadmap"),
        };

        Ok(match c.opt_str("title") {
            Some(title) => PreviewNode::stack(vec![PreviewNode::section_title(title, ctx.viewport), map]),
            None => map,
        })
    }
}
