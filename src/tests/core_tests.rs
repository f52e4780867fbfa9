//! Contract tests for the core data model
//!
//! These tests pin down the behaviors every editing feature relies on: how a
//! partial settings envelope resolves, how settings patches merge, how the
//! document store treats stale ids, and how persisted JSON survives a
//! load/save cycle.

#[cfg(test)]
mod core_tests {
    use serde_json::json;

    use crate::core::content::content_from;
    use crate::core::settings::{Margin, Padding, Visibility};
    use crate::core::{
        merge_update, resolve, Block, BlockId, BlockTypeRegistry, Content, Document, EditStatus, RawSettings,
        Settings, SettingsPatch, Viewport,
    };

    fn raw(value: serde_json::Value) -> RawSettings {
        serde_json::from_value(value).expect("valid settings JSON")
    }

    /// A settings object that only names `padding.top` resolves to the full
    /// envelope: every other spacing is 0 and every device is visible.
    #[test]
    fn test_resolve_partial_padding() {
        let settings = resolve(&raw(json!({ "padding": { "top": 10 } })));

        assert_eq!(settings.padding, Padding::new(10.0, 0.0, 0.0, 0.0));
        assert_eq!(settings.margin, Margin::default());
        assert_eq!(settings.visibility, Visibility::default());
        assert!(settings.background_color.is_none());
        assert!(settings.text_color.is_none());
    }

    /// Absence never hides a block
    #[test]
    fn test_empty_settings_are_visible_everywhere() {
        let settings = resolve(&RawSettings::default());
        for viewport in [Viewport::Desktop, Viewport::Tablet, Viewport::Mobile] {
            assert!(settings.is_visible(viewport));
        }
    }

    /// Malformed leaves degrade to defaults instead of failing the load
    #[test]
    fn test_malformed_leaves_default() {
        let settings = resolve(&raw(json!({
            "padding": { "top": "24", "bottom": "lots", "left": null },
            "visibility": { "tablet": 0 },
            "backgroundColor": ""
        })));
        assert_eq!(settings.padding.top, 24.0);
        assert_eq!(settings.padding.bottom, 0.0);
        assert_eq!(settings.padding.left, 0.0);
        assert!(settings.visibility.tablet);
        assert!(settings.background_color.is_none());
    }

    /// Touching one padding side leaves the three siblings, the margins, the
    /// visibility flags and both colors alone.
    #[test]
    fn test_merge_update_keeps_siblings() {
        let full = Settings {
            padding: Padding::new(1.0, 2.0, 3.0, 4.0),
            margin: Margin { top: 5.0, bottom: 6.0 },
            background_color: Some("#111111".into()),
            text_color: Some("#eeeeee".into()),
            visibility: Visibility {
                desktop: true,
                tablet: false,
                mobile: true,
            },
        };

        let merged = merge_update(&full, &SettingsPatch::new().padding_top(99.0));

        assert_eq!(merged.padding, Padding::new(99.0, 2.0, 3.0, 4.0));
        assert_eq!(merged.margin, full.margin);
        assert_eq!(merged.visibility, full.visibility);
        assert_eq!(merged.background_color, full.background_color);
        assert_eq!(merged.text_color, full.text_color);
    }

    /// Colors can be cleared explicitly
    #[test]
    fn test_merge_update_clears_color() {
        let full = Settings {
            background_color: Some("#000000".into()),
            ..Settings::standard_insert()
        };
        let merged = merge_update(&full, &SettingsPatch::new().background_color(None::<String>));
        assert!(merged.background_color.is_none());
        assert_eq!(merged.padding, full.padding);
    }

    /// A settings patch decoded from the settings panel's JSON
    #[test]
    fn test_patch_from_json() {
        let patch: SettingsPatch = serde_json::from_value(json!({
            "visibility": { "mobile": false },
            "textColor": null
        }))
        .unwrap();
        assert_eq!(patch.visibility.mobile, Some(false));
        assert_eq!(patch.text_color, Some(None));
        assert!(patch.background_color.is_none());
    }

    /// Operations on an id that is not in the document report `NotFound`
    /// and hand back an identical document.
    #[test]
    fn test_stale_ids_never_throw() {
        let document = Document::new(vec![Block::new(
            BlockId::from("a"),
            "text",
            Content::new(),
            RawSettings::default(),
        )]);
        let ghost = BlockId::from("ghost");

        let edits = [
            document.delete_by_id(&ghost),
            document.duplicate_by_id(&ghost),
            document.move_to(&ghost, 0),
            document.update_content(&ghost, &content_from(json!({ "x": 1 }))),
            document.update_settings(&ghost, &SettingsPatch::new().margin_top(4.0)),
        ];
        for edit in edits {
            assert_eq!(edit.status, EditStatus::NotFound(ghost.clone()));
            assert_eq!(edit.document, document);
        }
    }

    /// Loading then saving without edits reproduces the original JSON,
    /// including integer spellings and keys outside the envelope.
    #[test]
    fn test_persisted_document_round_trip() {
        let persisted = json!({
            "blocks": [
                {
                    "id": "hero-1",
                    "type": "hero",
                    "content": { "title": "Bienvenue", "overlayOpacity": 50 },
                    "settings": { "padding": { "top": 0, "bottom": 0, "left": 0, "right": 0 } }
                },
                {
                    "id": "legacy",
                    "type": "retired-widget",
                    "content": { "anything": [1, 2, 3] },
                    "settings": { "visibility": { "mobile": false }, "animation": "fade" }
                }
            ]
        });

        let document = Document::from_value(persisted.clone()).unwrap();
        assert_eq!(document.to_value().unwrap(), persisted);

        let reloaded = Document::from_json(&document.to_json().unwrap()).unwrap();
        assert_eq!(reloaded, document);
    }

    /// Unknown types get empty defaults, a raw label and a raw-JSON schema
    #[test]
    fn test_registry_degrades_for_unknown_types() {
        let registry = BlockTypeRegistry::with_builtin_types();
        assert!(registry.default_content("retired-widget").is_empty());
        assert_eq!(registry.label("retired-widget"), "retired-widget");
        assert_eq!(registry.content_schema("retired-widget").len(), 1);
    }

    /// Palette insertion and duplication both mint fresh ids
    #[test]
    fn test_fresh_ids_on_create_and_duplicate() {
        let registry = BlockTypeRegistry::with_builtin_types();
        let block = registry.create_block("columns", &Settings::standard_insert());
        assert_eq!(block.children, Some(Vec::new()));

        let document = Document::new(vec![block.clone()]);
        let edit = document.duplicate_by_id(&block.id);
        let copy = edit.inserted_id().unwrap();
        assert_ne!(copy, &block.id);
        assert_eq!(edit.document.blocks[1].settings, block.settings);
    }

    /// The `contact` alias resolves to the contact form type
    #[test]
    fn test_contact_alias() {
        let registry = BlockTypeRegistry::with_builtin_types();
        assert_eq!(registry.canonical_key("contact"), "contact-form");
        assert_eq!(registry.label("contact"), registry.label("contact-form"));
    }
}
