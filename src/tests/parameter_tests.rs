//! Tests for content schemas
//!
//! Each block type describes its editable content with `ContentField`s. The
//! schema feeds the settings panel and produces advisory warnings; it never
//! rejects stored content.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::core::content::content_from;
    use crate::core::parameter::*;
    use crate::core::BlockTypeRegistry;

    /// A field built with constraints and a UI hint
    #[test]
    fn test_field_creation() {
        let field = ContentField::new("overlayOpacity", "Opacité", FieldType::Number, json!(50))
            .with_description("Opacité du voile sombre")
            .with_constraints(FieldConstraints::new().with_range(0.0, 100.0))
            .with_ui_hint(FieldUiHint::new(WidgetType::Slider).with_step(5.0).with_unit("%"));

        assert_eq!(field.id, "overlayOpacity");
        assert!(!field.required);
        assert_eq!(field.default_value, json!(50));
        assert!(field.check(Some(&json!(75))).warnings.is_empty());
    }

    /// Out-of-range numbers warn, numeric strings are read as numbers
    #[test]
    fn test_range_warnings() {
        let field = ContentField::new("limit", "Limite", FieldType::Number, json!(8))
            .with_constraints(FieldConstraints::new().with_range(1.0, 48.0));

        assert!(field.check(Some(&json!(0))).has_warnings());
        assert!(field.check(Some(&json!(49))).has_warnings());
        assert!(!field.check(Some(&json!("12"))).has_warnings());
    }

    /// Enum fields accept only their listed options
    #[test]
    fn test_enum_options() {
        let field = ContentField::new("alignment", "Alignement", FieldType::Enum, json!("center"))
            .with_constraints(FieldConstraints::new().with_options(&["left", "center", "right"]));

        assert!(!field.check(Some(&json!("left"))).has_warnings());
        assert!(field.check(Some(&json!("justify"))).has_warnings());
    }

    /// Wrong JSON shapes warn but stay valid: storage is schema-free
    #[test]
    fn test_shape_mismatch_is_only_a_warning() {
        let field = ContentField::new("items", "Éléments", FieldType::Array, json!([]));
        let result = field.check(Some(&json!("not a list")));
        assert!(result.valid);
        assert!(result.has_warnings());
        assert!(!result.has_errors());
    }

    /// Required fields warn when missing or blank
    #[test]
    fn test_required_field() {
        let field = ContentField::new("email", "E-mail", FieldType::String, json!("")).required();
        assert!(field.check(None).has_warnings());
        assert!(field.check(Some(&json!("   "))).has_warnings());
        assert!(!field.check(Some(&json!("a@b.c"))).has_warnings());
    }

    /// List lengths are checked against min/max entries
    #[test]
    fn test_length_range() {
        let field = ContentField::new("slides", "Diapositives", FieldType::Array, json!([{}]))
            .with_constraints(FieldConstraints::new().with_length_range(Some(1), Some(2)));
        assert!(field.check(Some(&json!([]))).has_warnings());
        assert!(field.check(Some(&json!([1, 2, 3]))).has_warnings());
        assert!(!field.check(Some(&json!([1]))).has_warnings());
    }

    /// Defaults of a schema become a block's initial content
    #[test]
    fn test_defaults_from_schema() {
        let schema = vec![
            ContentField::new("title", "Titre", FieldType::String, json!("Bonjour")),
            ContentField::new("columns", "Colonnes", FieldType::Enum, json!(3)),
        ];
        let content = defaults_from_schema(&schema);
        assert_eq!(content["title"], json!("Bonjour"));
        assert_eq!(content["columns"], json!(3));
    }

    /// Validation through a registered type sees resolved content, so an
    /// empty stored map still validates cleanly.
    #[test]
    fn test_validate_through_registry() {
        let registry = BlockTypeRegistry::with_builtin_types();
        let grid = registry.get("product-grid").unwrap();

        assert!(!grid.validate_content(&content_from(json!({}))).has_warnings());
        let result = grid.validate_content(&content_from(json!({ "source": "random", "columns": 9 })));
        assert_eq!(result.warnings.len(), 2);
        assert!(result.valid);
    }

    /// Serialized schema is what the settings panel receives
    #[test]
    fn test_schema_serializes_for_panel() {
        let registry = BlockTypeRegistry::with_builtin_types();
        let schema = serde_json::to_value(registry.content_schema("hero")).unwrap();
        let ids: Vec<&str> = schema
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|f| f["id"].as_str())
            .collect();
        assert!(ids.contains(&"title"));
        assert!(ids.contains(&"overlayOpacity"));
    }
}
