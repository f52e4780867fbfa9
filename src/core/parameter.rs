//! Content field schema for the settings editor
//!
//! Each block type describes its editable content as a list of [`ContentField`]s.
//! The schema drives the settings panel and advisory validation; it never
//! gates what may be stored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::Content;

/// Editable content field definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentField {
    /// Content key the field edits
    pub id: String,
    /// Label shown in the settings panel
    pub name: String,
    pub field_type: FieldType,
    pub description: String,
    /// Value used when the key is absent
    pub default_value: Value,
    /// Whether an empty value deserves a warning
    pub required: bool,
    pub constraints: Option<FieldConstraints>,
    pub ui_hint: Option<FieldUiHint>,
}

impl ContentField {
    /// Minimal field; defaults to not required, no constraints, no hint
    pub fn new(id: &str, name: &str, field_type: FieldType, default_value: Value) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            field_type,
            description: String::new(),
            default_value,
            required: false,
            constraints: None,
            ui_hint: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_constraints(mut self, constraints: FieldConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_ui_hint(mut self, hint: FieldUiHint) -> Self {
        self.ui_hint = Some(hint);
        self
    }

    /// Single raw-JSON field used for block types the registry does not know
    pub fn raw_json() -> Self {
        ContentField::new("content", "Contenu (JSON)", FieldType::Object, Value::Object(Content::new()))
            .with_ui_hint(FieldUiHint::new(WidgetType::JsonEditor))
    }

    /// Check one value against this field
    ///
    /// Problems are reported as warnings: content is schema-free in storage.
    pub fn check(&self, value: Option<&Value>) -> ValidationResult {
        let value = match value {
            None | Some(Value::Null) => {
                return if self.required {
                    ValidationResult::ok().with_warning(format!("'{}' is empty", self.id))
                } else {
                    ValidationResult::ok()
                };
            }
            Some(value) => value,
        };

        if !self.field_type.accepts(value) {
            return ValidationResult::ok().with_warning(format!(
                "'{}' should be {}, found {}",
                self.id,
                self.field_type.describe(),
                json_kind(value)
            ));
        }

        if self.required && value.as_str().map_or(false, |s| s.trim().is_empty()) {
            return ValidationResult::ok().with_warning(format!("'{}' is empty", self.id));
        }

        match &self.constraints {
            Some(constraints) => constraints.check(&self.id, value),
            None => ValidationResult::ok(),
        }
    }
}

/// Kind of value a content field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    String,
    /// HTML produced by the rich-text editor
    RichText,
    Number,
    Boolean,
    /// One of [`FieldConstraints::allowed_values`]
    Enum,
    /// CSS color string
    Color,
    /// Image URL
    Image,
    /// Link target
    Url,
    Array,
    Object,
}

impl FieldType {
    /// Whether `value` has the JSON shape this field expects
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String
            | FieldType::RichText
            | FieldType::Color
            | FieldType::Image
            | FieldType::Url => value.is_string(),
            FieldType::Number => {
                value.is_number() || value.as_str().map_or(false, |s| s.trim().parse::<f64>().is_ok())
            }
            FieldType::Boolean => value.is_boolean(),
            FieldType::Enum => value.is_string() || value.is_number(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::RichText | FieldType::Color | FieldType::Image | FieldType::Url => {
                "a string"
            }
            FieldType::Number => "a number",
            FieldType::Boolean => "a boolean",
            FieldType::Enum => "one of the listed options",
            FieldType::Array => "a list",
            FieldType::Object => "an object",
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Field constraints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldConstraints {
    /// Minimum value (for numbers)
    pub min: Option<f64>,
    /// Maximum value (for numbers)
    pub max: Option<f64>,
    /// Allowed values (for enums)
    pub allowed_values: Option<Vec<Value>>,
    /// Minimum length (for strings/lists)
    pub min_length: Option<usize>,
    /// Maximum length (for strings/lists)
    pub max_length: Option<usize>,
}

impl FieldConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_range(self, min: f64, max: f64) -> Self {
        self.with_min(min).with_max(max)
    }

    /// Allowed string options
    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.allowed_values = Some(options.iter().map(|o| Value::String(o.to_string())).collect());
        self
    }

    /// Allowed numeric options
    pub fn with_numeric_options(mut self, options: &[u32]) -> Self {
        self.allowed_values = Some(options.iter().map(|o| Value::from(*o)).collect());
        self
    }

    pub fn with_length_range(mut self, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    fn check(&self, field: &str, value: &Value) -> ValidationResult {
        let mut result = ValidationResult::ok();

        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        if let Some(n) = number {
            if let Some(min) = self.min {
                if n < min {
                    result = result.with_warning(format!("'{}' is below the minimum of {}", field, min));
                }
            }
            if let Some(max) = self.max {
                if n > max {
                    result = result.with_warning(format!("'{}' is above the maximum of {}", field, max));
                }
            }
        }

        if let Some(allowed) = &self.allowed_values {
            let matches = allowed.iter().any(|candidate| match (candidate, number) {
                (Value::Number(c), Some(n)) => c.as_f64() == Some(n),
                _ => candidate == value,
            });
            if !matches {
                result = result.with_warning(format!("'{}' has an unsupported value {}", field, value));
            }
        }

        let length = match value {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            _ => None,
        };
        if let Some(len) = length {
            if let Some(min_length) = self.min_length {
                if len < min_length {
                    result = result.with_warning(format!("'{}' needs at least {} entries", field, min_length));
                }
            }
            if let Some(max_length) = self.max_length {
                if len > max_length {
                    result = result.with_warning(format!("'{}' allows at most {} entries", field, max_length));
                }
            }
        }

        result
    }
}

/// UI hints for the settings panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldUiHint {
    pub widget: WidgetType,
    /// Step size (for sliders)
    pub step: Option<f64>,
    /// Unit label
    pub unit: Option<String>,
    pub help_text: Option<String>,
}

impl FieldUiHint {
    pub fn new(widget: WidgetType) -> Self {
        Self {
            widget,
            step: None,
            unit: None,
            help_text: None,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_help_text(mut self, help_text: &str) -> Self {
        self.help_text = Some(help_text.to_string());
        self
    }
}

/// Widget types for the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetType {
    Input,
    Textarea,
    RichText,
    Slider,
    Select,
    Checkbox,
    ColorPicker,
    ImagePicker,
    /// Repeatable list of sub-records (slides, FAQ items, plans, ...)
    ListEditor,
    /// Product or collection picker backed by the catalog
    CatalogPicker,
    JsonEditor,
}

/// Validation result
///
/// Content validation only ever produces warnings; errors are reserved for
/// registration-time checks of a block type's own definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![msg.into()],
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, msg: impl Into<String>) -> Self {
        self.warnings.push(msg.into());
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Merge another validation result into this one
    pub fn merge(mut self, other: ValidationResult) -> Self {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }
}

/// Content made of every field's default value
pub fn defaults_from_schema(schema: &[ContentField]) -> Content {
    schema
        .iter()
        .map(|field| (field.id.clone(), field.default_value.clone()))
        .collect()
}

/// Check every schema field against `content`
pub fn validate_against(schema: &[ContentField], content: &Content) -> ValidationResult {
    schema
        .iter()
        .fold(ValidationResult::ok(), |acc, field| acc.merge(field.check(content.get(&field.id))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns_field() -> ContentField {
        ContentField::new("columns", "Colonnes", FieldType::Enum, json!(3))
            .with_constraints(FieldConstraints::new().with_numeric_options(&[2, 3, 4]))
    }

    #[test]
    fn test_check_accepts_matching_value() {
        let result = columns_field().check(Some(&json!(4)));
        assert!(result.valid);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_check_warns_on_unsupported_option() {
        let result = columns_field().check(Some(&json!(7)));
        assert!(result.valid, "content problems never invalidate");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_check_warns_on_wrong_shape() {
        let field = ContentField::new("autoplay", "Lecture auto", FieldType::Boolean, json!(true));
        let result = field.check(Some(&json!("yes")));
        assert!(result.has_warnings());
        assert!(result.warnings[0].contains("a boolean"));
    }

    #[test]
    fn test_required_empty_string_warns() {
        let field = ContentField::new("src", "Image", FieldType::Image, json!("")).required();
        assert!(field.check(Some(&json!("  "))).has_warnings());
        assert!(field.check(None).has_warnings());
        assert!(!field.check(Some(&json!("/a.png"))).has_warnings());
    }

    #[test]
    fn test_range_constraints() {
        let field = ContentField::new("height", "Hauteur", FieldType::Number, json!(60))
            .with_constraints(FieldConstraints::new().with_range(0.0, 400.0));
        assert!(!field.check(Some(&json!(120))).has_warnings());
        assert!(field.check(Some(&json!(-1))).has_warnings());
        assert!(field.check(Some(&json!("500"))).has_warnings());
    }

    #[test]
    fn test_validate_against_merges_all_fields() {
        let schema = vec![
            columns_field(),
            ContentField::new("title", "Titre", FieldType::String, json!("")).required(),
        ];
        let content = serde_json::from_value(json!({ "columns": 9 })).unwrap();
        let result = validate_against(&schema, &content);
        assert_eq!(result.warnings.len(), 2);
        assert!(result.valid);
    }
}
