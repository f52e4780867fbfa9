//! Schema-free block content
//!
//! Content is stored as an arbitrary JSON object. Each block type reads it
//! through a [`ContentReader`], which supplies a default for every field that is
//! missing or has the wrong shape, so malformed content never fails a read.

use serde_json::{Map, Value};

/// Type-specific key/value map of a block
pub type Content = Map<String, Value>;

/// Shallow merge: every key in `patch` replaces the key in `content`
pub fn merge_patch(content: &Content, patch: &Content) -> Content {
    let mut out = content.clone();
    for (key, value) in patch {
        out.insert(key.clone(), value.clone());
    }
    out
}

/// Overlay `raw` on top of `defaults`, honoring legacy field names
///
/// `aliases` is a list of `(legacy, canonical)` pairs. A legacy key is only
/// used when the canonical key is absent from `raw`.
pub fn overlay(defaults: Content, raw: &Content, aliases: &[(&str, &str)]) -> Content {
    let mut out = defaults;
    for (key, value) in raw {
        out.insert(key.clone(), value.clone());
    }
    for (legacy, canonical) in aliases {
        if raw.contains_key(*canonical) {
            continue;
        }
        if let Some(value) = raw.get(*legacy) {
            out.insert((*canonical).to_string(), value.clone());
        }
    }
    out
}

/// Build a [`Content`] map from a `serde_json::json!` object literal
///
/// Non-object values produce an empty map.
pub fn content_from(value: Value) -> Content {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Typed, defaulting view over a content map
#[derive(Debug, Clone, Copy)]
pub struct ContentReader<'a> {
    content: &'a Content,
}

impl<'a> ContentReader<'a> {
    pub fn new(content: &'a Content) -> Self {
        Self { content }
    }

    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.content.get(key)
    }

    /// String value, or `default` when absent or not a string
    pub fn str(&self, key: &str, default: &str) -> String {
        match self.content.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => default.to_string(),
        }
    }

    /// Non-empty string value
    pub fn opt_str(&self, key: &str) -> Option<String> {
        match self.content.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Numeric value; numeric strings are accepted
    pub fn number(&self, key: &str, default: f64) -> f64 {
        match self.content.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .unwrap_or(default),
            _ => default,
        }
    }

    /// Non-negative integer value, clamped to `min..=max`
    pub fn count(&self, key: &str, default: u32, min: u32, max: u32) -> u32 {
        let value = self.number(key, default as f64);
        (value.round().max(0.0) as u32).clamp(min, max)
    }

    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.content.get(key) {
            Some(Value::Bool(b)) => *b,
            _ => default,
        }
    }

    pub fn array(&self, key: &str) -> &'a [Value] {
        match self.content.get(key) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Object elements of an array field; other elements are skipped
    pub fn objects(&self, key: &str) -> Vec<ContentReader<'a>> {
        self.array(key)
            .iter()
            .filter_map(|item| item.as_object().map(ContentReader::new))
            .collect()
    }

    /// String elements of an array field; other elements are skipped
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.array(key)
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    }
}
