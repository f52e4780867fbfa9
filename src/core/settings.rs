//! Settings envelope shared by every block type
//!
//! Blocks persist a [`RawSettings`] exactly as it was loaded: any subset of the
//! envelope may be present, and keys this crate does not know about are kept in
//! [`RawSettings::extra`]. Readers never look at the raw form directly; they call
//! [`resolve`], which fills every absent field with its default. Edits go through
//! [`merge_update`] (resolved form) or [`RawSettings::apply_patch`] (persisted
//! form), both of which merge padding, margin and visibility field by field.
//!
//! Defaults: padding and margin `0`, colors unset, every viewport visible.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Device class used for responsive previews and per-device visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Desktop,
    Tablet,
    Mobile,
}

impl Viewport {
    /// Every viewport class, widest first
    pub const ALL: [Viewport; 3] = [Viewport::Desktop, Viewport::Tablet, Viewport::Mobile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Viewport::Desktop => "desktop",
            Viewport::Tablet => "tablet",
            Viewport::Mobile => "mobile",
        }
    }

    /// Maximum canvas width in pixels, `None` for full width
    pub fn max_width(&self) -> Option<u32> {
        match self {
            Viewport::Desktop => None,
            Viewport::Tablet => Some(768),
            Viewport::Mobile => Some(375),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::Desktop
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(Viewport::Desktop),
            "tablet" => Ok(Viewport::Tablet),
            "mobile" => Ok(Viewport::Mobile),
            other => Err(format!("unknown viewport '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolved envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Padding {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub desktop: bool,
    pub tablet: bool,
    pub mobile: bool,
}

impl Visibility {
    pub fn is_visible(&self, viewport: Viewport) -> bool {
        match viewport {
            Viewport::Desktop => self.desktop,
            Viewport::Tablet => self.tablet,
            Viewport::Mobile => self.mobile,
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            desktop: true,
            tablet: true,
            mobile: true,
        }
    }
}

/// Fully resolved layout envelope
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub padding: Padding,
    pub margin: Margin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    pub visibility: Visibility,
}

impl Settings {
    /// Envelope given to blocks inserted from the palette
    pub fn standard_insert() -> Self {
        Self {
            padding: Padding::new(40.0, 40.0, 20.0, 20.0),
            margin: Margin::default(),
            background_color: None,
            text_color: None,
            visibility: Visibility::default(),
        }
    }

    pub fn is_visible(&self, viewport: Viewport) -> bool {
        self.visibility.is_visible(viewport)
    }
}

// ---------------------------------------------------------------------------
// Persisted (partial) envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPadding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMargin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawVisibility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Value>,
}

/// Settings exactly as persisted
///
/// Leaf values are kept as raw JSON so that `10` stays `10` (not `10.0`) across
/// a load/save cycle. A group or color of the wrong JSON type is not an error:
/// it is left in `extra` under its own key, resolves to the defaults and is
/// written back as it was found.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<RawPadding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<RawMargin>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<RawVisibility>,
    /// Keys outside the envelope, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for RawSettings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut extra = Map::<String, Value>::deserialize(deserializer)?;
        Ok(RawSettings {
            padding: take_lenient(&mut extra, "padding"),
            margin: take_lenient(&mut extra, "margin"),
            background_color: take_lenient(&mut extra, "backgroundColor"),
            text_color: take_lenient(&mut extra, "textColor"),
            visibility: take_lenient(&mut extra, "visibility"),
            extra,
        })
    }
}

/// Remove `key` from `map` if it holds a `T` (or null); otherwise leave it
fn take_lenient<T: DeserializeOwned>(map: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = match map.get(key)? {
        Value::Null => None,
        value => Some(T::deserialize(value).ok()?),
    };
    map.remove(key);
    parsed
}

impl RawSettings {
    /// Resolve to the full envelope (see [`resolve`])
    pub fn resolve(&self) -> Settings {
        resolve(self)
    }

    /// Apply a patch to the persisted form, writing only the fields it touches
    ///
    /// `resolve(&raw.apply_patch(&p)) == merge_update(&resolve(&raw), &p)` for any
    /// `raw` and `p`.
    pub fn apply_patch(&self, patch: &SettingsPatch) -> RawSettings {
        let mut out = self.clone();

        if !patch.padding.is_empty() {
            out.extra.remove("padding");
            let padding = out.padding.get_or_insert_with(RawPadding::default);
            write_number(&mut padding.top, patch.padding.top);
            write_number(&mut padding.bottom, patch.padding.bottom);
            write_number(&mut padding.left, patch.padding.left);
            write_number(&mut padding.right, patch.padding.right);
        }

        if !patch.margin.is_empty() {
            out.extra.remove("margin");
            let margin = out.margin.get_or_insert_with(RawMargin::default);
            write_number(&mut margin.top, patch.margin.top);
            write_number(&mut margin.bottom, patch.margin.bottom);
        }

        if !patch.visibility.is_empty() {
            out.extra.remove("visibility");
            let visibility = out.visibility.get_or_insert_with(RawVisibility::default);
            write_bool(&mut visibility.desktop, patch.visibility.desktop);
            write_bool(&mut visibility.tablet, patch.visibility.tablet);
            write_bool(&mut visibility.mobile, patch.visibility.mobile);
        }

        if let Some(color) = &patch.background_color {
            out.extra.remove("backgroundColor");
            out.background_color = color.clone();
        }
        if let Some(color) = &patch.text_color {
            out.extra.remove("textColor");
            out.text_color = color.clone();
        }

        out
    }
}

impl From<&Settings> for RawSettings {
    fn from(settings: &Settings) -> Self {
        RawSettings {
            padding: Some(RawPadding {
                top: Some(number_value(settings.padding.top)),
                bottom: Some(number_value(settings.padding.bottom)),
                left: Some(number_value(settings.padding.left)),
                right: Some(number_value(settings.padding.right)),
            }),
            margin: Some(RawMargin {
                top: Some(number_value(settings.margin.top)),
                bottom: Some(number_value(settings.margin.bottom)),
            }),
            background_color: settings.background_color.clone(),
            text_color: settings.text_color.clone(),
            visibility: Some(RawVisibility {
                desktop: Some(Value::Bool(settings.visibility.desktop)),
                tablet: Some(Value::Bool(settings.visibility.tablet)),
                mobile: Some(Value::Bool(settings.visibility.mobile)),
            }),
            extra: Map::new(),
        }
    }
}

impl From<Settings> for RawSettings {
    fn from(settings: Settings) -> Self {
        RawSettings::from(&settings)
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Fill every envelope field with its default when absent
///
/// Pure and idempotent. Numeric strings (`"12"`) are accepted, anything else
/// that is not a number falls back to the default; a visibility flag that is
/// not a boolean counts as visible. Empty color strings resolve to unset.
pub fn resolve(raw: &RawSettings) -> Settings {
    let padding = raw.padding.as_ref();
    let margin = raw.margin.as_ref();
    let visibility = raw.visibility.as_ref();

    Settings {
        padding: Padding {
            top: read_number(padding.and_then(|p| p.top.as_ref())),
            bottom: read_number(padding.and_then(|p| p.bottom.as_ref())),
            left: read_number(padding.and_then(|p| p.left.as_ref())),
            right: read_number(padding.and_then(|p| p.right.as_ref())),
        },
        margin: Margin {
            top: read_number(margin.and_then(|m| m.top.as_ref())),
            bottom: read_number(margin.and_then(|m| m.bottom.as_ref())),
        },
        background_color: read_color(raw.background_color.as_deref()),
        text_color: read_color(raw.text_color.as_deref()),
        visibility: Visibility {
            desktop: read_flag(visibility.and_then(|v| v.desktop.as_ref())),
            tablet: read_flag(visibility.and_then(|v| v.tablet.as_ref())),
            mobile: read_flag(visibility.and_then(|v| v.mobile.as_ref())),
        },
    }
}

/// Merge a patch into a resolved envelope
///
/// Each group is merged field by field: a patch touching only `padding.top`
/// leaves the other three sides, margin, visibility and colors as they were.
pub fn merge_update(full: &Settings, patch: &SettingsPatch) -> Settings {
    let mut out = full.clone();

    merge_number(&mut out.padding.top, patch.padding.top);
    merge_number(&mut out.padding.bottom, patch.padding.bottom);
    merge_number(&mut out.padding.left, patch.padding.left);
    merge_number(&mut out.padding.right, patch.padding.right);

    merge_number(&mut out.margin.top, patch.margin.top);
    merge_number(&mut out.margin.bottom, patch.margin.bottom);

    if let Some(desktop) = patch.visibility.desktop {
        out.visibility.desktop = desktop;
    }
    if let Some(tablet) = patch.visibility.tablet {
        out.visibility.tablet = tablet;
    }
    if let Some(mobile) = patch.visibility.mobile {
        out.visibility.mobile = mobile;
    }

    if let Some(color) = &patch.background_color {
        out.background_color = read_color(color.as_deref());
    }
    if let Some(color) = &patch.text_color {
        out.text_color = read_color(color.as_deref());
    }

    out
}

// ---------------------------------------------------------------------------
// Patches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaddingPatch {
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
}

impl PaddingPatch {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none() && self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginPatch {
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
}

impl MarginPatch {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.bottom.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibilityPatch {
    #[serde(default)]
    pub desktop: Option<bool>,
    #[serde(default)]
    pub tablet: Option<bool>,
    #[serde(default)]
    pub mobile: Option<bool>,
}

impl VisibilityPatch {
    pub fn is_empty(&self) -> bool {
        self.desktop.is_none() && self.tablet.is_none() && self.mobile.is_none()
    }
}

/// Field-level edit of the settings envelope
///
/// `None` leaves a field alone. Colors take `Some(None)` to clear and
/// `Some(Some(c))` to set; in JSON that is `null` versus a string. Non-finite
/// numbers are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub padding: PaddingPatch,
    #[serde(default)]
    pub margin: MarginPatch,
    #[serde(default)]
    pub visibility: VisibilityPatch,
    #[serde(default, deserialize_with = "double_option")]
    pub background_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub text_color: Option<Option<String>>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.padding.is_empty()
            && self.margin.is_empty()
            && self.visibility.is_empty()
            && self.background_color.is_none()
            && self.text_color.is_none()
    }

    pub fn padding_top(mut self, value: f64) -> Self {
        self.padding.top = Some(value);
        self
    }

    pub fn padding_bottom(mut self, value: f64) -> Self {
        self.padding.bottom = Some(value);
        self
    }

    pub fn padding_left(mut self, value: f64) -> Self {
        self.padding.left = Some(value);
        self
    }

    pub fn padding_right(mut self, value: f64) -> Self {
        self.padding.right = Some(value);
        self
    }

    pub fn margin_top(mut self, value: f64) -> Self {
        self.margin.top = Some(value);
        self
    }

    pub fn margin_bottom(mut self, value: f64) -> Self {
        self.margin.bottom = Some(value);
        self
    }

    pub fn visible_on(mut self, viewport: Viewport, visible: bool) -> Self {
        match viewport {
            Viewport::Desktop => self.visibility.desktop = Some(visible),
            Viewport::Tablet => self.visibility.tablet = Some(visible),
            Viewport::Mobile => self.visibility.mobile = Some(visible),
        }
        self
    }

    pub fn background_color(mut self, color: Option<impl Into<String>>) -> Self {
        self.background_color = Some(color.map(Into::into));
        self
    }

    pub fn text_color(mut self, color: Option<impl Into<String>>) -> Self {
        self.text_color = Some(color.map(Into::into));
        self
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Leaf helpers
// ---------------------------------------------------------------------------

fn read_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn read_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        _ => true,
    }
}

fn read_color(value: Option<&str>) -> Option<String> {
    value.filter(|c| !c.trim().is_empty()).map(str::to_string)
}

fn merge_number(slot: &mut f64, patch: Option<f64>) {
    if let Some(value) = patch.filter(|v| v.is_finite()) {
        *slot = value;
    }
}

fn write_number(slot: &mut Option<Value>, patch: Option<f64>) {
    if let Some(value) = patch.filter(|v| v.is_finite()) {
        *slot = Some(number_value(value));
    }
}

fn write_bool(slot: &mut Option<Value>, patch: Option<bool>) {
    if let Some(value) = patch {
        *slot = Some(Value::Bool(value));
    }
}

/// JSON number for `value`, integral values encoded as integers
pub(crate) fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawSettings {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_resolve_empty_is_all_defaults() {
        let settings = resolve(&RawSettings::default());
        assert_eq!(settings, Settings::default());
        assert!(settings.visibility.desktop && settings.visibility.tablet && settings.visibility.mobile);
    }

    #[test]
    fn test_resolve_partial_padding() {
        let settings = resolve(&raw(json!({ "padding": { "top": 10 } })));

        assert_eq!(settings.padding, Padding::new(10.0, 0.0, 0.0, 0.0));
        assert_eq!(settings.margin, Margin { top: 0.0, bottom: 0.0 });
        assert_eq!(settings.visibility, Visibility::default());
        assert_eq!(settings.background_color, None);
        assert_eq!(settings.text_color, None);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let first = resolve(&raw(json!({
            "padding": { "left": 4, "right": 8.5 },
            "visibility": { "mobile": false },
            "textColor": "#111"
        })));
        let second = resolve(&RawSettings::from(&first));
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_tolerates_malformed_leaves() {
        let settings = resolve(&raw(json!({
            "padding": { "top": "12", "bottom": "wide", "left": null },
            "visibility": { "tablet": "no" },
            "backgroundColor": ""
        })));

        assert_eq!(settings.padding.top, 12.0);
        assert_eq!(settings.padding.bottom, 0.0);
        assert_eq!(settings.padding.left, 0.0);
        assert!(settings.visibility.tablet);
        assert_eq!(settings.background_color, None);
    }

    #[test]
    fn test_groups_of_the_wrong_type_resolve_to_defaults() {
        let value = json!({
            "padding": "10px",
            "margin": { "top": 6 },
            "visibility": null,
            "backgroundColor": 5,
            "textColor": "#222"
        });
        let parsed = raw(value);

        assert_eq!(parsed.padding, None);
        assert_eq!(parsed.visibility, None);
        assert_eq!(parsed.background_color, None);
        assert_eq!(parsed.extra.get("padding"), Some(&json!("10px")));

        let settings = parsed.resolve();
        assert_eq!(settings.padding, Padding::default());
        assert_eq!(settings.margin.top, 6.0);
        assert_eq!(settings.visibility, Visibility::default());
        assert_eq!(settings.background_color, None);
        assert_eq!(settings.text_color.as_deref(), Some("#222"));

        // Written back as found, minus the null group
        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({ "padding": "10px", "margin": { "top": 6 }, "backgroundColor": 5, "textColor": "#222" })
        );

        // A patch replaces the malformed value instead of duplicating the key
        let patched = parsed.apply_patch(&SettingsPatch::new().padding_top(8.0).background_color(Some("#fff")));
        assert!(patched.extra.is_empty());
        assert_eq!(
            serde_json::to_value(&patched).unwrap(),
            json!({
                "padding": { "top": 8 },
                "margin": { "top": 6 },
                "backgroundColor": "#fff",
                "textColor": "#222"
            })
        );
    }

    #[test]
    fn test_merge_single_padding_field_keeps_siblings() {
        let full = Settings {
            padding: Padding::new(1.0, 2.0, 3.0, 4.0),
            margin: Margin { top: 5.0, bottom: 6.0 },
            background_color: Some("#fff".into()),
            text_color: Some("#000".into()),
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

    #[test]
    fn test_merge_color_set_and_clear() {
        let full = Settings::default();
        let set = merge_update(&full, &SettingsPatch::new().background_color(Some("#abc")));
        assert_eq!(set.background_color.as_deref(), Some("#abc"));

        let cleared = merge_update(&set, &SettingsPatch::new().background_color(None::<String>));
        assert_eq!(cleared.background_color, None);
    }

    #[test]
    fn test_merge_ignores_non_finite() {
        let full = Settings::standard_insert();
        let merged = merge_update(&full, &SettingsPatch::new().padding_left(f64::NAN));
        assert_eq!(merged, full);
    }

    #[test]
    fn test_apply_patch_writes_only_touched_fields() {
        let original = raw(json!({ "padding": { "top": 10 }, "customKey": [1, 2] }));
        let patched = original.apply_patch(&SettingsPatch::new().visible_on(Viewport::Mobile, false));

        let json = serde_json::to_value(&patched).unwrap();
        assert_eq!(
            json,
            json!({
                "padding": { "top": 10 },
                "visibility": { "mobile": false },
                "customKey": [1, 2]
            })
        );
    }

    #[test]
    fn test_apply_patch_agrees_with_merge_update() {
        let original = raw(json!({ "padding": { "top": 3, "left": 7 }, "margin": { "bottom": 2 } }));
        let patch = SettingsPatch::new()
            .padding_left(11.0)
            .margin_top(4.0)
            .text_color(Some("red"));

        assert_eq!(
            original.apply_patch(&patch).resolve(),
            merge_update(&original.resolve(), &patch)
        );
    }

    #[test]
    fn test_raw_round_trip_keeps_integers() {
        let value = json!({ "padding": { "top": 40, "bottom": 12.5 }, "backgroundColor": "#f8f8f8" });
        let parsed: RawSettings = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap(), value);
    }

    #[test]
    fn test_patch_deserialization_distinguishes_null_from_absent() {
        let patch: SettingsPatch =
            serde_json::from_value(json!({ "backgroundColor": null, "padding": { "top": 5 } })).unwrap();
        assert_eq!(patch.background_color, Some(None));
        assert_eq!(patch.text_color, None);
        assert_eq!(patch.padding.top, Some(5.0));
    }

    #[test]
    fn test_number_value_encoding() {
        assert_eq!(number_value(40.0), json!(40));
        assert_eq!(number_value(-3.0), json!(-3));
        assert_eq!(number_value(2.5), json!(2.5));
    }

    #[test]
    fn test_viewport_parsing() {
        assert_eq!("mobile".parse::<Viewport>().unwrap(), Viewport::Mobile);
        assert!("watch".parse::<Viewport>().is_err());
        assert_eq!(Viewport::Tablet.to_string(), "tablet");
    }
}
