//! Video Block
//!
//! Embeds a YouTube or Vimeo video, or an uploaded file, by URL. Provider URLs
//! are turned into their embed form; anything the parser cannot read is shown
//! as a placeholder rather than a broken frame.

use serde_json::json;

use crate::categories::BlockCategory;
use crate::core::block::{BlockError, BlockType, BlockTypeMetadata};
use crate::core::content::Content;
use crate::core::parameter::{
    defaults_from_schema, ContentField, FieldConstraints, FieldType, FieldUiHint, WidgetType,
};
use crate::core::preview::{PreviewContext, PreviewNode};

pub struct VideoBlock {
    metadata: BlockTypeMetadata,
    schema: Vec<ContentField>,
}

impl VideoBlock {
    pub fn new() -> Self {
        Self {
            metadata: BlockTypeMetadata {
                id: "video".into(),
                name: "Vidéo".into(),
                category: BlockCategory::Content,
                description: "Vidéo YouTube, Vimeo ou fichier".into(),
                version: "1.0.0".into(),
                icon: "video".into(),
                keywords: vec!["youtube".into(), "vimeo".into(), "embed".into()],
            },
            schema: vec![
                ContentField::new("type", "Source", FieldType::Enum, json!("youtube"))
                    .with_constraints(FieldConstraints::new().with_options(&["youtube", "vimeo", "upload"]))
                    .with_ui_hint(FieldUiHint::new(WidgetType::Select)),
                ContentField::new("url", "URL", FieldType::Url, json!("")),
                ContentField::new("autoplay", "Lecture automatique", FieldType::Boolean, json!(false)),
                ContentField::new("loop", "En boucle", FieldType::Boolean, json!(false)),
                ContentField::new("muted", "Muet", FieldType::Boolean, json!(true)),
            ],
        }
    }
}

impl Default for VideoBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the 11-character video id from any common YouTube URL form
pub fn youtube_id(url: &str) -> Option<String> {
    const MARKERS: [&str; 4] = ["youtu.be/", "v=", "/embed/", "/v/"];
    MARKERS.iter().find_map(|marker| {
        let start = url.find(marker)? + marker.len();
        let id: String = url[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        (id.len() == 11).then_some(id)
    })
}

/// Numeric Vimeo video id
pub fn vimeo_id(url: &str) -> Option<String> {
    let start = url.find("vimeo.com/")? + "vimeo.com/".len();
    let id: String = url[start..].chars().take_while(char::is_ascii_digit).collect();
    (!id.is_empty()).then_some(id)
}

fn flag(on: bool) -> u8 {
    on as u8
}

/// Embed URL for a provider, or `None` when the URL cannot be read
pub fn embed_url(provider: &str, url: &str, autoplay: bool, looped: bool, muted: bool) -> Option<String> {
    match provider {
        "youtube" => youtube_id(url).map(|id| {
            format!(
                "https://www.youtube.com/embed/{}?autoplay={}&loop={}&mute={}",
                id,
                flag(autoplay),
                flag(looped),
                flag(muted)
            )
        }),
        "vimeo" => vimeo_id(url).map(|id| {
            format!(
                "https://player.vimeo.com/video/{}?autoplay={}&loop={}&muted={}",
                id,
                flag(autoplay),
                flag(looped),
                flag(muted)
            )
        }),
        _ => Some(url.to_string()),
    }
}

impl BlockType for VideoBlock {
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
        let url = match c.opt_str("url") {
            Some(url) => url,
            None => return Ok(PreviewNode::placeholder("Aucune vidéo sélectionnée")),
        };

        let provider = c.str("type", "youtube");
        let autoplay = c.bool("autoplay", false);
        let looped = c.bool("loop", false);
        let muted = c.bool("muted", true);

        Ok(match embed_url(&provider, &url, autoplay, looped, muted) {
            Some(url) => PreviewNode::Embed {
                provider,
                url,
                autoplay,
                looped,
                muted,
            },
            None => PreviewNode::placeholder("URL de vidéo invalide"),
        })
    }
}
