//! Renderer-agnostic preview tree
//!
//! Preview functions turn one block into a [`PreviewNode`] tree. The tree is
//! plain data: the host (canvas, iframe, test) decides how to paint it.
//! Ephemeral per-block UI state that previews read, such as a slider's current
//! slide, lives in [`PreviewState`], never in the document.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use super::catalog::CatalogData;
use super::content::{Content, ContentReader};
use super::settings::{Margin, Padding, Settings, Viewport};
use super::BlockId;

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// Parse an alignment keyword, falling back to `default`
    pub fn parse_or(value: &str, default: Align) -> Align {
        match value {
            "left" => Align::Left,
            "center" => Align::Center,
            "right" => Align::Right,
            _ => default,
        }
    }
}

/// Font scale, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Sm,
    Base,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xl2,
    #[serde(rename = "3xl")]
    Xl3,
    #[serde(rename = "4xl")]
    Xl4,
    #[serde(rename = "5xl")]
    Xl5,
}

impl TextSize {
    const SCALE: [TextSize; 8] = [
        TextSize::Sm,
        TextSize::Base,
        TextSize::Lg,
        TextSize::Xl,
        TextSize::Xl2,
        TextSize::Xl3,
        TextSize::Xl4,
        TextSize::Xl5,
    ];

    /// Step down one size for tablet and two for mobile
    pub fn for_viewport(self, viewport: Viewport) -> TextSize {
        let steps = match viewport {
            Viewport::Desktop => 0,
            Viewport::Tablet => 1,
            Viewport::Mobile => 2,
        };
        let index = Self::SCALE.iter().position(|s| *s == self).unwrap_or(0);
        Self::SCALE[index.saturating_sub(steps)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccordionItem {
    pub title: String,
    pub body: String,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkItem {
    pub platform: String,
    pub url: String,
    pub color: String,
}

/// One node of a block preview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PreviewNode {
    /// Full-bleed band with optional background image and overlay
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        background_image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        background_color: Option<String>,
        /// Overlay opacity in `0.0..=1.0`
        #[serde(skip_serializing_if = "Option::is_none")]
        overlay: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_height: Option<String>,
        align: Align,
        children: Vec<PreviewNode>,
    },
    /// Vertical group
    Stack { align: Align, children: Vec<PreviewNode> },
    Heading { text: String, level: u8, size: TextSize },
    Paragraph { text: String, align: Align },
    RichText { html: String, align: Align },
    Image {
        src: String,
        alt: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
        width: String,
    },
    Embed {
        provider: String,
        url: String,
        autoplay: bool,
        looped: bool,
        muted: bool,
    },
    Button {
        label: String,
        href: String,
        style: String,
        size: String,
        full_width: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        background_color: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text_color: Option<String>,
    },
    Grid { columns: u32, gap: u32, items: Vec<PreviewNode> },
    Carousel {
        per_view: u32,
        current: usize,
        /// Number of dot positions
        pages: usize,
        show_arrows: bool,
        show_dots: bool,
        autoplay: bool,
        items: Vec<PreviewNode>,
    },
    Card {
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rating: Option<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        badge: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        bullets: Vec<String>,
        highlighted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        action: Option<Box<PreviewNode>>,
    },
    Stat { value: String, label: String },
    Accordion { tabs: bool, items: Vec<AccordionItem> },
    Form {
        fields: Vec<FormField>,
        submit_label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        success_message: Option<String>,
    },
    Links { style: String, size: String, align: Align, items: Vec<LinkItem> },
    Map {
        address: String,
        lat: f64,
        lng: f64,
        zoom: u32,
        height: u32,
        marker: bool,
        style: String,
    },
    Quote { text: String, author: String },
    Spacer { height: u32 },
    Divider { style: String, color: String, thickness: u32 },
    /// A child block of a container, with its own frame
    Nested { block: Box<RenderedBlock> },
    /// Stand-in for empty or unrecognized content
    Placeholder {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<Value>,
    },
}

impl PreviewNode {
    pub fn stack(children: Vec<PreviewNode>) -> Self {
        PreviewNode::Stack {
            align: Align::Left,
            children,
        }
    }

    pub fn placeholder(message: impl Into<String>) -> Self {
        PreviewNode::Placeholder {
            message: message.into(),
            raw: None,
        }
    }

    /// Section heading scaled to the viewport (3xl on desktop)
    pub fn section_title(text: impl Into<String>, viewport: Viewport) -> Self {
        PreviewNode::Heading {
            text: text.into(),
            level: 2,
            size: TextSize::Xl3.for_viewport(viewport),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PreviewNode::Placeholder { .. })
    }

    /// Child nodes, in paint order
    pub fn children(&self) -> Vec<&PreviewNode> {
        match self {
            PreviewNode::Section { children, .. } | PreviewNode::Stack { children, .. } => {
                children.iter().collect()
            }
            PreviewNode::Grid { items, .. } | PreviewNode::Carousel { items, .. } => items.iter().collect(),
            PreviewNode::Card { action: Some(action), .. } => vec![action.as_ref()],
            PreviewNode::Nested { block } => vec![&block.body],
            _ => Vec::new(),
        }
    }

    /// All user-visible strings of this subtree, depth first
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        match self {
            PreviewNode::Heading { text, .. } | PreviewNode::Paragraph { text, .. } => out.push(text.clone()),
            PreviewNode::RichText { html, .. } => out.push(html.clone()),
            PreviewNode::Button { label, .. } => out.push(label.clone()),
            PreviewNode::Image { caption: Some(caption), .. } => out.push(caption.clone()),
            PreviewNode::Card {
                title, subtitle, body, bullets, ..
            } => {
                out.push(title.clone());
                out.extend(subtitle.iter().cloned());
                out.extend(body.iter().cloned());
                out.extend(bullets.iter().cloned());
            }
            PreviewNode::Stat { value, label } => {
                out.push(value.clone());
                out.push(label.clone());
            }
            PreviewNode::Accordion { items, .. } => {
                for item in items {
                    out.push(item.title.clone());
                    out.push(item.body.clone());
                }
            }
            PreviewNode::Form {
                fields, submit_label, ..
            } => {
                out.extend(fields.iter().map(|f| f.label.clone()));
                out.push(submit_label.clone());
            }
            PreviewNode::Map { address, .. } => out.push(address.clone()),
            PreviewNode::Quote { text, author } => {
                out.push(text.clone());
                out.push(author.clone());
            }
            PreviewNode::Placeholder { message, .. } => out.push(message.clone()),
            _ => {}
        }
        for child in self.children() {
            child.collect_texts(out);
        }
    }
}

/// Resolved layout envelope applied around a block's preview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockFrame {
    pub padding: Padding,
    pub margin: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl From<&Settings> for BlockFrame {
    fn from(settings: &Settings) -> Self {
        Self {
            padding: settings.padding,
            margin: settings.margin,
            background_color: settings.background_color.clone(),
            text_color: settings.text_color.clone(),
        }
    }
}

/// One block of a render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBlock {
    pub block_id: BlockId,
    pub block_type: String,
    /// Palette label of the type, or the raw key when unknown
    pub label: String,
    pub frame: BlockFrame,
    pub body: PreviewNode,
    /// Rendered through the placeholder path
    pub fallback: bool,
}

/// Ephemeral per-block preview state
///
/// Owned by the session, never persisted, never snapshotted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewState {
    slides: HashMap<BlockId, usize>,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current slide of a block (0 when never advanced)
    pub fn slide(&self, id: &BlockId) -> usize {
        self.slides.get(id).copied().unwrap_or(0)
    }

    pub fn set_slide(&mut self, id: &BlockId, index: usize) {
        self.slides.insert(id.clone(), index);
    }

    /// Advance to the next slide, wrapping at `count`
    pub fn advance(&mut self, id: &BlockId, count: usize) -> usize {
        let next = if count == 0 { 0 } else { (self.slide(id) + 1) % count };
        self.slides.insert(id.clone(), next);
        next
    }

    pub fn forget(&mut self, id: &BlockId) {
        self.slides.remove(id);
    }

    /// Drop state of blocks not matching `keep`
    pub fn retain(&mut self, keep: impl Fn(&BlockId) -> bool) {
        self.slides.retain(|id, _| keep(id));
    }

    pub fn clear(&mut self) {
        self.slides.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Inputs handed to a block type's preview function
#[derive(Debug, Clone, Copy)]
pub struct PreviewContext<'a> {
    pub block_id: &'a BlockId,
    pub block_type: &'a str,
    /// Content after defaults and legacy aliases were applied
    pub content: &'a Content,
    pub settings: &'a Settings,
    pub viewport: Viewport,
    pub catalog: &'a CatalogData,
    pub state: &'a PreviewState,
    /// Visible children, already rendered (containers only)
    pub children: &'a [RenderedBlock],
}

impl<'a> PreviewContext<'a> {
    pub fn reader(&self) -> ContentReader<'a> {
        ContentReader::new(self.content)
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport == Viewport::Mobile
    }

    pub fn is_tablet(&self) -> bool {
        self.viewport == Viewport::Tablet
    }
}
