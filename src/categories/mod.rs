//! Built-in block types and palette categories
//!
//! Each block type lives in its own file under the palette category it is
//! listed in. [`register_builtin_types`] registers all of them, plus the
//! `contact` alias kept for documents written before `contact-form` existed.

pub mod advanced;
pub mod commerce;
pub mod content;
pub mod engagement;
pub mod forms;
pub mod layout;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::registry::BlockTypeRegistry;
use crate::core::settings::Viewport;

/// Palette category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    /// Page structure (hero, columns, spacers, ...)
    Layout,
    /// Text and media
    Content,
    /// Catalog-aware blocks
    Commerce,
    /// Social proof and lead capture
    Engagement,
    /// Configurable forms
    Forms,
    /// Interactive and data-heavy blocks
    Advanced,
    /// Host-defined category
    Custom(String),
}

impl BlockCategory {
    /// Built-in categories in palette order
    pub const PALETTE_ORDER: [BlockCategory; 6] = [
        BlockCategory::Layout,
        BlockCategory::Content,
        BlockCategory::Commerce,
        BlockCategory::Engagement,
        BlockCategory::Forms,
        BlockCategory::Advanced,
    ];

    /// Get a human-readable name for the category
    pub fn display_name(&self) -> &str {
        match self {
            BlockCategory::Layout => "Mise en page",
            BlockCategory::Content => "Contenu",
            BlockCategory::Commerce => "E-commerce",
            BlockCategory::Engagement => "Engagement",
            BlockCategory::Forms => "Formulaires",
            BlockCategory::Advanced => "Avancé",
            BlockCategory::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Register every built-in block type
///
/// Built-in definitions are known to be valid, so a failure here means the
/// registry already held one of these keys; it is logged and skipped.
pub fn register_builtin_types(registry: &BlockTypeRegistry) {
    let builtins: Vec<Arc<dyn crate::core::BlockType>> = vec![
        // layout
        Arc::new(layout::HeroBlock::new()),
        Arc::new(layout::ColumnsBlock::new()),
        Arc::new(layout::SpacerBlock::new()),
        Arc::new(layout::DividerBlock::new()),
        Arc::new(layout::ManifestoBlock::new()),
        Arc::new(layout::ValuesBlock::new()),
        Arc::new(layout::SliderBlock::new()),
        // content
        Arc::new(content::TextBlock::new()),
        Arc::new(content::ImageBlock::new()),
        Arc::new(content::VideoBlock::new()),
        Arc::new(content::GalleryBlock::new()),
        Arc::new(content::ButtonBlock::new()),
        Arc::new(content::QuoteBlock::new()),
        // commerce
        Arc::new(commerce::ProductGridBlock::new()),
        Arc::new(commerce::ProductCarouselBlock::new()),
        // engagement
        Arc::new(engagement::TestimonialsBlock::new()),
        Arc::new(engagement::FaqBlock::new()),
        Arc::new(engagement::NewsletterBlock::new()),
        Arc::new(engagement::ContactFormBlock::new()),
        // forms
        Arc::new(forms::CustomFormBlock::new()),
        // advanced
        Arc::new(advanced::AccordionTabsBlock::new()),
        Arc::new(advanced::FeaturesBlock::new()),
        Arc::new(advanced::SocialLinksBlock::new()),
        Arc::new(advanced::MapBlock::new()),
        Arc::new(advanced::CounterBlock::new()),
        Arc::new(advanced::PricingBlock::new()),
    ];

    for block_type in builtins {
        let key = block_type.metadata().id.clone();
        if let Err(e) = registry.register(block_type) {
            tracing::warn!(block_type = %key, error = %e, "skipping built-in block type");
        }
    }

    if let Err(e) = registry.register_alias("contact", "contact-form") {
        tracing::warn!(error = %e, "skipping contact alias");
    }
}

// ---------------------------------------------------------------------------
// Helpers shared by the built-in previews
// ---------------------------------------------------------------------------

/// Column count for a grid: fixed values for mobile and tablet, `desktop` otherwise
pub(crate) fn responsive_columns(viewport: Viewport, desktop: u32, tablet: u32, mobile: u32) -> u32 {
    match viewport {
        Viewport::Desktop => desktop,
        Viewport::Tablet => tablet,
        Viewport::Mobile => mobile,
    }
    .max(1)
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Value;

    use crate::core::catalog::CatalogData;
    use crate::core::content::content_from;
    use crate::core::preview::{PreviewContext, PreviewNode, PreviewState, RenderedBlock};
    use crate::core::settings::{Settings, Viewport};
    use crate::core::{BlockId, BlockType};

    /// Preview `raw` content with an empty catalog and no children
    pub fn preview(block_type: &dyn BlockType, raw: Value, viewport: Viewport) -> PreviewNode {
        preview_with(block_type, raw, viewport, &CatalogData::default(), &PreviewState::new(), &[])
    }

    pub fn preview_with(
        block_type: &dyn BlockType,
        raw: Value,
        viewport: Viewport,
        catalog: &CatalogData,
        state: &PreviewState,
        children: &[RenderedBlock],
    ) -> PreviewNode {
        let content = block_type.resolve_content(&content_from(raw));
        let settings = Settings::default();
        let id = BlockId::from("test-block");
        let ctx = PreviewContext {
            block_id: &id,
            block_type: &block_type.metadata().id,
            content: &content,
            settings: &settings,
            viewport,
            catalog,
            state,
            children,
        };
        block_type.preview(&ctx).expect("preview should succeed")
    }

    /// First node of the given kind in a depth-first walk
    pub fn find<'a>(node: &'a PreviewNode, pred: &dyn Fn(&PreviewNode) -> bool) -> Option<&'a PreviewNode> {
        if pred(node) {
            return Some(node);
        }
        node.children().into_iter().find_map(|child| find(child, pred))
    }
}
