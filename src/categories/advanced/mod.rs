//! Interactive and data-heavy blocks

pub mod accordion_tabs;
pub mod counter;
pub mod features;
pub mod map;
pub mod pricing;
pub mod social_links;

pub use accordion_tabs::AccordionTabsBlock;
pub use counter::CounterBlock;
pub use features::FeaturesBlock;
pub use map::MapBlock;
pub use pricing::PricingBlock;
pub use social_links::SocialLinksBlock;
