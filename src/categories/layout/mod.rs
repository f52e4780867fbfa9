//! Layout block implementations
//!
//! Blocks that structure a page: banners, column containers, spacing and
//! brand storytelling sections.

pub mod columns;
pub mod divider;
pub mod hero;
pub mod manifesto;
pub mod slider;
pub mod spacer;
pub mod values;

pub use columns::ColumnsBlock;
pub use divider::DividerBlock;
pub use hero::HeroBlock;
pub use manifesto::ManifestoBlock;
pub use slider::SliderBlock;
pub use spacer::SpacerBlock;
pub use values::ValuesBlock;
