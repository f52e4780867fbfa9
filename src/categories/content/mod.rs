//! Text and media blocks

pub mod button;
pub mod gallery;
pub mod image;
pub mod quote;
pub mod text;
pub mod video;

pub use button::ButtonBlock;
pub use gallery::GalleryBlock;
pub use image::ImageBlock;
pub use quote::QuoteBlock;
pub use text::TextBlock;
pub use video::VideoBlock;
