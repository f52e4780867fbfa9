//! Social proof and lead-capture blocks

pub mod contact_form;
pub mod faq;
pub mod newsletter;
pub mod testimonials;

pub use contact_form::ContactFormBlock;
pub use faq::FaqBlock;
pub use newsletter::NewsletterBlock;
pub use testimonials::TestimonialsBlock;
