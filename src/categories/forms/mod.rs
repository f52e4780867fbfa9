//! Configurable forms

pub mod custom_form;

pub use custom_form::CustomFormBlock;
