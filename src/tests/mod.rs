//! Cross-module test suite for the page builder
//!
//! Unit tests live next to the code they cover; the modules here exercise the
//! pieces together: the settings/document/history contracts, content schemas,
//! property-based invariants, whole editing sessions and a custom block type.

#[cfg(test)]
mod core_tests;
#[cfg(test)]
mod parameter_tests;
#[cfg(test)]
mod integration;
