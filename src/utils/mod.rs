//! Utility functions for page queries.
//!
//! This module provides:
//! - CSS selector parsing utilities
//! - Text normalization for rendered element content

mod selector;
mod text;

pub use selector::parse_selector_with_fallback;
pub use text::visible_text;
