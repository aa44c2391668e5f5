//! Built-in transform plugins.

mod inline_constants;
mod strict_mode;

pub use inline_constants::InlineConstants;
pub use strict_mode::StrictMode;
