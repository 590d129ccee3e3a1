//! Format implementations
//!
//! This module contains the output formats a build writes for every bundle.

pub mod css;
pub mod scss;

pub use css::CssFormat;
pub use scss::ScssFormat;
