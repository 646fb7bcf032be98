//! Validated styling inputs: colour names and colormap names.
//!
//! Colour and colormap names arrive as free-form strings from configuration
//! files. They are checked here, when the map configuration is resolved, so an
//! unknown name fails before any drawing starts.

pub mod color;
pub mod colormap;

pub use color::Color;
pub use colormap::{get_colormap, Colormap, ColormapName};
