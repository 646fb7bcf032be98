//! # nameplot
//!
//! Footprint maps from NAME atmospheric dispersion output.
//!
//! This library turns a gridded NAME result into a saved map image. Callers
//! pick a data column and may override any part of the map (extent, tick
//! marks, colour scale, styling, station marker, logos, output location);
//! everything they leave out falls back to defaults carried by the grid.
//!
//! ## Architecture
//!
//! - **Data Layer**: [`NameData`] holds the grid and its plotting defaults
//! - **Resolution**: [`resolve()`] turns [`DrawOptions`] into a complete
//!   [`MapConfig`] without side effects
//! - **Drawing**: [`draw_map`] and [`draw_shape_map`] drive a
//!   [`FootprintMap`] backend through setup, overlay, save and release
//! - **Backends**: [`RasterMap`] renders a plate carrée preview PNG

pub mod config;
pub mod draw;
pub mod error;
pub mod geo;
pub mod logging;
pub mod map;
pub mod name_data;
pub mod resolve;
pub mod style;
pub mod zones;

pub use config::{Config, PlotTarget};
pub use draw::{configure_map, draw_map, draw_shape_map};
pub use error::{ErrorKind, NamePlotError, Result};
pub use geo::{axis_ticks, Bounds, Projection};
pub use logging::{init_tracing, log_error, log_timed_operation};
pub use map::{BaseStyle, FootprintMap, MapGuard, RasterMap};
pub use name_data::{load_name_data, Column, NameData};
pub use resolve::{resolve, DrawOptions, MapConfig, RenderMode, ScaleMode};
pub use zones::{overlay_zones, ZoneList, ZoneOptions, ZoneSpec};
