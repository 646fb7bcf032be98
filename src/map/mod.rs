//! The mapping capability.
//!
//! Drawing a footprint map is delegated to an implementation of
//! [`FootprintMap`]. The configurator only decides which calls to make and in
//! which order; projection, colour evaluation and image encoding live behind
//! this trait.

pub mod raster;

use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::geo::{Bounds, Projection};
use crate::name_data::Column;
use crate::style::{Color, ColormapName};

pub use raster::RasterMap;

/// Styling for the base layer of a map
#[derive(Debug, Clone, PartialEq)]
pub struct BaseStyle {
    /// Caption drawn above the map
    pub caption: String,
    /// Caption and tick label font size
    pub font_size: u32,
    /// Map frame colour
    pub border: Color,
    /// Sea fill colour
    pub sea: Color,
    /// Land fill colour
    pub land: Color,
    /// Grid line colour
    pub grid: Color,
}

/// Operations a map-drawing backend provides
pub trait FootprintMap {
    /// Switch away from the backend's default projection
    fn set_projection(&mut self, projection: Projection) -> Result<()>;

    /// Set the visible longitude and latitude extent
    fn set_bounds(&mut self, lon: Bounds, lat: Bounds) -> Result<()>;

    /// Set the tick positions for both axes
    fn set_axes(&mut self, lon_ticks: &[f64], lat_ticks: &[f64]) -> Result<()>;

    /// Use a caller-fixed colour scale range
    fn set_fixed_scale(&mut self, scale: Bounds) -> Result<()>;

    /// Derive the colour scale range from the column's values
    fn set_auto_scale(&mut self, column: &Column) -> Result<()>;

    /// Draw the base layer (sea, land, frame, grid, caption)
    fn draw_base(&mut self, style: &BaseStyle) -> Result<()>;

    /// Fill every cell with data in a single colour; `None` uses the
    /// backend's default solid colour
    fn draw_solid(&mut self, column: &Column, color: Option<&Color>) -> Result<()>;

    /// Select the colormap for mesh rendering
    fn set_colormap(&mut self, colormap: ColormapName) -> Result<()>;

    /// Render the column as a continuous colour-mapped mesh, with the
    /// backend's default colormap unless one was selected
    fn draw_mesh(&mut self, column: &Column) -> Result<()>;

    /// Add a point marker at a station location
    fn add_marker(&mut self, lon: f64, lat: f64) -> Result<()>;

    /// Composite a logo image at a horizontal pixel offset
    fn add_logo(&mut self, path: &Path, x_offset: u32) -> Result<()>;

    /// Directory the map is saved into
    fn set_output_dir(&mut self, dir: &Path);

    /// Load zone boundary shapes, in draw order
    fn zone_load(&mut self, files: &[PathBuf]) -> Result<()>;

    /// Draw the boundary lines of the loaded zones
    fn zone_lines(&mut self) -> Result<()>;

    /// Fill the loaded zones; colours match zones by position
    fn zone_colours(&mut self, colors: &[Color]) -> Result<()>;

    /// Write the image, using the backend's naming scheme when `filename` is
    /// `None`. Returns the path written.
    fn save_file(&mut self, filename: Option<&str>) -> Result<PathBuf>;

    /// Release everything the map holds
    fn free(&mut self);
}

/// Owns a map and frees it when dropped.
///
/// Every exit path of a render, including early returns on error, goes
/// through `Drop`, so the map is always released exactly once.
pub struct MapGuard<M: FootprintMap> {
    map: M,
    released: bool,
}

impl<M: FootprintMap> MapGuard<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            released: false,
        }
    }

    /// Free the map now instead of at the end of scope
    pub fn release(mut self) {
        self.free_once();
    }

    fn free_once(&mut self) {
        if !self.released {
            self.released = true;
            self.map.free();
            debug!("Map released");
        }
    }
}

impl<M: FootprintMap> Deref for MapGuard<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.map
    }
}

impl<M: FootprintMap> DerefMut for MapGuard<M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.map
    }
}

impl<M: FootprintMap> Drop for MapGuard<M> {
    fn drop(&mut self) {
        self.free_once();
    }
}
