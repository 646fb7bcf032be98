//! A plate carrée raster backend.
//!
//! `RasterMap` draws footprints onto an RGBA canvas where pixel positions are a
//! linear scaling of longitude and latitude. It has no coastline data and no
//! text rendering, and it cannot read zone shapefiles: it exists so footprints
//! can be previewed without a full GIS stack. Colour ramps come from
//! `colorgrad`, compositing and PNG encoding from `image`.

use image::{imageops, ImageFormat, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{NamePlotError, Result};
use crate::geo::{Bounds, Projection};
use crate::map::{BaseStyle, FootprintMap};
use crate::name_data::{Column, NameData};
use crate::style::{get_colormap, Color, Colormap, ColormapName};

/// Canvas dimensions
pub const CANVAS_WIDTH: u32 = 1400;
pub const CANVAS_HEIGHT: u32 = 1100;

/// Plot area inside the canvas (left, top, right, bottom)
const PLOT_AREA: (u32, u32, u32, u32) = (100, 80, 1300, 880);

/// Gap between the bottom of a logo and the canvas edge
const LOGO_MARGIN: u32 = 20;

/// Figure background outside the plot area
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Default colormap for mesh rendering
pub const DEFAULT_COLORMAP: ColormapName = ColormapName::Viridis;

/// Default colour for solid rendering
pub const DEFAULT_SOLID_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Marker colour and half-size in pixels
const MARKER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const MARKER_RADIUS: i64 = 8;

/// Frame line thickness in pixels
const BORDER_WIDTH: u32 = 2;

/// Linear mapping between geographic coordinates and plot-area pixels
#[derive(Debug, Clone, Copy)]
struct Frame {
    lon: Bounds,
    lat: Bounds,
}

impl Frame {
    fn x(&self, lon: f64) -> f64 {
        let (left, _, right, _) = PLOT_AREA;
        left as f64 + (lon - self.lon.min) / self.lon.span() * (right - left) as f64
    }

    fn y(&self, lat: f64) -> f64 {
        let (_, top, _, bottom) = PLOT_AREA;
        bottom as f64 - (lat - self.lat.min) / self.lat.span() * (bottom - top) as f64
    }

    fn contains(&self, lon: f64, lat: f64) -> bool {
        self.lon.contains(lon) && self.lat.contains(lat)
    }
}

/// Raster footprint map for one column of a grid
pub struct RasterMap {
    column: Column,
    values: Array2<f32>,
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
    caption: String,
    lon_bounds: Bounds,
    lat_bounds: Bounds,
    lon_ticks: Vec<f64>,
    lat_ticks: Vec<f64>,
    scale: Option<Bounds>,
    colormap: Option<Colormap>,
    style: Option<BaseStyle>,
    canvas: Option<RgbaImage>,
    outdir: PathBuf,
    freed: bool,
}

impl RasterMap {
    /// Create a map of `column`, starting from the grid's own defaults
    pub fn new(name: &NameData, column: &Column) -> Result<Self> {
        let values = name.column(column)?.to_owned();
        debug!(column = %column, shape = ?values.dim(), "Created raster map");

        Ok(Self {
            column: column.clone(),
            values,
            longitudes: name.longitudes.clone(),
            latitudes: name.latitudes.clone(),
            caption: name.caption.clone(),
            lon_bounds: name.lon_bounds,
            lat_bounds: name.lat_bounds,
            lon_ticks: name.lon_grid.clone(),
            lat_ticks: name.lat_grid.clone(),
            scale: None,
            colormap: None,
            style: None,
            canvas: None,
            outdir: PathBuf::from("."),
            freed: false,
        })
    }

    /// The rendered canvas, once the base layer has been drawn
    pub fn canvas(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref()
    }

    /// Whether `free` has been called
    pub fn is_freed(&self) -> bool {
        self.freed
    }

    /// File name used when none is given: caption and column, slugified
    pub fn default_filename(&self) -> String {
        let caption = self
            .style
            .as_ref()
            .map(|s| s.caption.as_str())
            .unwrap_or(&self.caption);

        let caption = slugify(caption);
        let column = slugify(self.column.name());
        if caption.is_empty() {
            format!("{}.png", column)
        } else {
            format!("{}_{}.png", caption, column)
        }
    }

    fn frame(&self) -> Frame {
        Frame {
            lon: self.lon_bounds,
            lat: self.lat_bounds,
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.freed {
            return Err(NamePlotError::Render {
                message: "The map has been freed".to_string(),
            });
        }
        Ok(())
    }

    fn check_column(&self, column: &Column) -> Result<()> {
        self.ensure_live()?;
        if *column != self.column {
            return Err(NamePlotError::DataNotFound {
                message: format!(
                    "Map was created for column {} but {} was requested",
                    self.column, column
                ),
            });
        }
        Ok(())
    }

    /// Range of the finite, positive values in the column
    fn data_range(&self) -> Bounds {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for &val in self.values.iter() {
            let val = val as f64;
            if val.is_finite() && val > 0.0 {
                min = min.min(val);
                max = max.max(val);
            }
        }

        if !min.is_finite() || !max.is_finite() {
            Bounds::new(0.0, 1.0)
        } else {
            Bounds::new(min, max)
        }
    }

    /// Paint every cell holding data with the colour chosen by `paint`
    fn fill_cells<F>(&mut self, paint: F) -> Result<usize>
    where
        F: Fn(f64) -> Rgba<u8>,
    {
        let frame = self.frame();
        let half_lon = half_spacing(&self.longitudes);
        let half_lat = half_spacing(&self.latitudes);

        let canvas = self.canvas.as_mut().ok_or_else(|| NamePlotError::Render {
            message: "The base layer must be drawn before data".to_string(),
        })?;

        let mut painted = 0;
        for (row, &lat) in self.latitudes.iter().enumerate() {
            for (col, &lon) in self.longitudes.iter().enumerate() {
                let value = self.values[[row, col]] as f64;
                if !value.is_finite() || value <= 0.0 {
                    continue;
                }

                let x0 = frame.x(lon - half_lon);
                let x1 = frame.x(lon + half_lon);
                let y0 = frame.y(lat + half_lat);
                let y1 = frame.y(lat - half_lat);
                if fill_plot_rect(canvas, x0, y0, x1, y1, paint(value)) {
                    painted += 1;
                }
            }
        }

        Ok(painted)
    }
}

impl FootprintMap for RasterMap {
    fn set_projection(&mut self, projection: Projection) -> Result<()> {
        match projection {
            Projection::Cylindrical => Ok(()),
            other => Err(NamePlotError::Render {
                message: format!(
                    "The raster backend only draws the cylindrical projection, not '{}'",
                    other
                ),
            }),
        }
    }

    fn set_bounds(&mut self, lon: Bounds, lat: Bounds) -> Result<()> {
        lon.validate_longitude("lon_bounds")?;
        lat.validate_latitude("lat_bounds")?;
        self.lon_bounds = lon;
        self.lat_bounds = lat;
        Ok(())
    }

    fn set_axes(&mut self, lon_ticks: &[f64], lat_ticks: &[f64]) -> Result<()> {
        self.lon_ticks = lon_ticks.to_vec();
        self.lat_ticks = lat_ticks.to_vec();
        Ok(())
    }

    fn set_fixed_scale(&mut self, scale: Bounds) -> Result<()> {
        self.scale = Some(scale);
        Ok(())
    }

    fn set_auto_scale(&mut self, column: &Column) -> Result<()> {
        self.check_column(column)?;
        let range = self.data_range();
        debug!(min = range.min, max = range.max, "Auto scale");
        self.scale = Some(range);
        Ok(())
    }

    fn draw_base(&mut self, style: &BaseStyle) -> Result<()> {
        self.ensure_live()?;
        let frame = self.frame();
        let (left, top, right, bottom) = PLOT_AREA;

        let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
        fill_rect(&mut canvas, left, top, right, bottom, Rgba(style.sea.rgba()));

        let grid = Rgba(style.grid.rgba());
        for &lon in self.lon_ticks.iter().filter(|t| frame.lon.contains(**t)) {
            let x = frame.x(lon).round() as u32;
            fill_rect(&mut canvas, x, top, x + 1, bottom, grid);
        }
        for &lat in self.lat_ticks.iter().filter(|t| frame.lat.contains(**t)) {
            let y = frame.y(lat).round() as u32;
            fill_rect(&mut canvas, left, y, right, y + 1, grid);
        }

        let border = Rgba(style.border.rgba());
        fill_rect(&mut canvas, left, top, right, top + BORDER_WIDTH, border);
        fill_rect(&mut canvas, left, bottom - BORDER_WIDTH, right, bottom, border);
        fill_rect(&mut canvas, left, top, left + BORDER_WIDTH, bottom, border);
        fill_rect(&mut canvas, right - BORDER_WIDTH, top, right, bottom, border);

        debug!(
            caption = %style.caption,
            font_size = style.font_size,
            land = %style.land,
            "Base layer drawn (no coastline data; caption not rasterised)"
        );

        self.canvas = Some(canvas);
        self.style = Some(style.clone());
        Ok(())
    }

    fn draw_solid(&mut self, column: &Column, color: Option<&Color>) -> Result<()> {
        self.check_column(column)?;
        let fill = color.map(|c| Rgba(c.rgba())).unwrap_or(DEFAULT_SOLID_COLOR);
        let painted = self.fill_cells(|_| fill)?;
        debug!(cells = painted, "Solid footprint drawn");
        Ok(())
    }

    fn set_colormap(&mut self, colormap: ColormapName) -> Result<()> {
        self.colormap = Some(get_colormap(colormap));
        Ok(())
    }

    fn draw_mesh(&mut self, column: &Column) -> Result<()> {
        self.check_column(column)?;

        let scale = match self.scale {
            Some(scale) => scale,
            None => self.data_range(),
        };
        let colormap = self
            .colormap
            .take()
            .unwrap_or_else(|| get_colormap(DEFAULT_COLORMAP));

        let result = self.fill_cells(|value| Rgba(colormap.map(value, scale.min, scale.max)));
        self.colormap = Some(colormap);

        let painted = result?;
        debug!(cells = painted, min = scale.min, max = scale.max, "Mesh drawn");
        Ok(())
    }

    fn add_marker(&mut self, lon: f64, lat: f64) -> Result<()> {
        self.ensure_live()?;
        let frame = self.frame();
        let canvas = self.canvas.as_mut().ok_or_else(|| NamePlotError::Render {
            message: "The base layer must be drawn before markers".to_string(),
        })?;

        if !frame.contains(lon, lat) {
            warn!(lon = lon, lat = lat, "Station marker lies outside the map bounds");
            return Ok(());
        }

        let cx = frame.x(lon).round() as i64;
        let cy = frame.y(lat).round() as i64;
        for d in -MARKER_RADIUS..=MARKER_RADIUS {
            for w in -1..=1 {
                put_clipped(canvas, cx + d, cy + w, MARKER_COLOR);
                put_clipped(canvas, cx + w, cy + d, MARKER_COLOR);
            }
        }
        Ok(())
    }

    fn add_logo(&mut self, path: &Path, x_offset: u32) -> Result<()> {
        let canvas = self.canvas.as_mut().ok_or_else(|| NamePlotError::Render {
            message: "The base layer must be drawn before logos".to_string(),
        })?;

        let logo = image::open(path)
            .map_err(|e| match e {
                image::ImageError::IoError(source) => NamePlotError::resource(path, source),
                other => NamePlotError::Render {
                    message: format!("Failed to decode logo {}: {}", path.display(), other),
                },
            })?
            .to_rgba8();

        let y = CANVAS_HEIGHT.saturating_sub(LOGO_MARGIN + logo.height());
        imageops::overlay(canvas, &logo, x_offset as i64, y as i64);
        debug!(logo = %path.display(), x = x_offset, y = y, "Logo added");
        Ok(())
    }

    fn set_output_dir(&mut self, dir: &Path) {
        self.outdir = dir.to_path_buf();
    }

    fn zone_load(&mut self, _files: &[PathBuf]) -> Result<()> {
        Err(unsupported_zones())
    }

    fn zone_lines(&mut self) -> Result<()> {
        Err(unsupported_zones())
    }

    fn zone_colours(&mut self, _colors: &[Color]) -> Result<()> {
        Err(unsupported_zones())
    }

    fn save_file(&mut self, filename: Option<&str>) -> Result<PathBuf> {
        let mut path = match filename {
            Some(name) => self.outdir.join(name),
            None => self.outdir.join(self.default_filename()),
        };
        if path.extension().is_none() {
            path.set_extension("png");
        }

        let canvas = self.canvas.as_ref().ok_or_else(|| NamePlotError::Render {
            message: "Nothing has been drawn".to_string(),
        })?;

        canvas.save_with_format(&path, ImageFormat::Png).map_err(|e| match e {
            image::ImageError::IoError(source) => NamePlotError::resource(&path, source),
            other => NamePlotError::Image(other),
        })?;

        debug!(path = %path.display(), "Map saved");
        Ok(path)
    }

    fn free(&mut self) {
        self.canvas = None;
        self.colormap = None;
        self.values = Array2::zeros((0, 0));
        self.longitudes.clear();
        self.latitudes.clear();
        self.freed = true;
    }
}

fn unsupported_zones() -> NamePlotError {
    NamePlotError::Render {
        message: "The raster backend cannot read zone shapefiles".to_string(),
    }
}

/// Half the spacing of evenly spaced cell centres
fn half_spacing(coords: &[f64]) -> f64 {
    if coords.len() > 1 {
        (coords[coords.len() - 1] - coords[0]) / (coords.len() - 1) as f64 / 2.0
    } else {
        0.5
    }
}

/// Fill a pixel rectangle given in fractional coordinates, clipped to the
/// plot area. Returns whether any pixel was painted.
fn fill_plot_rect(
    canvas: &mut RgbaImage,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Rgba<u8>,
) -> bool {
    let (left, top, right, bottom) = PLOT_AREA;
    let x0 = x0.floor().max(left as f64) as u32;
    let x1 = x1.ceil().min(right as f64).max(left as f64) as u32;
    let y0 = y0.floor().max(top as f64) as u32;
    let y1 = y1.ceil().min(bottom as f64).max(top as f64) as u32;

    if x0 >= x1 || y0 >= y1 {
        return false;
    }
    fill_rect(canvas, x0, y0, x1, y1, color);
    true
}

/// Fill the half-open pixel rectangle [x0, x1) x [y0, y1)
fn fill_rect(canvas: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    let x1 = x1.min(canvas.width());
    let y1 = y1.min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

fn put_clipped(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Lowercase, with runs of anything but ASCII alphanumerics collapsed to `_`
fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_end_matches('_').to_string()
}
