//! Resolution of drawing options into a complete map configuration.
//!
//! Every option is optional. [`resolve`] applies the precedence
//! explicit value > value derived from a partial override > `NameData`
//! default, validates names and numbers, and returns a [`MapConfig`]. It has
//! no side effects, so the whole decision table can be tested without a
//! rendering backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{NamePlotError, Result};
use crate::geo::{axis_ticks, Bounds, Projection};
use crate::map::BaseStyle;
use crate::name_data::NameData;
use crate::style::{Color, ColormapName};

/// Font size used for the caption and tick labels
pub const FONT_SIZE: u32 = 8;

/// Institutional logos and their horizontal pixel offsets
pub const LOGOS: [(&str, u32); 3] = [
    ("MO_cropped.png", 250),
    ("CEDA.png", 700),
    ("UoL.png", 1150),
];

/// A number that may be written as a JSON number or as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// Numeric value
    Number(f64),
    /// Text to be parsed as a number
    Text(String),
}

impl Numeric {
    /// Parse to a floating point number
    pub fn to_f64(&self, param: &str) -> Result<f64> {
        match self {
            Numeric::Number(value) => Ok(*value),
            Numeric::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                NamePlotError::invalid(param, format!("'{}' is not a number", text))
            }),
        }
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Number(value)
    }
}

impl From<&str> for Numeric {
    fn from(text: &str) -> Self {
        Numeric::Text(text.to_string())
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Number(value) => write!(f, "{}", value),
            Numeric::Text(text) => f.write_str(text),
        }
    }
}

/// Optional parameters for drawing a footprint map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Projection code; the backend's default when absent
    #[serde(default)]
    pub projection: Option<String>,

    /// Longitude extent override
    #[serde(default)]
    pub lon_bounds: Option<Bounds>,

    /// Latitude extent override
    #[serde(default)]
    pub lat_bounds: Option<Bounds>,

    /// Longitude tick positions; only used together with `lat_axis`
    #[serde(default)]
    pub lon_axis: Vec<Numeric>,

    /// Latitude tick positions; only used together with `lon_axis`
    #[serde(default)]
    pub lat_axis: Vec<Numeric>,

    /// Fixed colour scale range
    #[serde(default)]
    pub scale: Option<Bounds>,

    /// Derive the colour scale from the data when no fixed scale is given
    #[serde(default = "default_true")]
    pub autoscale: bool,

    /// Caption; the grid's caption when absent
    #[serde(default)]
    pub caption: Option<String>,

    /// Render in a single colour instead of a colour-mapped mesh
    #[serde(default)]
    pub solid: bool,

    /// Colour for solid rendering
    #[serde(default, alias = "color1")]
    pub solid_color: Option<String>,

    /// Colormap name for mesh rendering
    #[serde(default)]
    pub colormap: Option<String>,

    /// Station location as (longitude, latitude)
    #[serde(default)]
    pub station: Option<(Numeric, Numeric)>,

    /// Directory the image is written to, created if missing
    #[serde(default)]
    pub outdir: Option<PathBuf>,

    /// Output file name; the backend's naming scheme when absent
    #[serde(default)]
    pub outfile: Option<String>,

    /// Overlay the institutional logos
    #[serde(default = "default_true")]
    pub logos: bool,

    /// Directory holding the logo images
    #[serde(default)]
    pub logo_dir: Option<PathBuf>,

    /// Map frame colour
    #[serde(default = "default_border_col", alias = "boarder_col")]
    pub border_col: String,

    /// Sea colour
    #[serde(default = "default_sea_col")]
    pub sea_col: String,

    /// Land colour
    #[serde(default = "default_land_col")]
    pub land_col: String,

    /// Grid line colour
    #[serde(default = "default_grid_col")]
    pub grid_col: String,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            projection: None,
            lon_bounds: None,
            lat_bounds: None,
            lon_axis: Vec::new(),
            lat_axis: Vec::new(),
            scale: None,
            autoscale: true,
            caption: None,
            solid: false,
            solid_color: None,
            colormap: None,
            station: None,
            outdir: None,
            outfile: None,
            logos: true,
            logo_dir: None,
            border_col: default_border_col(),
            sea_col: default_sea_col(),
            land_col: default_land_col(),
            grid_col: default_grid_col(),
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_border_col() -> String {
    "black".to_string()
}

fn default_sea_col() -> String {
    "white".to_string()
}

fn default_land_col() -> String {
    "#D1D1D1".to_string()
}

fn default_grid_col() -> String {
    "black".to_string()
}

/// Logo directory shipped with the package
pub fn default_logo_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("logos")
}

/// How the colour scale is set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleMode {
    /// Caller-fixed range
    Fixed(Bounds),
    /// Range derived from the data
    Auto,
    /// No scale call; the backend's default applies
    BackendDefault,
}

/// How the data layer is drawn
#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    /// Single-colour fill; `None` uses the backend's solid colour
    Solid { color: Option<Color> },
    /// Mesh with the named colormap
    Colormap(ColormapName),
    /// Mesh with the backend's default colormap
    DefaultMesh,
}

/// A logo image and where it goes
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    pub path: PathBuf,
    pub x_offset: u32,
}

/// Fully resolved configuration for one render
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub projection: Option<Projection>,
    pub lon_bounds: Bounds,
    pub lat_bounds: Bounds,
    pub lon_ticks: Vec<f64>,
    pub lat_ticks: Vec<f64>,
    pub scale: ScaleMode,
    pub base: BaseStyle,
    pub render: RenderMode,
    pub marker: Option<(f64, f64)>,
    pub logos: Vec<Logo>,
    pub output_dir: Option<PathBuf>,
    pub output_file: Option<String>,
}

/// Resolve `options` against the defaults carried by `name`
pub fn resolve(name: &NameData, options: &DrawOptions) -> Result<MapConfig> {
    let projection = non_empty(&options.projection)
        .map(Projection::from_str)
        .transpose()?;

    if let Some(bounds) = &options.lon_bounds {
        bounds.validate_longitude("lon_bounds")?;
    }
    if let Some(bounds) = &options.lat_bounds {
        bounds.validate_latitude("lat_bounds")?;
    }
    let lon_bounds = options.lon_bounds.unwrap_or(name.lon_bounds);
    let lat_bounds = options.lat_bounds.unwrap_or(name.lat_bounds);

    let (lon_ticks, lat_ticks) = resolve_ticks(name, options, lon_bounds, lat_bounds)?;

    let scale = match options.scale {
        Some(scale) => {
            if !(scale.min < scale.max) {
                return Err(NamePlotError::invalid(
                    "scale",
                    format!("min ({}) must be < max ({})", scale.min, scale.max),
                ));
            }
            ScaleMode::Fixed(scale)
        }
        None if options.autoscale => ScaleMode::Auto,
        None => ScaleMode::BackendDefault,
    };

    let base = BaseStyle {
        caption: non_empty(&options.caption)
            .unwrap_or(&name.caption)
            .to_string(),
        font_size: FONT_SIZE,
        border: Color::parse_for("border_col", &options.border_col)?,
        sea: Color::parse_for("sea_col", &options.sea_col)?,
        land: Color::parse_for("land_col", &options.land_col)?,
        grid: Color::parse_for("grid_col", &options.grid_col)?,
    };

    let render = if options.solid {
        let color = non_empty(&options.solid_color)
            .map(|c| Color::parse_for("solid_color", c))
            .transpose()?;
        RenderMode::Solid { color }
    } else if let Some(colormap) = non_empty(&options.colormap) {
        RenderMode::Colormap(ColormapName::from_str(colormap)?)
    } else {
        RenderMode::DefaultMesh
    };

    let marker = match &options.station {
        Some((lon, lat)) => Some((lon.to_f64("station")?, lat.to_f64("station")?)),
        None => None,
    };

    let logos = if options.logos {
        let dir = options.logo_dir.clone().unwrap_or_else(default_logo_dir);
        LOGOS
            .iter()
            .map(|(file, x_offset)| Logo {
                path: dir.join(file),
                x_offset: *x_offset,
            })
            .collect()
    } else {
        Vec::new()
    };

    let output_dir = options
        .outdir
        .as_ref()
        .filter(|dir| !dir.as_os_str().is_empty())
        .cloned();
    let output_file = non_empty(&options.outfile).map(str::to_string);

    let config = MapConfig {
        projection,
        lon_bounds,
        lat_bounds,
        lon_ticks,
        lat_ticks,
        scale,
        base,
        render,
        marker,
        logos,
        output_dir,
        output_file,
    };

    debug!(
        projection = ?config.projection,
        lon_bounds = ?config.lon_bounds,
        lat_bounds = ?config.lat_bounds,
        scale = ?config.scale,
        render = ?config.render,
        "Map configuration resolved"
    );

    Ok(config)
}

/// Pick tick positions consistent with the resolved bounds
fn resolve_ticks(
    name: &NameData,
    options: &DrawOptions,
    lon_bounds: Bounds,
    lat_bounds: Bounds,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let has_lon_axis = !options.lon_axis.is_empty();
    let has_lat_axis = !options.lat_axis.is_empty();

    if has_lon_axis && has_lat_axis {
        return Ok((
            parse_numbers("lon_axis", &options.lon_axis)?,
            parse_numbers("lat_axis", &options.lat_axis)?,
        ));
    }

    if has_lon_axis || has_lat_axis {
        warn!("Tick positions were given for only one axis and will be ignored");
    }

    if options.lon_bounds.is_some() || options.lat_bounds.is_some() {
        // Bounds have moved, so the overridden axes need fresh ticks
        let lon = match options.lon_bounds {
            Some(_) => axis_ticks(lon_bounds),
            None => name.lon_grid.clone(),
        };
        let lat = match options.lat_bounds {
            Some(_) => axis_ticks(lat_bounds),
            None => name.lat_grid.clone(),
        };
        return Ok((lon, lat));
    }

    Ok((name.lon_grid.clone(), name.lat_grid.clone()))
}

fn parse_numbers(param: &str, values: &[Numeric]) -> Result<Vec<f64>> {
    values.iter().map(|v| v.to_f64(param)).collect()
}

/// Treat empty strings like absent values
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
