//! NAME output held in memory.
//!
//! `NameData` is the source grid a footprint map is drawn from. It is immutable
//! once loaded and carries the defaults (bounds, tick grids, caption) that the
//! map configuration falls back on. Parsing NAME's own text output is left to
//! upstream tooling; this module reads a JSON export of the grid.

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{NamePlotError, Result};
use crate::geo::{axis_ticks, Bounds};

/// A named data field of the grid (a concentration or other quantity)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Column(String);

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Gridded NAME output plus the plotting defaults derived from it
#[derive(Debug, Clone)]
pub struct NameData {
    /// Default caption for maps of this data
    pub caption: String,
    /// Default longitude extent
    pub lon_bounds: Bounds,
    /// Default latitude extent
    pub lat_bounds: Bounds,
    /// Default longitude tick positions
    pub lon_grid: Vec<f64>,
    /// Default latitude tick positions
    pub lat_grid: Vec<f64>,
    /// Cell centre longitudes, ascending
    pub longitudes: Vec<f64>,
    /// Cell centre latitudes, ascending
    pub latitudes: Vec<f64>,
    /// Data columns, shaped (latitudes, longitudes)
    pub columns: HashMap<String, Array2<f32>>,
}

impl NameData {
    /// Create NameData from coordinates and columns, deriving bounds and tick
    /// grids from the coordinate extent.
    pub fn new(
        caption: impl Into<String>,
        longitudes: Vec<f64>,
        latitudes: Vec<f64>,
        columns: HashMap<String, Array2<f32>>,
    ) -> Result<Self> {
        let lon_bounds = cell_extent("longitudes", &longitudes)?;
        let lat_bounds = cell_extent("latitudes", &latitudes)?;
        let lat_bounds = Bounds::new(lat_bounds.min.max(-90.0), lat_bounds.max.min(90.0));
        let data = Self {
            caption: caption.into(),
            lon_bounds,
            lat_bounds,
            lon_grid: axis_ticks(lon_bounds),
            lat_grid: axis_ticks(lat_bounds),
            longitudes,
            latitudes,
            columns,
        };
        data.validate()?;
        Ok(data)
    }

    /// Replace the default bounds; the tick grids are left untouched
    pub fn with_bounds(mut self, lon_bounds: Bounds, lat_bounds: Bounds) -> Self {
        self.lon_bounds = lon_bounds;
        self.lat_bounds = lat_bounds;
        self
    }

    /// Replace the default tick grids
    pub fn with_grids(mut self, lon_grid: Vec<f64>, lat_grid: Vec<f64>) -> Self {
        self.lon_grid = lon_grid;
        self.lat_grid = lat_grid;
        self
    }

    /// Check if a column exists
    pub fn has_column(&self, column: &Column) -> bool {
        self.columns.contains_key(column.name())
    }

    /// Get a column's values with error handling
    pub fn column(&self, column: &Column) -> Result<ArrayView2<'_, f32>> {
        self.columns
            .get(column.name())
            .map(|values| values.view())
            .ok_or_else(|| NamePlotError::DataNotFound {
                message: format!(
                    "Column not found: {}. Available columns: {}",
                    column,
                    self.column_names().join(", ")
                ),
            })
    }

    /// Column names in sorted order
    pub fn column_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validate that coordinates and columns are consistent
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(NamePlotError::DataNotFound {
                message: "No data columns found in the grid".to_string(),
            });
        }

        let expected = (self.latitudes.len(), self.longitudes.len());
        for (name, values) in &self.columns {
            if values.dim() != expected {
                return Err(NamePlotError::Configuration {
                    message: format!(
                        "Column {} has shape {:?} but the grid is {} latitudes x {} longitudes",
                        name,
                        values.dim(),
                        expected.0,
                        expected.1
                    ),
                });
            }
        }

        self.lon_bounds.validate_longitude("lon_bounds")?;
        self.lat_bounds.validate_latitude("lat_bounds")?;
        Ok(())
    }
}

/// On-disk layout of a grid export
#[derive(Debug, Deserialize)]
struct GridFile {
    #[serde(default)]
    caption: String,
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
    columns: HashMap<String, Vec<Vec<f32>>>,
    #[serde(default)]
    lon_bounds: Option<Bounds>,
    #[serde(default)]
    lat_bounds: Option<Bounds>,
    #[serde(default)]
    lon_grid: Option<Vec<f64>>,
    #[serde(default)]
    lat_grid: Option<Vec<f64>>,
}

/// Load a JSON grid export into memory
pub fn load_name_data(path: &Path) -> Result<NameData> {
    let content =
        std::fs::read_to_string(path).map_err(|e| NamePlotError::resource(path, e))?;
    let data = parse_name_data(&content)?;

    info!(
        file_path = %path.display(),
        columns = %data.column_names().join(", "),
        lon_cells = data.longitudes.len(),
        lat_cells = data.latitudes.len(),
        "Grid loaded"
    );
    Ok(data)
}

/// Parse a JSON grid export
pub fn parse_name_data(content: &str) -> Result<NameData> {
    let grid: GridFile = serde_json::from_str(content)?;

    let rows = grid.latitudes.len();
    let cols = grid.longitudes.len();

    let mut columns = HashMap::with_capacity(grid.columns.len());
    for (name, values) in grid.columns {
        let array = to_array(&name, values, rows, cols)?;
        debug!(column = %name, shape = ?array.dim(), "Converted column");
        columns.insert(name, array);
    }

    let mut data = NameData::new(grid.caption, grid.longitudes, grid.latitudes, columns)?;

    if let Some(bounds) = grid.lon_bounds {
        data.lon_bounds = bounds;
        if grid.lon_grid.is_none() {
            data.lon_grid = axis_ticks(bounds);
        }
    }
    if let Some(bounds) = grid.lat_bounds {
        data.lat_bounds = bounds;
        if grid.lat_grid.is_none() {
            data.lat_grid = axis_ticks(bounds);
        }
    }
    if let Some(ticks) = grid.lon_grid {
        data.lon_grid = ticks;
    }
    if let Some(ticks) = grid.lat_grid {
        data.lat_grid = ticks;
    }

    data.validate()?;
    Ok(data)
}

fn to_array(name: &str, values: Vec<Vec<f32>>, rows: usize, cols: usize) -> Result<Array2<f32>> {
    if values.len() != rows || values.iter().any(|row| row.len() != cols) {
        return Err(NamePlotError::Configuration {
            message: format!(
                "Column {} must have {} rows of {} values (one row per latitude)",
                name, rows, cols
            ),
        });
    }

    let flat: Vec<f32> = values.into_iter().flatten().collect();
    Array2::from_shape_vec((rows, cols), flat).map_err(|e| NamePlotError::Configuration {
        message: format!("Column {} has an invalid shape: {}", name, e),
    })
}

/// Extent covered by cells centred on `coords`, extended half a cell each side
fn cell_extent(param: &str, coords: &[f64]) -> Result<Bounds> {
    if coords.is_empty() {
        return Err(NamePlotError::invalid(param, "Coordinate array is empty"));
    }
    if coords.windows(2).any(|w| w[1] <= w[0]) {
        return Err(NamePlotError::invalid(
            param,
            "Coordinates must be strictly ascending",
        ));
    }

    let first = coords[0];
    let last = coords[coords.len() - 1];
    let half = if coords.len() > 1 {
        (last - first) / (coords.len() - 1) as f64 / 2.0
    } else {
        0.5
    };
    Ok(Bounds::new(first - half, last + half))
}
