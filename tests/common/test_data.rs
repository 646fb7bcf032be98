//! Test data generation utilities.
//!
//! This module provides grids with known values and plotting defaults, plus
//! helpers that write grid exports, zone lists and logo images into a
//! temporary directory.

use image::Rgba;
use ndarray::Array2;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use nameplot::{Bounds, NameData};

use super::image_utils::write_solid_png;

/// Column present in every fixture grid
pub const COLUMN: &str = "total";

/// Colour of the fixture logos
pub const LOGO_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// A 4x4 grid over (-10, 10) x (40, 60) with the defaults
/// lon_grid = [-10, 0, 10] and lat_grid = [40, 50, 60].
///
/// Values rise from 1e-9 in the south-west cell to 1.6e-8 in the north-east;
/// the south-west cell is zero.
pub fn sample_name_data() -> NameData {
    let longitudes = vec![-7.5, -2.5, 2.5, 7.5];
    let latitudes = vec![42.5, 47.5, 52.5, 57.5];

    let mut values = Array2::<f32>::zeros((4, 4));
    for ((row, col), value) in values.indexed_iter_mut() {
        *value = (row * 4 + col) as f32 * 1e-9;
    }

    let mut columns = HashMap::new();
    columns.insert(COLUMN.to_string(), values);

    NameData::new("Sample footprint", longitudes, latitudes, columns)
        .unwrap()
        .with_bounds(Bounds::new(-10.0, 10.0), Bounds::new(40.0, 60.0))
        .with_grids(vec![-10.0, 0.0, 10.0], vec![40.0, 50.0, 60.0])
}

/// Write the sample grid as a JSON export and return its path
pub fn write_grid_file(dir: &Path) -> PathBuf {
    let json = serde_json::json!({
        "caption": "Sample footprint",
        "longitudes": [-7.5, -2.5, 2.5, 7.5],
        "latitudes": [42.5, 47.5, 52.5, 57.5],
        "columns": {
            "total": [
                [0.0, 1e-9, 2e-9, 3e-9],
                [4e-9, 5e-9, 6e-9, 7e-9],
                [8e-9, 9e-9, 1e-8, 1.1e-8],
                [1.2e-8, 1.3e-8, 1.4e-8, 1.5e-8]
            ]
        },
        "lon_grid": [-10.0, 0.0, 10.0],
        "lat_grid": [40.0, 50.0, 60.0]
    });

    let path = dir.join("grid.json");
    std::fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();
    path
}

/// Write a zone list file and return its path
pub fn write_zone_list(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("zones.txt");
    std::fs::write(&path, content).unwrap();
    path
}

/// Write the three logo images into `dir`
pub fn write_logos(dir: &Path) {
    for file in ["MO_cropped.png", "CEDA.png", "UoL.png"] {
        write_solid_png(&dir.join(file), 40, 20, LOGO_COLOR);
    }
}
