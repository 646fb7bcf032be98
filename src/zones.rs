//! Zone overlays.
//!
//! A zone list is a text file pairing a shapefile with a fill colour, one
//! zone per line:
//!
//! ```text
//! zones/north.shp, red
//! zones/south.shp, blue
//! ```
//!
//! Only lines containing a comma are records. Each record is split on its
//! first comma and both halves are trimmed, so a filename that itself
//! contains a comma is split at the wrong place.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{NamePlotError, Result};
use crate::map::FootprintMap;
use crate::style::Color;

/// One zone: a boundary shapefile and the colour it is filled with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSpec {
    pub file: PathBuf,
    pub color: String,
}

/// Ordered list of zones read from a zone list file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneList {
    zones: Vec<ZoneSpec>,
}

impl ZoneList {
    /// Parse zone records from any line reader
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut zones = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if let Some((file, color)) = line.split_once(',') {
                zones.push(ZoneSpec {
                    file: PathBuf::from(file.trim()),
                    color: color.trim().to_string(),
                });
            }
        }
        Ok(Self { zones })
    }

    /// Read a zone list file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| NamePlotError::resource(path, e))?;
        let list = Self::parse(BufReader::new(file)).map_err(|e| match e {
            NamePlotError::Io(source) => NamePlotError::resource(path, source),
            other => other,
        })?;

        debug!(
            file_path = %path.display(),
            zones = list.len(),
            "Zone list loaded"
        );
        Ok(list)
    }

    pub fn zones(&self) -> &[ZoneSpec] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Shapefiles in file order
    pub fn files(&self) -> Vec<PathBuf> {
        self.zones.iter().map(|z| z.file.clone()).collect()
    }

    /// Validated fill colours in file order
    pub fn colors(&self) -> Result<Vec<Color>> {
        self.zones
            .iter()
            .map(|zone| {
                Color::parse_for("zone colour", &zone.color).map_err(|e| {
                    NamePlotError::Configuration {
                        message: format!("Zone {}: {}", zone.file.display(), e),
                    }
                })
            })
            .collect()
    }
}

/// Where zones come from and which layers to draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneOptions {
    /// Path to the zone list file
    pub list: PathBuf,

    /// Draw zone boundary lines
    #[serde(default = "default_true")]
    pub lines: bool,

    /// Fill zones with their colours
    #[serde(default = "default_true")]
    pub colours: bool,
}

fn default_true() -> bool {
    true
}

/// Draw the zones on an already-configured map.
///
/// Colours are validated before the map is touched.
pub fn overlay_zones<M: FootprintMap + ?Sized>(
    map: &mut M,
    zones: &ZoneList,
    lines: bool,
    colours: bool,
) -> Result<()> {
    let colors = if colours { zones.colors()? } else { Vec::new() };

    map.zone_load(&zones.files())?;

    if lines {
        info!("Plotting zone lines...");
        map.zone_lines()?;
    }

    if colours {
        info!("Plotting zone colours...");
        map.zone_colours(&colors)?;
    }

    Ok(())
}
