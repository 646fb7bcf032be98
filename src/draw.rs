//! Drawing footprint maps.
//!
//! [`draw_map`] turns a grid, a column and a set of [`DrawOptions`] into one
//! saved image. It resolves the options, drives the map through its setup
//! calls in a fixed order, saves, and releases the map. [`draw_shape_map`]
//! does the same with a zone overlay applied between setup and save.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{NamePlotError, Result};
use crate::logging::log_timed_operation;
use crate::map::{FootprintMap, MapGuard};
use crate::name_data::{Column, NameData};
use crate::resolve::{resolve, DrawOptions, MapConfig, RenderMode, ScaleMode};
use crate::zones::{overlay_zones, ZoneList};

/// Apply a resolved configuration to a map.
///
/// Calls are made in this order: projection, bounds, axes, scale, base layer,
/// data layer, station marker, logos, output directory. The output directory
/// is created if it does not exist.
pub fn configure_map<M: FootprintMap + ?Sized>(
    map: &mut M,
    config: &MapConfig,
    column: &Column,
) -> Result<()> {
    if let Some(projection) = config.projection {
        map.set_projection(projection)?;
    }

    map.set_bounds(config.lon_bounds, config.lat_bounds)?;
    map.set_axes(&config.lon_ticks, &config.lat_ticks)?;

    match config.scale {
        ScaleMode::Fixed(scale) => map.set_fixed_scale(scale)?,
        ScaleMode::Auto => map.set_auto_scale(column)?,
        ScaleMode::BackendDefault => debug!("Leaving the colour scale at the map default"),
    }

    map.draw_base(&config.base)?;

    match &config.render {
        RenderMode::Solid { color } => map.draw_solid(column, color.as_ref())?,
        RenderMode::Colormap(colormap) => {
            map.set_colormap(*colormap)?;
            map.draw_mesh(column)?;
        }
        RenderMode::DefaultMesh => map.draw_mesh(column)?,
    }

    if let Some((lon, lat)) = config.marker {
        map.add_marker(lon, lat)?;
    }

    for logo in &config.logos {
        map.add_logo(&logo.path, logo.x_offset)?;
    }

    if let Some(dir) = &config.output_dir {
        ensure_output_dir(dir)?;
        map.set_output_dir(dir);
    }

    Ok(())
}

/// Draw and save a footprint map, returning the path written.
///
/// The map is released on every exit path, including errors.
pub fn draw_map<M: FootprintMap>(
    map: M,
    name: &NameData,
    column: &Column,
    options: &DrawOptions,
) -> Result<PathBuf> {
    render("draw_map", map, name, column, options, None)
}

/// Draw a footprint map with zones from `zone_list` overlaid, then save it.
///
/// `lines` draws the zone boundaries and `colours` fills each zone with the
/// colour from its list entry.
pub fn draw_shape_map<M: FootprintMap>(
    map: M,
    name: &NameData,
    column: &Column,
    options: &DrawOptions,
    zone_list: &Path,
    lines: bool,
    colours: bool,
) -> Result<PathBuf> {
    let overlay = ZoneOverlay {
        list: zone_list,
        lines,
        colours,
    };
    render("draw_shape_map", map, name, column, options, Some(overlay))
}

/// Zone layers requested for a render
struct ZoneOverlay<'a> {
    list: &'a Path,
    lines: bool,
    colours: bool,
}

fn render<M: FootprintMap>(
    operation: &str,
    map: M,
    name: &NameData,
    column: &Column,
    options: &DrawOptions,
    overlay: Option<ZoneOverlay<'_>>,
) -> Result<PathBuf> {
    log_timed_operation(operation, move || {
        let mut map = MapGuard::new(map);

        name.column(column)?;
        let config = resolve(name, options)?;

        // Read the zone list before anything is created on disk
        let zones = match &overlay {
            Some(overlay) => Some(ZoneList::load(overlay.list)?),
            None => None,
        };

        configure_map(&mut *map, &config, column)?;

        if let (Some(overlay), Some(zones)) = (&overlay, &zones) {
            info!(
                zone_list = %overlay.list.display(),
                zones = zones.len(),
                "Overlaying zones"
            );
            overlay_zones(&mut *map, zones, overlay.lines, overlay.colours)?;
        }

        let path = map.save_file(config.output_file.as_deref())?;
        map.release();

        info!(column = %column, path = %path.display(), "Map saved");
        Ok(path)
    })
}

fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        std::fs::create_dir_all(dir).map_err(|e| NamePlotError::resource(dir, e))?;
        debug!(dir = %dir.display(), "Created output directory");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_output_dir_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // Existing directories are left alone
        ensure_output_dir(&dir).unwrap();
    }

    #[test]
    fn test_ensure_output_dir_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        let err = ensure_output_dir(&file.join("sub")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Resource);
        assert!(err.to_string().contains("occupied"));
    }
}
