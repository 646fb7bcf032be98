//! nameplot - footprint maps from NAME output
//!
//! This is the main entry point for the nameplot application.

use anyhow::Context;
use std::time::Instant;
use tracing::info;

use nameplot::logging::{log_operation_end, log_operation_start};
use nameplot::{
    draw_map, draw_shape_map, init_tracing, load_name_data, log_error, Config, NamePlotError,
    RasterMap,
};

fn main() -> anyhow::Result<()> {
    let (config, target) = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.log_level);
    info!("Starting nameplot v{}", env!("CARGO_PKG_VERSION"));

    run(&config, &target).map_err(|e| {
        log_error(&e, "render");
        e
    })?;

    Ok(())
}

fn run(config: &Config, target: &nameplot::PlotTarget) -> Result<(), NamePlotError> {
    let start = Instant::now();
    let grid_file = target.grid_file.display().to_string();
    log_operation_start("load", Some(grid_file.as_str()));
    let name = load_name_data(&target.grid_file);
    log_operation_end("load", start, name.is_ok());
    let name = name?;

    let map = RasterMap::new(&name, &target.column)?;

    let path = match &config.zones {
        Some(zones) => draw_shape_map(
            map,
            &name,
            &target.column,
            &config.plot,
            &zones.list,
            zones.lines,
            zones.colours,
        )?,
        None => draw_map(map, &name, &target.column, &config.plot)?,
    };

    println!("{}", path.display());
    Ok(())
}
