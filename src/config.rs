//! Configuration management for nameplot.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{NamePlotError, Result};
use crate::name_data::Column;
use crate::resolve::DrawOptions;
use crate::zones::ZoneOptions;

/// Command-line arguments for nameplot
#[derive(Parser, Debug)]
#[command(name = "nameplot")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON grid export to plot
    pub grid_file: PathBuf,

    /// Data column to plot
    #[arg(short = 'n', long)]
    pub column: String,

    /// Path to JSON plot configuration file
    #[arg(short, long, env = "NAMEPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory to write the image into
    #[arg(short, long, env = "NAMEPLOT_OUTDIR")]
    pub outdir: Option<PathBuf>,

    /// Output file name
    #[arg(short = 'f', long)]
    pub outfile: Option<String>,

    /// Caption drawn above the map
    #[arg(long)]
    pub caption: Option<String>,

    /// Colormap for mesh rendering
    #[arg(long)]
    pub colormap: Option<String>,

    /// Render the footprint in a single colour
    #[arg(long)]
    pub solid: bool,

    /// Leave the institutional logos off the map
    #[arg(long)]
    pub no_logos: bool,

    /// Directory holding the logo images
    #[arg(long, env = "NAMEPLOT_LOGO_DIR")]
    pub logo_dir: Option<PathBuf>,

    /// Zone list file to overlay
    #[arg(short, long)]
    pub zones: Option<PathBuf>,

    /// Do not draw zone boundary lines
    #[arg(long)]
    pub no_zone_lines: bool,

    /// Do not fill zones with their colours
    #[arg(long)]
    pub no_zone_colours: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "NAMEPLOT_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Drawing options
    #[serde(flatten)]
    pub plot: DrawOptions,

    /// Zone overlay, if any
    #[serde(default)]
    pub zones: Option<ZoneOptions>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// What to plot, taken from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct PlotTarget {
    pub grid_file: PathBuf,
    pub column: Column,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PlotTarget)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PlotTarget)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if args.outdir.is_some() {
            config.plot.outdir = args.outdir;
        }
        if args.outfile.is_some() {
            config.plot.outfile = args.outfile;
        }
        if args.caption.is_some() {
            config.plot.caption = args.caption;
        }
        if args.colormap.is_some() {
            config.plot.colormap = args.colormap;
        }
        if args.solid {
            config.plot.solid = true;
        }
        if args.no_logos {
            config.plot.logos = false;
        }
        if args.logo_dir.is_some() {
            config.plot.logo_dir = args.logo_dir;
        }
        if let Some(list) = args.zones {
            config.zones = Some(ZoneOptions {
                list,
                lines: true,
                colours: true,
            });
        }
        if args.no_zone_lines || args.no_zone_colours {
            let zones = config.zones.as_mut().ok_or_else(|| NamePlotError::Configuration {
                message: "--no-zone-lines and --no-zone-colours need a zone list".to_string(),
            })?;
            zones.lines &= !args.no_zone_lines;
            zones.colours &= !args.no_zone_colours;
        }
        if let Some(level) = args.log_level {
            config.log_level = level;
        }

        let target = PlotTarget {
            grid_file: args.grid_file,
            column: Column::new(args.column),
        };

        Ok((config, target))
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NamePlotError::resource(path, e))?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.plot = other.plot;
        if other.zones.is_some() {
            self.zones = other.zones;
        }
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(NamePlotError::Configuration {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if let Some(zones) = &self.zones {
            if zones.list.as_os_str().is_empty() {
                return Err(NamePlotError::Configuration {
                    message: "Zone list path cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plot: DrawOptions::default(),
            zones: None,
            log_level: default_log_level(),
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}
