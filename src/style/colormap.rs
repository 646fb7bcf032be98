//! Colormap names and lookup.
//!
//! The colour ramps themselves come from `colorgrad`; this module only decides
//! which names are accepted and maps values onto a ramp.

use std::fmt;
use std::str::FromStr;

use crate::error::NamePlotError;

/// Colormaps a footprint can be rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColormapName {
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Turbo,
    Rainbow,
    Spectral,
    RdBu,
    RdYlBu,
    YlOrRd,
    YlGnBu,
    Blues,
    Greens,
    Greys,
    Oranges,
    Purples,
    Reds,
}

impl ColormapName {
    /// Every supported colormap
    pub const ALL: [ColormapName; 18] = [
        ColormapName::Viridis,
        ColormapName::Plasma,
        ColormapName::Inferno,
        ColormapName::Magma,
        ColormapName::Cividis,
        ColormapName::Turbo,
        ColormapName::Rainbow,
        ColormapName::Spectral,
        ColormapName::RdBu,
        ColormapName::RdYlBu,
        ColormapName::YlOrRd,
        ColormapName::YlGnBu,
        ColormapName::Blues,
        ColormapName::Greens,
        ColormapName::Greys,
        ColormapName::Oranges,
        ColormapName::Purples,
        ColormapName::Reds,
    ];

    /// Get the name of this colormap
    pub fn name(&self) -> &'static str {
        match self {
            ColormapName::Viridis => "viridis",
            ColormapName::Plasma => "plasma",
            ColormapName::Inferno => "inferno",
            ColormapName::Magma => "magma",
            ColormapName::Cividis => "cividis",
            ColormapName::Turbo => "turbo",
            ColormapName::Rainbow => "rainbow",
            ColormapName::Spectral => "spectral",
            ColormapName::RdBu => "rdbu",
            ColormapName::RdYlBu => "rdylbu",
            ColormapName::YlOrRd => "ylorrd",
            ColormapName::YlGnBu => "ylgnbu",
            ColormapName::Blues => "blues",
            ColormapName::Greens => "greens",
            ColormapName::Greys => "greys",
            ColormapName::Oranges => "oranges",
            ColormapName::Purples => "purples",
            ColormapName::Reds => "reds",
        }
    }

    fn gradient(&self) -> colorgrad::Gradient {
        match self {
            ColormapName::Viridis => colorgrad::viridis(),
            ColormapName::Plasma => colorgrad::plasma(),
            ColormapName::Inferno => colorgrad::inferno(),
            ColormapName::Magma => colorgrad::magma(),
            ColormapName::Cividis => colorgrad::cividis(),
            ColormapName::Turbo => colorgrad::turbo(),
            ColormapName::Rainbow => colorgrad::rainbow(),
            ColormapName::Spectral => colorgrad::spectral(),
            ColormapName::RdBu => colorgrad::rd_bu(),
            ColormapName::RdYlBu => colorgrad::rd_yl_bu(),
            ColormapName::YlOrRd => colorgrad::yl_or_rd(),
            ColormapName::YlGnBu => colorgrad::yl_gn_bu(),
            ColormapName::Blues => colorgrad::blues(),
            ColormapName::Greens => colorgrad::greens(),
            ColormapName::Greys => colorgrad::greys(),
            ColormapName::Oranges => colorgrad::oranges(),
            ColormapName::Purples => colorgrad::purples(),
            ColormapName::Reds => colorgrad::reds(),
        }
    }
}

impl FromStr for ColormapName {
    type Err = NamePlotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "");
        ColormapName::ALL
            .iter()
            .find(|c| c.name() == wanted)
            .copied()
            .ok_or_else(|| NamePlotError::invalid("colormap", format!("Unknown colormap: {}", s)))
    }
}

impl fmt::Display for ColormapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A colour ramp ready to map data values
pub struct Colormap {
    name: ColormapName,
    gradient: colorgrad::Gradient,
}

impl Colormap {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    pub fn map_normalized(&self, value: f64) -> [u8; 4] {
        self.gradient.at(value.clamp(0.0, 1.0)).to_rgba8()
    }

    /// Map a value to an RGBA color given the data range
    pub fn map(&self, value: f64, min: f64, max: f64) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    pub fn name(&self) -> ColormapName {
        self.name
    }
}

/// Get a colormap by name
pub fn get_colormap(name: ColormapName) -> Colormap {
    Colormap {
        name,
        gradient: name.gradient(),
    }
}
