//! Geographic helpers: projection names, axis bounds and axis tick generation.
//!
//! Projection math itself belongs to the mapping capability; this module only
//! names the projections a caller may request and validates bounds before they
//! reach a map.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{NamePlotError, Result};

/// Number of ticks the nice-tick algorithm aims for
const TARGET_TICKS: usize = 5;

/// Map projections a footprint map can be drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Equidistant cylindrical (plate carrée)
    Cylindrical,
    /// Mercator
    Mercator,
    /// Miller cylindrical
    Miller,
    /// Robinson
    Robinson,
    /// North polar stereographic
    NorthPolarStereographic,
    /// South polar stereographic
    SouthPolarStereographic,
    /// Lambert conformal conic
    LambertConformal,
}

impl Projection {
    /// Short code used in configuration files
    pub fn code(&self) -> &'static str {
        match self {
            Projection::Cylindrical => "cyl",
            Projection::Mercator => "merc",
            Projection::Miller => "mill",
            Projection::Robinson => "robin",
            Projection::NorthPolarStereographic => "npstere",
            Projection::SouthPolarStereographic => "spstere",
            Projection::LambertConformal => "lcc",
        }
    }

    /// Create a Projection from a string
    pub fn parse_projection(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cyl" | "cylindrical" => Ok(Projection::Cylindrical),
            "merc" | "mercator" => Ok(Projection::Mercator),
            "mill" | "miller" => Ok(Projection::Miller),
            "robin" | "robinson" => Ok(Projection::Robinson),
            "npstere" => Ok(Projection::NorthPolarStereographic),
            "spstere" => Ok(Projection::SouthPolarStereographic),
            "lcc" => Ok(Projection::LambertConformal),
            _ => Err(NamePlotError::invalid(
                "projection",
                format!(
                    "Unknown map projection: {}. Must be one of: cyl, merc, mill, robin, npstere, spstere, lcc",
                    s
                ),
            )),
        }
    }
}

impl FromStr for Projection {
    type Err = NamePlotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Projection::parse_projection(s)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A closed coordinate interval along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the closed interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check that a longitude interval is usable
    pub fn validate_longitude(&self, param: &str) -> Result<()> {
        self.validate_order(param)
    }

    /// Check that a latitude interval is usable
    pub fn validate_latitude(&self, param: &str) -> Result<()> {
        self.validate_order(param)?;

        // Latitude must be in the range -90 to 90
        if !(-90.0..=90.0).contains(&self.min) || !(-90.0..=90.0).contains(&self.max) {
            return Err(NamePlotError::invalid(
                param,
                "Latitude must be in the range -90 to 90",
            ));
        }
        Ok(())
    }

    fn validate_order(&self, param: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(NamePlotError::invalid(param, "Bounds must be finite numbers"));
        }
        if self.min >= self.max {
            return Err(NamePlotError::invalid(
                param,
                format!("min ({}) must be < max ({})", self.min, self.max),
            ));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<Bounds> for (f64, f64) {
    fn from(bounds: Bounds) -> Self {
        (bounds.min, bounds.max)
    }
}

/// Compute tick positions that fit inside `bounds`.
///
/// Uses Heckbert's "nice numbers": the step is 1, 2 or 5 times a power of ten,
/// chosen so that roughly five ticks cover the interval. Only ticks inside the
/// closed interval are returned.
pub fn axis_ticks(bounds: Bounds) -> Vec<f64> {
    let lo = bounds.min.min(bounds.max);
    let hi = bounds.min.max(bounds.max);
    let span = hi - lo;

    if !span.is_finite() || span <= 0.0 {
        return vec![lo];
    }

    let range = nice_number(span, false);
    let step = nice_number(range / (TARGET_TICKS - 1) as f64, true);
    let decimals = (-step.log10().floor()).max(0.0) as i32 + 1;
    let scale = 10f64.powi(decimals);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;

    (first..=last)
        .map(|k| {
            let tick = (k as f64 * step * scale).round() / scale;
            // Normalise -0.0
            tick + 0.0
        })
        .collect()
}

/// Round `x` to a "nice" number: 1, 2, 5 or 10 times a power of ten
fn nice_number(x: f64, round: bool) -> f64 {
    let exponent = x.log10().floor();
    let fraction = x / 10f64.powf(exponent);

    let nice = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * 10f64.powf(exponent)
}
