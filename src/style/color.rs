//! Named and hex colours.

use std::fmt;
use std::str::FromStr;

use crate::error::{NamePlotError, Result};

/// A colour that has been checked against the supported palette.
///
/// Accepts CSS colour names (`black`, `lightgray`), hex codes (`#D1D1D1`,
/// `#fff`), functional notation (`rgb(209, 209, 209)`) and the matplotlib
/// shorthands: single letters (`k`, `r`), the tab10 cycle (`C0`..`C9`,
/// `tab:blue`) and grey levels written as a number in [0, 1] (`"0.75"`). The
/// input spelling is kept for logging and for backends that take colour names.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    name: String,
    rgba: [u8; 4],
}

impl Color {
    /// Parse and validate a colour for the given parameter
    pub fn parse_for(param: &str, s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(NamePlotError::invalid(param, "Colour name cannot be empty"));
        }

        let parsed = if let Some(hex) = matplotlib_alias(name) {
            colorgrad::Color::from_html(hex)
        } else if let Some(level) = grey_level(name) {
            Ok(colorgrad::Color::new(level, level, level, 1.0))
        } else {
            colorgrad::Color::from_html(name)
        }
        .map_err(|e| NamePlotError::invalid(param, format!("Unknown colour '{}': {}", name, e)))?;

        Ok(Self {
            name: name.to_string(),
            rgba: parsed.to_rgba8(),
        })
    }

    /// The colour as it was written
    pub fn name(&self) -> &str {
        &self.name
    }

    /// RGBA components
    pub fn rgba(&self) -> [u8; 4] {
        self.rgba
    }
}

/// Hex value of a matplotlib single-letter or tab10 colour
fn matplotlib_alias(name: &str) -> Option<&'static str> {
    let hex = match name.to_ascii_lowercase().as_str() {
        "b" => "#0000ff",
        "g" => "#008000",
        "r" => "#ff0000",
        "c" => "#00bfbf",
        "m" => "#bf00bf",
        "y" => "#bfbf00",
        "k" => "#000000",
        "w" => "#ffffff",
        "c0" | "tab:blue" => "#1f77b4",
        "c1" | "tab:orange" => "#ff7f0e",
        "c2" | "tab:green" => "#2ca02c",
        "c3" | "tab:red" => "#d62728",
        "c4" | "tab:purple" => "#9467bd",
        "c5" | "tab:brown" => "#8c564b",
        "c6" | "tab:pink" => "#e377c2",
        "c7" | "tab:gray" | "tab:grey" => "#7f7f7f",
        "c8" | "tab:olive" => "#bcbd22",
        "c9" | "tab:cyan" => "#17becf",
        _ => return None,
    };
    Some(hex)
}

/// Grey level for a number in [0, 1], where 0 is black and 1 is white
fn grey_level(name: &str) -> Option<f64> {
    name.parse::<f64>()
        .ok()
        .filter(|level| (0.0..=1.0).contains(level))
}

impl FromStr for Color {
    type Err = NamePlotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Color::parse_for("color", s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
