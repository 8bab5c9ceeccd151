//! Length unit labels
//!
//! LaserBox does no unit conversion on 2D output: the unit is only the label
//! written into the SVG `width`/`height` attributes so the cutter software
//! interprets the coordinates correctly. The one linear conversion that does
//! exist (STL scale) is a plain factor applied by the extruder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear unit understood by SVG length attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimeters
    Mm,
    /// Centimeters
    Cm,
    /// Inches
    In,
    /// Points (1/72 in)
    Pt,
    /// Picas (12 pt)
    Pc,
    /// CSS pixels
    Px,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Mm
    }
}

impl LengthUnit {
    /// Suffix appended to SVG lengths
    pub fn label(self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::In => "in",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::Px => "px",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Self::Mm),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Cm),
            "in" | "inch" | "inches" => Ok(Self::In),
            "pt" => Ok(Self::Pt),
            "pc" => Ok(Self::Pc),
            "px" => Ok(Self::Px),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}
