//! Box configuration
//!
//! Mirrors the fields a user fills in to design a box: three side lengths
//! with their tab counts, the material thickness, and the export options.
//! Files are JSON or TOML, chosen by extension.

use crate::error::{SettingsError, SettingsResult};
use laserbox_core::{BoxDimensions, LengthUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Complete box configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    /// Length of side A (back width, top height)
    pub side_a: f64,
    pub side_a_tab_count: u32,
    /// Length of side B (back and side height)
    pub side_b: f64,
    pub side_b_tab_count: u32,
    /// Length of side C (side and top width)
    pub side_c: f64,
    pub side_c_tab_count: u32,
    pub material_thickness: f64,
    /// Unit label written into SVG documents
    pub units: LengthUnit,
    /// Factor applied to every STL coordinate (0.001 turns mm into m)
    pub stl_scale: f64,
    /// Clear space around each panel in the nested layout
    pub svg_layout_margin: f64,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            side_a: 100.0,
            side_a_tab_count: 3,
            side_b: 200.0,
            side_b_tab_count: 3,
            side_c: 50.0,
            side_c_tab_count: 2,
            material_thickness: 3.175,
            units: LengthUnit::Mm,
            stl_scale: 0.001,
            svg_layout_margin: 5.0,
        }
    }
}

impl BoxConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the user's config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("laserbox").join("box.toml"))
    }

    /// Load and validate a config from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        debug!("Loading box config from {}", path.display());
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate and write the config to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        debug!("Saved box config to {}", path.display());
        Ok(())
    }

    /// Check every field the way the input form does
    pub fn validate(&self) -> SettingsResult<()> {
        positive("side_a", self.side_a)?;
        positive("side_b", self.side_b)?;
        positive("side_c", self.side_c)?;
        positive("material_thickness", self.material_thickness)?;
        tab_count("side_a_tab_count", self.side_a_tab_count)?;
        tab_count("side_b_tab_count", self.side_b_tab_count)?;
        tab_count("side_c_tab_count", self.side_c_tab_count)?;
        positive("stl_scale", self.stl_scale)?;

        if !self.svg_layout_margin.is_finite() || self.svg_layout_margin < 0.0 {
            return Err(SettingsError::invalid(
                "svg_layout_margin",
                format!("must be zero or positive, got {}", self.svg_layout_margin),
            ));
        }

        Ok(())
    }

    /// Box dimensions for the geometry core
    pub fn dimensions(&self) -> BoxDimensions {
        BoxDimensions {
            side_a: self.side_a,
            side_a_tabs: self.side_a_tab_count,
            side_b: self.side_b,
            side_b_tabs: self.side_b_tab_count,
            side_c: self.side_c,
            side_c_tabs: self.side_c_tab_count,
            thickness: self.material_thickness,
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SettingsError::invalid(
            key,
            format!("must be a positive number, got {}", value),
        ));
    }
    Ok(())
}

fn tab_count(key: &str, value: u32) -> SettingsResult<()> {
    if value < 2 {
        return Err(SettingsError::invalid(
            key,
            format!("value must be greater than 1, got {}", value),
        ));
    }
    Ok(())
}
