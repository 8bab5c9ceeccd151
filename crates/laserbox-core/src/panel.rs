//! Panel parameters and the three panel types of a finger-jointed box

use crate::error::{GeometryError, GeometryResult};
use crate::outline::{generate_outline, Outline};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Parameters for a single rectangular panel.
///
/// `width` runs along the panel's x axis (top and bottom edges), `height`
/// along its y axis (left and right edges). The insert flags select the joint
/// phase of each edge pair; two mating edges must use opposite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub width: f64,
    pub height: f64,
    pub width_tab_count: u32,
    pub height_tab_count: u32,
    pub width_edge_insert: bool,
    pub height_edge_insert: bool,
    /// Material thickness, which is also the notch depth
    pub thickness: f64,
}

impl PanelSpec {
    /// Check the generator's preconditions.
    pub fn validate(&self) -> GeometryResult<()> {
        check_length("width", self.width)?;
        check_length("height", self.height)?;
        check_length("thickness", self.thickness)?;
        check_tabs("width_tab_count", self.width_tab_count)?;
        check_tabs("height_tab_count", self.height_tab_count)?;
        Ok(())
    }

    /// Width of one tab or gap along the width direction
    pub fn width_unit(&self) -> GeometryResult<f64> {
        Ok(self.width / check_tabs("width_tab_count", self.width_tab_count)? as f64)
    }

    /// Width of one tab or gap along the height direction
    pub fn height_unit(&self) -> GeometryResult<f64> {
        Ok(self.height / check_tabs("height_tab_count", self.height_tab_count)? as f64)
    }
}

/// Number of equal segments an edge with `tabs` tabs is split into, or
/// `None` when `2 * tabs - 1` does not fit a `u32`.
pub fn segment_count(tabs: u32) -> Option<u32> {
    tabs.checked_mul(2).and_then(|s| s.checked_sub(1))
}

fn check_length(name: &str, value: f64) -> GeometryResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GeometryError::InvalidSpec(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Check a tab count and return its segment count.
pub(crate) fn check_tabs(name: &str, value: u32) -> GeometryResult<u32> {
    if value < 2 {
        return Err(GeometryError::InvalidSpec(format!(
            "{} must be at least 2, got {}",
            name, value
        )));
    }
    segment_count(value).ok_or_else(|| {
        GeometryError::InvalidSpec(format!("{} is too large, got {}", name, value))
    })
}

/// The three distinct panel shapes of a closed box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// A × B panel, cut for the back and the front
    Back,
    /// C × B panel, cut for the left and right sides
    Side,
    /// C × A panel, cut for the top and the bottom
    Top,
}

impl PanelKind {
    pub const ALL: [PanelKind; 3] = [PanelKind::Back, PanelKind::Side, PanelKind::Top];

    /// File stem used for exported files
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Side => "side",
            Self::Top => "top",
        }
    }

    /// How many physical copies of this panel a box needs
    pub fn copies(self) -> usize {
        2
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Overall box description: three side lengths, their tab counts, and the
/// material thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    pub side_a: f64,
    pub side_a_tabs: u32,
    pub side_b: f64,
    pub side_b_tabs: u32,
    pub side_c: f64,
    pub side_c_tabs: u32,
    pub thickness: f64,
}

impl BoxDimensions {
    /// Derive the panel spec for one panel type.
    ///
    /// Side B is shared by the back and the side panels, side A by the back
    /// and the top, side C by the side and the top. Each shared edge pairs an
    /// insert edge with a non-insert edge so the joints interlock.
    pub fn panel_spec(&self, kind: PanelKind) -> PanelSpec {
        let t = self.thickness;
        match kind {
            PanelKind::Back => PanelSpec {
                width: self.side_a,
                height: self.side_b,
                width_tab_count: self.side_a_tabs,
                height_tab_count: self.side_b_tabs,
                width_edge_insert: true,
                height_edge_insert: true,
                thickness: t,
            },
            PanelKind::Side => PanelSpec {
                width: self.side_c,
                height: self.side_b,
                width_tab_count: self.side_c_tabs,
                height_tab_count: self.side_b_tabs,
                width_edge_insert: false,
                height_edge_insert: false,
                thickness: t,
            },
            PanelKind::Top => PanelSpec {
                width: self.side_c,
                height: self.side_a,
                width_tab_count: self.side_c_tabs,
                height_tab_count: self.side_a_tabs,
                width_edge_insert: true,
                height_edge_insert: false,
                thickness: t,
            },
        }
    }
}

/// Outlines for all three panel types of one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxOutlines {
    pub back: Outline,
    pub side: Outline,
    pub top: Outline,
}

impl BoxOutlines {
    pub fn get(&self, kind: PanelKind) -> &Outline {
        match kind {
            PanelKind::Back => &self.back,
            PanelKind::Side => &self.side,
            PanelKind::Top => &self.top,
        }
    }
}

/// Generate the outlines of all three panel types.
pub fn generate_box(dims: &BoxDimensions) -> GeometryResult<BoxOutlines> {
    debug!(
        "Generating box {}x{}x{} (tabs {}/{}/{}), thickness {}",
        dims.side_a,
        dims.side_b,
        dims.side_c,
        dims.side_a_tabs,
        dims.side_b_tabs,
        dims.side_c_tabs,
        dims.thickness
    );

    Ok(BoxOutlines {
        back: generate_outline(&dims.panel_spec(PanelKind::Back))?,
        side: generate_outline(&dims.panel_spec(PanelKind::Side))?,
        top: generate_outline(&dims.panel_spec(PanelKind::Top))?,
    })
}
