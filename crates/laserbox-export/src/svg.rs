//! SVG cut documents
//!
//! A document is a bare `<svg>` root sized in real units with one `<path>` per
//! cut: black hairline stroke, no fill, which is what laser software expects.

use crate::cut_path::{to_cut_path, CutPath};
use crate::error::{ExportError, ExportResult};
use laserbox_core::{LengthUnit, Outline};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// An SVG document holding one or more cut paths
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub width: f64,
    pub height: f64,
    pub unit: LengthUnit,
    pub paths: Vec<CutPath>,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64, unit: LengthUnit) -> ExportResult<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ExportError::InvalidParameter(format!(
                "document size must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            unit,
            paths: Vec::new(),
        })
    }

    pub fn push(&mut self, path: CutPath) {
        self.paths.push(path);
    }

    /// Serialize to SVG markup
    pub fn render(&self) -> String {
        let unit = self.unit.label();
        let mut svg = format!(
            r##"<svg xmlns="{}" viewBox="0 0 {} {}" width="{}{}" height="{}{}" stroke="#000" fill="none">"##,
            SVG_NS, self.width, self.height, self.width, unit, self.height, unit
        );
        for path in &self.paths {
            svg.push_str(&format!(r#"<path d="{}"/>"#, path));
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Single-panel document: the outline at its own origin on a sheet of the
/// panel's nominal size.
pub fn panel_document(
    width: f64,
    height: f64,
    outline: &Outline,
    unit: LengthUnit,
) -> ExportResult<SvgDocument> {
    let mut doc = SvgDocument::new(width, height, unit)?;
    doc.push(to_cut_path(outline, 0.0, 0.0)?);
    Ok(doc)
}
