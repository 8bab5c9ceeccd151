//! Sheet layout
//!
//! Nesting panels onto one sheet is delegated to a [`SheetPacker`]. The packer
//! sees only bounding boxes (already grown by the layout margin) and answers
//! with an offset per box plus the overall sheet size. The layout code checks
//! that answer before trusting it, then re-emits every panel's cut path at its
//! assigned offset in one document.

use crate::cut_path::to_cut_path;
use crate::error::{ExportError, ExportResult};
use crate::svg::SvgDocument;
use laserbox_core::{BoxDimensions, BoxOutlines, LengthUnit, Outline, PanelKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

const OVERLAP_TOLERANCE: f64 = 1e-9;

/// A box to place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackItem {
    pub id: usize,
    pub width: f64,
    pub height: f64,
}

/// Where one item ended up (top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

/// Packer output: one placement per item and the combined sheet size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub placements: Vec<Placement>,
    pub width: f64,
    pub height: f64,
}

impl SheetLayout {
    /// Check the packer contract against the items that were packed: every
    /// item placed exactly once, inside the sheet, without overlapping.
    pub fn validate(&self, items: &[PackItem]) -> ExportResult<()> {
        if self.placements.len() != items.len() {
            return Err(ExportError::Packing(format!(
                "{} items but {} placements",
                items.len(),
                self.placements.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut rects = Vec::with_capacity(items.len());
        for placement in &self.placements {
            if !seen.insert(placement.id) {
                return Err(ExportError::Packing(format!(
                    "item {} placed twice",
                    placement.id
                )));
            }
            let item = items
                .iter()
                .find(|item| item.id == placement.id)
                .ok_or_else(|| {
                    ExportError::Packing(format!("unknown item {}", placement.id))
                })?;

            let (x0, y0) = (placement.x, placement.y);
            let (x1, y1) = (x0 + item.width, y0 + item.height);
            if x0 < -OVERLAP_TOLERANCE
                || y0 < -OVERLAP_TOLERANCE
                || x1 > self.width + OVERLAP_TOLERANCE
                || y1 > self.height + OVERLAP_TOLERANCE
            {
                return Err(ExportError::Packing(format!(
                    "item {} lies outside the {}x{} sheet",
                    item.id, self.width, self.height
                )));
            }
            rects.push((item.id, x0, y0, x1, y1));
        }

        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                let overlap_x = a.3.min(b.3) - a.1.max(b.1);
                let overlap_y = a.4.min(b.4) - a.2.max(b.2);
                if overlap_x > OVERLAP_TOLERANCE && overlap_y > OVERLAP_TOLERANCE {
                    return Err(ExportError::Packing(format!(
                        "item {} overlaps item {}",
                        b.0, a.0
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn placement(&self, id: usize) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }
}

/// Anything that can nest rectangles on a sheet
pub trait SheetPacker {
    fn pack(&self, items: &[PackItem]) -> ExportResult<SheetLayout>;
}

/// Row-based packer.
///
/// Items are sorted by height (tallest first) and laid left to right in rows
/// no wider than `max(sqrt(total area) * aspect, widest item)`.
#[derive(Debug, Clone, Copy)]
pub struct ShelfPacker {
    /// Gap between neighbouring items
    pub spacing: f64,
    /// Target row width relative to the square root of the total area
    pub aspect: f64,
}

impl Default for ShelfPacker {
    fn default() -> Self {
        Self {
            spacing: 0.0,
            aspect: 1.5,
        }
    }
}

impl SheetPacker for ShelfPacker {
    fn pack(&self, items: &[PackItem]) -> ExportResult<SheetLayout> {
        if items.is_empty() {
            return Ok(SheetLayout {
                placements: Vec::new(),
                width: 0.0,
                height: 0.0,
            });
        }

        let mut order: Vec<&PackItem> = items.iter().collect();
        order.sort_by(|a, b| {
            b.height
                .partial_cmp(&a.height)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_area: f64 = items.iter().map(|i| i.width * i.height).sum();
        let max_item_width = items.iter().map(|i| i.width).fold(0.0, f64::max);
        let target_width = (total_area.sqrt() * self.aspect).max(max_item_width);

        let mut current_x = 0.0;
        let mut current_y = 0.0;
        let mut row_height: f64 = 0.0;
        let mut sheet_width: f64 = 0.0;
        let mut placements = Vec::with_capacity(items.len());

        for item in order {
            if current_x > 0.0 && current_x + item.width > target_width {
                current_x = 0.0;
                current_y += row_height + self.spacing;
                row_height = 0.0;
            }

            placements.push(Placement {
                id: item.id,
                x: current_x,
                y: current_y,
            });

            sheet_width = sheet_width.max(current_x + item.width);
            row_height = row_height.max(item.height);
            current_x += item.width + self.spacing;
        }

        Ok(SheetLayout {
            placements,
            width: sheet_width,
            height: current_y + row_height,
        })
    }
}

/// A panel to nest: nominal size plus its outline
#[derive(Debug, Clone, Copy)]
pub struct SheetPanel<'a> {
    pub width: f64,
    pub height: f64,
    pub outline: &'a Outline,
}

/// Nest panels on one sheet and emit them as a single document.
pub fn nest_panels(
    panels: &[SheetPanel<'_>],
    margin: f64,
    unit: LengthUnit,
    packer: &dyn SheetPacker,
) -> ExportResult<SvgDocument> {
    if !margin.is_finite() || margin < 0.0 {
        return Err(ExportError::InvalidParameter(format!(
            "layout margin must be zero or positive, got {}",
            margin
        )));
    }
    if panels.is_empty() {
        return Err(ExportError::InvalidParameter(
            "no panels to lay out".to_string(),
        ));
    }

    let items: Vec<PackItem> = panels
        .iter()
        .enumerate()
        .map(|(id, panel)| PackItem {
            id,
            width: panel.width + margin * 2.0,
            height: panel.height + margin * 2.0,
        })
        .collect();

    let layout = packer.pack(&items)?;
    layout.validate(&items)?;
    debug!(
        "Packed {} panels on a {}x{} sheet",
        items.len(),
        layout.width,
        layout.height
    );

    let mut doc = SvgDocument::new(layout.width, layout.height, unit)?;
    for (id, panel) in panels.iter().enumerate() {
        let placement = layout
            .placement(id)
            .ok_or_else(|| ExportError::Packing(format!("item {} was not placed", id)))?;
        doc.push(to_cut_path(
            panel.outline,
            placement.x + margin,
            placement.y + margin,
        )?);
    }
    Ok(doc)
}

/// Nest every physical panel of a box (two of each type).
pub fn box_layout(
    dims: &BoxDimensions,
    outlines: &BoxOutlines,
    margin: f64,
    unit: LengthUnit,
    packer: &dyn SheetPacker,
) -> ExportResult<SvgDocument> {
    let panels: Vec<SheetPanel<'_>> = PanelKind::ALL
        .iter()
        .flat_map(|&kind| {
            let spec = dims.panel_spec(kind);
            let panel = SheetPanel {
                width: spec.width,
                height: spec.height,
                outline: outlines.get(kind),
            };
            std::iter::repeat(panel).take(kind.copies())
        })
        .collect();

    nest_panels(&panels, margin, unit, packer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<PackItem> {
        vec![
            PackItem { id: 0, width: 110.0, height: 210.0 },
            PackItem { id: 1, width: 110.0, height: 210.0 },
            PackItem { id: 2, width: 60.0, height: 210.0 },
            PackItem { id: 3, width: 60.0, height: 210.0 },
            PackItem { id: 4, width: 60.0, height: 110.0 },
            PackItem { id: 5, width: 60.0, height: 110.0 },
        ]
    }

    #[test]
    fn test_shelf_packer_honours_contract() {
        let items = items();
        let layout = ShelfPacker::default().pack(&items).unwrap();
        layout.validate(&items).unwrap();
        assert!(layout.width >= 110.0);
        let area: f64 = items.iter().map(|i| i.width * i.height).sum();
        assert!(layout.width * layout.height >= area);
    }

    #[test]
    fn test_shelf_packer_spacing() {
        let items = items();
        let packer = ShelfPacker {
            spacing: 3.0,
            aspect: 1.5,
        };
        let layout = packer.pack(&items).unwrap();
        layout.validate(&items).unwrap();
    }

    #[test]
    fn test_empty_input() {
        let layout = ShelfPacker::default().pack(&[]).unwrap();
        assert!(layout.placements.is_empty());
    }

    #[test]
    fn test_validate_catches_overlap() {
        let items = items()[..2].to_vec();
        let layout = SheetLayout {
            placements: vec![
                Placement { id: 0, x: 0.0, y: 0.0 },
                Placement { id: 1, x: 50.0, y: 0.0 },
            ],
            width: 300.0,
            height: 300.0,
        };
        assert!(matches!(
            layout.validate(&items),
            Err(ExportError::Packing(_))
        ));
    }

    #[test]
    fn test_validate_catches_missing_and_outside() {
        let items = items()[..2].to_vec();
        let missing = SheetLayout {
            placements: vec![Placement { id: 0, x: 0.0, y: 0.0 }],
            width: 300.0,
            height: 300.0,
        };
        assert!(missing.validate(&items).is_err());

        let outside = SheetLayout {
            placements: vec![
                Placement { id: 0, x: 0.0, y: 0.0 },
                Placement { id: 1, x: 110.0, y: 100.0 },
            ],
            width: 220.0,
            height: 210.0,
        };
        assert!(outside.validate(&items).is_err());
    }

    #[test]
    fn test_touching_items_do_not_overlap() {
        let items = items()[..2].to_vec();
        let layout = SheetLayout {
            placements: vec![
                Placement { id: 0, x: 0.0, y: 0.0 },
                Placement { id: 1, x: 110.0, y: 0.0 },
            ],
            width: 220.0,
            height: 210.0,
        };
        assert!(layout.validate(&items).is_ok());
    }
}
