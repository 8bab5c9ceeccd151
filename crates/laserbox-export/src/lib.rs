//! # LaserBox Export
//!
//! Everything downstream of an [`Outline`](laserbox_core::Outline):
//!
//! - [`cut_path`]: outline to `M`/`L`/`Z` commands and SVG path data
//! - [`svg`]: per-panel and combined SVG documents
//! - [`layout`]: nesting panels on one sheet through a [`SheetPacker`]
//! - [`solid`]: extrusion into a closed triangle mesh and binary STL
//!
//! Nothing here touches the file system; callers get strings and bytes.

pub mod cut_path;
pub mod error;
pub mod layout;
pub mod solid;
pub mod svg;

pub use cut_path::{to_cut_path, CutPath, PathCommand};
pub use error::{ExportError, ExportResult};
pub use layout::{
    box_layout, nest_panels, PackItem, Placement, SheetLayout, SheetPacker, SheetPanel,
    ShelfPacker,
};
pub use solid::{extrude, Facet, Solid};
pub use svg::{panel_document, SvgDocument};
