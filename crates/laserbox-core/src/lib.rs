//! # LaserBox Core
//!
//! Geometry for finger-jointed boxes cut from sheet material.
//!
//! - **Outline generator**: [`generate_outline`] turns a [`PanelSpec`] into a
//!   closed polygon whose edges alternate between flush and recessed
//!   segments, so that mating panels interlock.
//! - **Box derivation**: [`BoxDimensions`] maps three side lengths onto the
//!   three panel types (back, side, top) with matching joint phases.
//! - **Units**: [`LengthUnit`] labels for downstream documents.
//!
//! Everything here is pure: no global state, no I/O, and every call is
//! reproducible from its arguments, so panels may be generated in parallel.

pub mod error;
pub mod outline;
pub mod panel;
pub mod units;

pub use error::{GeometryError, GeometryResult};
pub use outline::{
    edge_profile, generate_outline, rotate_half_turn, Bounds, Corner, Edge, Outline, Point,
};
pub use panel::{generate_box, segment_count, BoxDimensions, BoxOutlines, PanelKind, PanelSpec};
pub use units::LengthUnit;
