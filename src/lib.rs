//! # LaserBox
//!
//! Generates the panels of a finger-jointed box for laser cutting.
//!
//! ## Architecture
//!
//! LaserBox is organized as a workspace with multiple crates:
//!
//! 1. **laserbox-core** - Panel specs, tab-joint outline generation, box derivation
//! 2. **laserbox-export** - Cut paths, SVG documents, sheet layout, STL extrusion
//! 3. **laserbox-settings** - Box configuration, validation, JSON/TOML files
//! 4. **laserbox** - This crate: logging, file export and the command line

pub mod archive;
pub mod export;

pub use archive::{write_zip, ExportFile};
pub use export::{
    encode_stl, export_layout, export_stl, export_svg, generate, render_layout, render_stls,
    render_svgs, write_files, GeneratedBox, LAYOUT_FILE, STL_ARCHIVE, SVG_ARCHIVE,
};

pub use laserbox_core::{
    generate_box, generate_outline, BoxDimensions, BoxOutlines, GeometryError, LengthUnit,
    Outline, PanelKind, PanelSpec, Point,
};
pub use laserbox_export::{extrude, to_cut_path, CutPath, ExportError, Solid, SvgDocument};
pub use laserbox_settings::{BoxConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr, keeping stdout for results
/// - RUST_LOG environment variable support, INFO otherwise
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
