//! Export glue: from a box configuration to files on disk
//!
//! The render functions build every file in memory first; [`write_files`]
//! then either writes them side by side or bundles them into one archive.

use crate::archive::{write_zip, ExportFile};
use anyhow::{Context, Result};
use laserbox_core::{generate_box, BoxDimensions, BoxOutlines, PanelKind};
use laserbox_export::{box_layout, extrude, panel_document, ShelfPacker, Solid};
use laserbox_settings::BoxConfig;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SVG_ARCHIVE: &str = "box_svg.zip";
pub const STL_ARCHIVE: &str = "box_stl.zip";
pub const LAYOUT_FILE: &str = "box_layout.svg";

/// Validated dimensions and the three panel outlines of a configured box
pub struct GeneratedBox {
    pub dimensions: BoxDimensions,
    pub outlines: BoxOutlines,
}

pub fn generate(config: &BoxConfig) -> Result<GeneratedBox> {
    config.validate().context("Invalid box configuration")?;
    let dimensions = config.dimensions();
    let outlines = generate_box(&dimensions).context("Failed to generate panel outlines")?;
    Ok(GeneratedBox {
        dimensions,
        outlines,
    })
}

/// One SVG per panel type
pub fn render_svgs(config: &BoxConfig, generated: &GeneratedBox) -> Result<Vec<ExportFile>> {
    PanelKind::ALL
        .iter()
        .map(|&kind| {
            let spec = generated.dimensions.panel_spec(kind);
            let doc = panel_document(
                spec.width,
                spec.height,
                generated.outlines.get(kind),
                config.units,
            )
            .with_context(|| format!("Failed to build {} document", kind))?;
            Ok(ExportFile::new(format!("{}.svg", kind.file_stem()), doc.render()))
        })
        .collect()
}

/// One binary STL per panel type, extruded by the material thickness
pub fn render_stls(config: &BoxConfig, generated: &GeneratedBox) -> Result<Vec<ExportFile>> {
    PanelKind::ALL
        .iter()
        .map(|&kind| {
            let solid = extrude(
                generated.outlines.get(kind),
                generated.dimensions.thickness,
                config.stl_scale,
            )
            .with_context(|| format!("Failed to extrude {} panel", kind))?;
            encode_stl(kind, &solid)
        })
        .collect()
}

/// Binary STL file for one panel; open meshes are refused.
pub fn encode_stl(kind: PanelKind, solid: &Solid) -> Result<ExportFile> {
    solid
        .ensure_closed()
        .with_context(|| format!("{} panel mesh is not closed", kind))?;
    let bytes = solid
        .to_stl_bytes()
        .with_context(|| format!("Failed to encode {} panel", kind))?;
    Ok(ExportFile::new(format!("{}.stl", kind.file_stem()), bytes))
}

/// All six panels nested on one sheet
pub fn render_layout(config: &BoxConfig, generated: &GeneratedBox) -> Result<ExportFile> {
    let doc = box_layout(
        &generated.dimensions,
        &generated.outlines,
        config.svg_layout_margin,
        config.units,
        &ShelfPacker::default(),
    )
    .context("Failed to lay out panels")?;
    info!(
        "Nested {} panels on a {}x{}{} sheet",
        doc.paths.len(),
        doc.width,
        doc.height,
        config.units
    );
    Ok(ExportFile::new(LAYOUT_FILE, doc.render()))
}

/// Write files into `out_dir`, or into a single archive named `archive`.
pub fn write_files(
    out_dir: &Path,
    files: &[ExportFile],
    archive: Option<&str>,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    if let Some(name) = archive {
        let path = out_dir.join(name);
        write_zip(&path, files)?;
        info!("Wrote {} ({} files)", path.display(), files.len());
        return Ok(vec![path]);
    }

    files
        .iter()
        .map(|file| {
            let path = out_dir.join(&file.name);
            std::fs::write(&path, &file.contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
            Ok(path)
        })
        .collect()
}

pub fn export_svg(config: &BoxConfig, out_dir: &Path, zip: bool) -> Result<Vec<PathBuf>> {
    let generated = generate(config)?;
    let files = render_svgs(config, &generated)?;
    write_files(out_dir, &files, zip.then_some(SVG_ARCHIVE))
}

pub fn export_stl(config: &BoxConfig, out_dir: &Path, zip: bool) -> Result<Vec<PathBuf>> {
    let generated = generate(config)?;
    let files = render_stls(config, &generated)?;
    write_files(out_dir, &files, zip.then_some(STL_ARCHIVE))
}

pub fn export_layout(config: &BoxConfig, out_dir: &Path) -> Result<PathBuf> {
    let generated = generate(config)?;
    let file = render_layout(config, &generated)?;
    let mut written = write_files(out_dir, std::slice::from_ref(&file), None)?;
    written
        .pop()
        .context("Layout file was not written")
}
