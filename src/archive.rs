//! Zip bundling of exported files

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A named file held in memory until it is written out or archived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub contents: Vec<u8>,
}

impl ExportFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Write `files` into a new deflated zip archive at `path`.
pub fn write_zip(path: &Path, files: &[ExportFile]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create archive {}", path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in files {
        zip.start_file(entry.name.as_str(), options)
            .with_context(|| format!("Failed to add {} to archive", entry.name))?;
        zip.write_all(&entry.contents)
            .with_context(|| format!("Failed to write {} into archive", entry.name))?;
        debug!("Archived {} ({} bytes)", entry.name, entry.contents.len());
    }

    zip.finish()
        .with_context(|| format!("Failed to finalize archive {}", path.display()))?;
    Ok(())
}
