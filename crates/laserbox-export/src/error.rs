//! Error types for the export crate.

use laserbox_core::GeometryError;
use std::io;
use thiserror::Error;

/// Errors that can occur while turning outlines into cut paths, documents,
/// layouts or solids.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The outline itself is unusable.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// A numeric export parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Path data text does not follow the `M x,y L x,y ... Z` grammar.
    #[error("Malformed path data: {0}")]
    MalformedPathData(String),

    /// A sheet packer returned a layout that breaks its contract.
    #[error("Packing failed: {0}")]
    Packing(String),

    /// I/O error while writing binary output.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_display() {
        let err = ExportError::InvalidParameter("depth must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid parameter: depth must be positive");

        let err = ExportError::Packing("item 3 overlaps item 1".to_string());
        assert_eq!(err.to_string(), "Packing failed: item 3 overlaps item 1");
    }

    #[test]
    fn test_geometry_error_conversion() {
        let err: ExportError = GeometryError::EmptyOutline.into();
        assert!(matches!(
            err,
            ExportError::Geometry(GeometryError::EmptyOutline)
        ));
        assert_eq!(err.to_string(), "Geometry error: Outline is empty");
    }
}
