//! Error types for the outline generator.
//!
//! Every failure is detected synchronously from the caller's inputs. Nothing
//! here is retried and nothing is logged and dropped: the error always goes
//! back to whoever asked for the geometry.

use thiserror::Error;

/// Errors raised while building or consuming panel outlines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The panel parameters violate the generator's preconditions.
    #[error("Invalid panel spec: {0}")]
    InvalidSpec(String),

    /// An outline with no points reached a consumer.
    #[error("Outline is empty")]
    EmptyOutline,

    /// An outline has coincident consecutive points, too few distinct
    /// points, or cannot be triangulated.
    #[error("Degenerate outline: {0}")]
    DegenerateOutline(String),
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
