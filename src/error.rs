use thiserror::Error;

/// Top-level error type for the Contoura topology engine.
#[derive(Debug, Error)]
pub enum ContouraError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Errors raised by the vertex/contour occurrence index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    #[error("vertex {vertex} is out of range (vertex count {count})")]
    VertexOutOfRange { vertex: usize, count: usize },

    #[error("contour {contour} is out of range (contour count {count})")]
    ContourOutOfRange { contour: usize, count: usize },

    #[error("slot {slot} is out of range for contour {contour} (length {len})")]
    SlotOutOfRange {
        contour: usize,
        slot: usize,
        len: usize,
    },

    /// The occurrence index and a geometry shape disagree.
    #[error("geometry shape out of sync with topology: {0}")]
    ShapeOutOfSync(#[from] ShapeError),
}

/// Errors raised by a geometry shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("slot {slot} is out of range (length {len})")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("range {start}..{start}+{count} is out of bounds (length {len})")]
    RangeOutOfBounds {
        start: usize,
        count: usize,
        len: usize,
    },
}

/// Convenience type alias for results using [`ContouraError`].
pub type Result<T> = std::result::Result<T, ContouraError>;
