use std::fmt;

/// Index of a vertex in the vertex pool.
///
/// Indices are dense: destroying a vertex shifts every higher index down by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

impl VertexId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Index of a contour. Contour indices are always `0..contour_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContourId(usize);

impl ContourId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ContourId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// What a contour slot is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The slot references a real vertex.
    Bound(VertexId),
    /// The slot exists but no vertex has been assigned yet.
    Unbound,
}

impl Slot {
    /// Returns the bound vertex, if any.
    #[must_use]
    pub fn vertex(self) -> Option<VertexId> {
        match self {
            Slot::Bound(v) => Some(v),
            Slot::Unbound => None,
        }
    }

    #[must_use]
    pub fn is_bound(self) -> bool {
        matches!(self, Slot::Bound(_))
    }
}

impl From<VertexId> for Slot {
    fn from(v: VertexId) -> Self {
        Slot::Bound(v)
    }
}

/// One `(contour, slot)` reference recorded against a vertex or the unbound list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Occurrence {
    pub contour: ContourId,
    pub slot: usize,
}

impl Occurrence {
    #[must_use]
    pub const fn new(contour: ContourId, slot: usize) -> Self {
        Self { contour, slot }
    }
}
