use crate::math::Point2;

use super::slot::{ContourId, Occurrence};

/// Data associated with a pooled vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexData {
    /// Local 2D position of the vertex.
    pub position: Point2,
    /// Every contour slot that references this vertex.
    pub(crate) occurrences: Vec<Occurrence>,
}

impl VertexData {
    /// Creates a vertex with no occurrences.
    #[must_use]
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            occurrences: Vec::new(),
        }
    }

    #[must_use]
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Whether any contour slot references this vertex.
    #[must_use]
    pub fn is_referenced(&self) -> bool {
        !self.occurrences.is_empty()
    }

    /// Returns `true` if the vertex occurs at least once in `contour`.
    #[must_use]
    pub fn occurs_in(&self, contour: ContourId) -> bool {
        self.occurrences.iter().any(|o| o.contour == contour)
    }

    /// Distinct contours this vertex occurs in, ascending.
    #[must_use]
    pub fn contours(&self) -> Vec<ContourId> {
        let mut contours: Vec<ContourId> = self.occurrences.iter().map(|o| o.contour).collect();
        contours.sort_unstable();
        contours.dedup();
        contours
    }
}
