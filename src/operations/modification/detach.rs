use crate::error::Result;
use crate::topology::{ContourId, ContourTopology, Occurrence, Slot, VertexId};

/// Splits a shared vertex by moving its occurrences in some contours onto a copy.
///
/// After detaching, edits to the copy only reach the listed contours.
pub struct DetachVertex {
    vertex: VertexId,
    contours: Vec<ContourId>,
}

impl DetachVertex {
    /// Creates a new `DetachVertex` operation.
    #[must_use]
    pub fn new(vertex: VertexId, contours: Vec<ContourId>) -> Self {
        Self { vertex, contours }
    }

    /// Executes the operation, returning the copy, or `None` if the vertex
    /// does not occur in any of the listed contours.
    ///
    /// # Errors
    ///
    /// Returns an error, before any edit, if the vertex or a contour ID is out of range.
    pub fn execute(&self, topo: &mut ContourTopology) -> Result<Option<VertexId>> {
        let position = topo.vertex_position(self.vertex)?;
        for &contour in &self.contours {
            topo.contour_len(contour)?;
        }
        let moved: Vec<Occurrence> = topo
            .occurrences(self.vertex)?
            .iter()
            .filter(|o| self.contours.contains(&o.contour))
            .copied()
            .collect();
        if moved.is_empty() {
            return Ok(None);
        }

        let copy = topo.add_vertex(position);
        for o in moved {
            topo.replace_vertex_in_contour(o.contour, o.slot, Slot::Bound(copy))?;
        }
        Ok(Some(copy))
    }
}
