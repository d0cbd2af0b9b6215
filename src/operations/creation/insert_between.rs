use crate::error::Result;
use crate::math::polygon_2d::midpoint_2d;
use crate::topology::{ContourId, ContourTopology, Slot, VertexId};

/// Splits every edge between two vertices with a new shared midpoint vertex.
///
/// In each listed contour, wherever `a` and `b` sit in adjacent slots (in
/// either order) the new vertex is inserted between them. A pair that is
/// adjacent several times in one contour is split every time. All splits
/// share a single new vertex.
pub struct InsertVertexBetween {
    contours: Vec<ContourId>,
    a: VertexId,
    b: VertexId,
}

impl InsertVertexBetween {
    /// Creates a new `InsertVertexBetween` operation.
    #[must_use]
    pub fn new(contours: Vec<ContourId>, a: VertexId, b: VertexId) -> Self {
        Self { contours, a, b }
    }

    /// Executes the operation, returning the new vertex if any edge was split.
    ///
    /// # Errors
    ///
    /// Returns an error, before any edit, if a vertex or contour ID is out of range.
    pub fn execute(&self, topo: &mut ContourTopology) -> Result<Option<VertexId>> {
        let pa = topo.vertex_position(self.a)?;
        let pb = topo.vertex_position(self.b)?;
        for &contour in &self.contours {
            topo.contour_len(contour)?;
        }

        let mut inserted = None;
        for &contour in &self.contours {
            while let Some(at) = self.next_split(&topo.contour_slots(contour)?) {
                let vertex = *inserted.get_or_insert_with(|| topo.add_vertex(midpoint_2d(&pa, &pb)));
                topo.insert_vertex_in_contour(contour, at, vertex)?;
            }
        }
        Ok(inserted)
    }

    /// Higher slot of the first adjacent `a`/`b` pair.
    fn next_split(&self, slots: &[Slot]) -> Option<usize> {
        let (a, b) = (Slot::Bound(self.a), Slot::Bound(self.b));
        slots
            .windows(2)
            .position(|w| (w[0] == a && w[1] == b) || (w[0] == b && w[1] == a))
            .map(|i| i + 1)
    }
}
