use crate::error::Result;
use crate::topology::{ContourId, ContourTopology};

/// Reverses the slot order of a contour.
///
/// Slots `i` and `len - 1 - i` are swapped pairwise; the middle slot of an
/// odd-length contour stays put. Unbound slots keep their last position.
pub struct ReverseContour {
    contour: ContourId,
}

impl ReverseContour {
    /// Creates a new `ReverseContour` operation.
    #[must_use]
    pub fn new(contour: ContourId) -> Self {
        Self { contour }
    }

    /// Executes the reversal.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn execute(&self, topo: &mut ContourTopology) -> Result<()> {
        let slots = topo.contour_slots(self.contour)?;
        let len = slots.len();
        for i in 0..len / 2 {
            let j = len - 1 - i;
            topo.replace_vertex_in_contour(self.contour, i, slots[j])?;
            topo.replace_vertex_in_contour(self.contour, j, slots[i])?;
        }
        Ok(())
    }
}
