use crate::error::Result;
use crate::math::polygon_2d::centroid_2d;
use crate::math::Point2;
use crate::topology::{ContourId, ContourTopology};

/// Computes the centroid of the distinct vertices bound in a contour.
///
/// Unlike [`GeometryShape::center`](crate::geometry::GeometryShape::center),
/// a vertex visited twice (such as the closing vertex of a loop) counts once,
/// and unbound placeholders are ignored.
pub struct ContourCenter {
    contour: ContourId,
}

impl ContourCenter {
    /// Creates a new `ContourCenter` query.
    #[must_use]
    pub fn new(contour: ContourId) -> Self {
        Self { contour }
    }

    /// Executes the query. Returns `None` when no vertex is bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn execute(&self, topo: &ContourTopology) -> Result<Option<Point2>> {
        let mut vertices = topo.contour_vertices(self.contour)?;
        vertices.sort_unstable();
        vertices.dedup();
        let points = vertices
            .into_iter()
            .map(|v| topo.vertex_position(v))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(centroid_2d(&points))
    }
}
