use std::collections::HashSet;

use crate::error::Result;
use crate::topology::{ContourTopology, Slot, VertexId};

/// Merges several vertices into one new vertex holding all of their occurrences.
///
/// The merged vertex takes the position of the first input vertex. Every
/// slot that referenced an input vertex is rebound to it, and the inputs are
/// destroyed afterwards, which renumbers the pool.
pub struct MergeVertices {
    vertices: Vec<VertexId>,
}

impl MergeVertices {
    /// Creates a new `MergeVertices` operation.
    #[must_use]
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self { vertices }
    }

    /// Executes the merge, returning the ID of the merged vertex after renumbering.
    ///
    /// Fewer than two distinct vertices is a no-op and yields `None`.
    ///
    /// # Errors
    ///
    /// Returns an error, before any edit, if a vertex ID is out of range.
    pub fn execute(&self, topo: &mut ContourTopology) -> Result<Option<VertexId>> {
        let mut seen = HashSet::new();
        let inputs: Vec<VertexId> = self
            .vertices
            .iter()
            .copied()
            .filter(|v| seen.insert(*v))
            .collect();
        if inputs.len() < 2 {
            return Ok(None);
        }
        for &vertex in &inputs {
            topo.vertex(vertex)?;
        }

        let merged = topo.add_vertex(topo.vertex_position(inputs[0])?);
        for &vertex in &inputs {
            let occurrences = topo.occurrences(vertex)?.to_vec();
            for o in occurrences {
                topo.replace_vertex_in_contour(o.contour, o.slot, Slot::Bound(merged))?;
            }
        }
        let destroyed = topo.destroy_vertices(&inputs)?;
        Ok(Some(VertexId::new(merged.index() - destroyed)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::creation::MakeContour;
    use crate::operations::query::IsValid;
    use crate::topology::{ContourId, Occurrence};

    #[test]
    fn merge_keeps_every_occurrence() {
        let mut topo = ContourTopology::new();
        let c0 = MakeContour::from_points(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(2.0, 0.0),
            ],
            false,
        )
        .execute(&mut topo)
        .unwrap();
        let c1 = MakeContour::from_points(
            vec![Point2::new(5.0, 5.0), Point2::new(6.0, 5.0)],
            false,
        )
        .execute(&mut topo)
        .unwrap();
        let va = topo.contour_vertices(c0).unwrap()[2];
        let vb = topo.contour_vertices(c1).unwrap()[0];

        let merged = MergeVertices::new(vec![va, vb])
            .execute(&mut topo)
            .unwrap()
            .unwrap();

        assert_eq!(topo.vertex_count(), 4);
        assert_eq!(merged, VertexId::new(3));
        let mut occurrences = topo.occurrences(merged).unwrap().to_vec();
        occurrences.sort_unstable();
        assert_eq!(
            occurrences,
            vec![Occurrence::new(c0, 2), Occurrence::new(c1, 0)]
        );
        assert_eq!(topo.contour_vertices(c0).unwrap()[2], merged);
        assert_eq!(topo.contour_vertices(c1).unwrap()[0], merged);
        assert!(topo.vertex(VertexId::new(4)).is_err());

        assert_eq!(topo.vertex_position(merged).unwrap(), Point2::new(2.0, 0.0));
        assert_eq!(topo.shape(c1).unwrap().get(0), Some(Point2::new(2.0, 0.0)));
        assert!(IsValid::new().execute(&topo));
    }

    #[test]
    fn merge_of_adjacent_vertices_keeps_both_slots() {
        let mut topo = ContourTopology::new();
        let c = MakeContour::from_points(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(2.0, 0.0),
            ],
            true,
        )
        .execute(&mut topo)
        .unwrap();
        let merged = MergeVertices::new(vec![VertexId::new(0), VertexId::new(1)])
            .execute(&mut topo)
            .unwrap()
            .unwrap();

        assert_eq!(merged, VertexId::new(1));
        assert_eq!(
            topo.contour_vertices(c).unwrap(),
            vec![merged, merged, VertexId::new(0), merged]
        );
        assert!(topo.is_looped(c).unwrap());
        assert!(IsValid::new().execute(&topo));
    }

    #[test]
    fn fewer_than_two_distinct_is_noop() {
        let mut topo = ContourTopology::new();
        let v = topo.add_vertex(Point2::new(0.0, 0.0));
        assert!(MergeVertices::new(vec![v]).execute(&mut topo).unwrap().is_none());
        assert!(MergeVertices::new(vec![v, v]).execute(&mut topo).unwrap().is_none());
        assert!(MergeVertices::new(Vec::new())
            .execute(&mut topo)
            .unwrap()
            .is_none());
        assert_eq!(topo.vertex_count(), 1);
    }

    #[test]
    fn unknown_vertex_fails_before_edit() {
        let mut topo = ContourTopology::new();
        let c = topo.add_contour();
        let v = topo.add_vertex(Point2::new(0.0, 0.0));
        topo.append_vertex_to_contour(c, v, true).unwrap();
        let result = MergeVertices::new(vec![v, VertexId::new(9)]).execute(&mut topo);
        assert!(result.is_err());
        assert_eq!(topo.vertex_count(), 1);
        assert_eq!(topo.contour_vertices(ContourId::new(0)).unwrap(), vec![v]);
    }
}
