//! Creation and destruction of vertices and contours.

use tracing::debug;

use super::{ContourId, ContourTopology, Occurrence, VertexData, VertexId};
use crate::error::TopologyError;
use crate::geometry::{GeometryShape, ShapeChanges};
use crate::math::{Point2, Vector3};

impl ContourTopology {
    // --- Vertices ---

    /// Adds an unreferenced vertex to the pool and returns its ID.
    pub fn add_vertex(&mut self, position: Point2) -> VertexId {
        self.vertices.push(VertexData::new(position));
        VertexId::new(self.vertices.len() - 1)
    }

    /// Removes a vertex from every contour it occurs in, then from the pool.
    ///
    /// Every vertex with a higher index moves down by one.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the pool.
    pub fn destroy_vertex(&mut self, vertex: VertexId) -> Result<(), TopologyError> {
        self.check_vertex(vertex)?;
        let preserve_loop = self.params.preserve_loops;
        for contour in self.vertices[vertex.index()].contours() {
            self.remove_vertex_from_contour(vertex, contour, preserve_loop)?;
        }
        self.vertices.remove(vertex.index());
        debug!(%vertex, "destroyed vertex");
        Ok(())
    }

    /// Destroys several vertices, given by their IDs before the call.
    ///
    /// Duplicate IDs are destroyed once. Returns how many vertices were removed.
    ///
    /// # Errors
    ///
    /// Returns an error, without destroying anything, if any ID is out of range.
    pub fn destroy_vertices(&mut self, vertices: &[VertexId]) -> Result<usize, TopologyError> {
        for &vertex in vertices {
            self.check_vertex(vertex)?;
        }
        let ordered = descending_unique(vertices);
        for &vertex in &ordered {
            self.destroy_vertex(vertex)?;
        }
        Ok(ordered.len())
    }

    /// Removes every vertex that no contour references. Returns how many were removed.
    pub fn destroy_all_contourless_vertices(&mut self) -> usize {
        let before = self.vertices.len();
        self.vertices.retain(VertexData::is_referenced);
        let removed = before - self.vertices.len();
        if removed > 0 {
            debug!(removed, "destroyed contourless vertices");
        }
        removed
    }

    // --- Contours ---

    /// Adds a contour holding a single unbound slot and returns its ID.
    pub fn add_contour(&mut self) -> ContourId {
        let contour = ContourId::new(self.shapes.len());
        let mut shape = GeometryShape::new();
        shape.push(Point2::origin());
        self.shapes.push(shape);
        self.unbound.push(Occurrence::new(contour, 0));
        debug!(%contour, "added contour");
        contour
    }

    /// Removes a contour and its shape. Higher contour IDs move down by one.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn remove_contour(&mut self, contour: ContourId) -> Result<(), TopologyError> {
        self.check_contour(contour)?;
        self.retain_occurrences(|o| o.contour != contour);
        self.for_each_occurrence_mut(|o| {
            if o.contour > contour {
                o.contour = ContourId::new(o.contour.index() - 1);
            }
        });
        self.shapes.remove(contour.index());
        debug!(%contour, "removed contour");
        Ok(())
    }

    /// Removes several contours, given by their IDs before the call.
    ///
    /// Duplicate IDs are removed once. Returns how many contours were removed.
    ///
    /// # Errors
    ///
    /// Returns an error, without removing anything, if any ID is out of range.
    pub fn remove_contours(&mut self, contours: &[ContourId]) -> Result<usize, TopologyError> {
        for &contour in contours {
            self.check_contour(contour)?;
        }
        let ordered = descending_unique(contours);
        for &contour in &ordered {
            self.remove_contour(contour)?;
        }
        Ok(ordered.len())
    }

    /// Removes every contour with no bound vertex. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the index is internally inconsistent.
    pub fn destroy_all_pointless_contours(&mut self) -> Result<usize, TopologyError> {
        let mut has_vertex = vec![false; self.shapes.len()];
        for data in &self.vertices {
            for o in &data.occurrences {
                has_vertex[o.contour.index()] = true;
            }
        }
        let pointless: Vec<ContourId> = has_vertex
            .iter()
            .enumerate()
            .filter(|&(_, &bound)| !bound)
            .map(|(i, _)| ContourId::new(i))
            .collect();
        self.remove_contours(&pointless)
    }

    // --- Shape hand-off ---

    /// Returns the pending changes of a contour's shape and clears them.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn take_shape_changes(&mut self, contour: ContourId) -> Result<ShapeChanges, TopologyError> {
        self.check_contour(contour)?;
        Ok(self.shapes[contour.index()].take_changes())
    }

    /// Sets the normal of a contour's shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn set_shape_normal(&mut self, contour: ContourId, normal: Vector3) -> Result<(), TopologyError> {
        self.check_contour(contour)?;
        self.shapes[contour.index()].set_normal(normal);
        Ok(())
    }
}

/// Sorts IDs from highest to lowest and drops repeats, so that removing them
/// one by one never invalidates an ID still waiting in the list.
fn descending_unique<T: Ord + Copy>(ids: &[T]) -> Vec<T> {
    let mut ordered = ids.to_vec();
    ordered.sort_unstable_by(|a, b| b.cmp(a));
    ordered.dedup();
    ordered
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::IsValid;
    use crate::topology::Slot;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn assert_consistent(topo: &ContourTopology) {
        let issues = IsValid::new().issues(topo);
        assert!(issues.is_empty(), "{issues:?}");
    }

    /// Three contours of three vertices each; contour `i` uses vertices `3i..3i+3`.
    fn three_contours() -> ContourTopology {
        let mut topo = ContourTopology::new();
        for i in 0..3 {
            let c = topo.add_contour();
            for j in 0..3 {
                #[allow(clippy::cast_precision_loss)]
                let v = topo.add_vertex(p(j as f64, i as f64));
                topo.append_vertex_to_contour(c, v, true).unwrap();
            }
        }
        topo
    }

    fn all_permutations(items: &[usize]) -> Vec<Vec<usize>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in all_permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn add_contour_starts_with_one_unbound_slot() {
        let mut topo = ContourTopology::new();
        let c = topo.add_contour();
        assert_eq!(c, ContourId::new(0));
        assert_eq!(topo.contour_slots(c).unwrap(), vec![Slot::Unbound]);
        assert_eq!(topo.shape(c).unwrap().len(), 1);
        assert!(topo.contour_vertices(c).unwrap().is_empty());
        assert_eq!(
            topo.take_shape_changes(c).unwrap(),
            ShapeChanges::LENGTH_CHANGED
        );
        assert_consistent(&topo);
    }

    #[test]
    fn add_vertex_has_no_occurrences() {
        let mut topo = ContourTopology::new();
        let a = topo.add_vertex(p(1.0, 2.0));
        let b = topo.add_vertex(p(3.0, 4.0));
        assert_eq!(a, VertexId::new(0));
        assert_eq!(b, VertexId::new(1));
        assert!(topo.occurrences(b).unwrap().is_empty());
        assert_eq!(topo.vertex_position(b).unwrap(), p(3.0, 4.0));
    }

    #[test]
    fn destroy_vertex_removes_occurrences_and_renumbers() {
        let mut topo = three_contours();
        let c0 = ContourId::new(0);
        topo.destroy_vertex(VertexId::new(1)).unwrap();

        assert_eq!(topo.vertex_count(), 8);
        assert_eq!(
            topo.contour_vertices(c0).unwrap(),
            vec![VertexId::new(0), VertexId::new(1)]
        );
        assert_eq!(topo.vertex_position(VertexId::new(1)).unwrap(), p(2.0, 0.0));
        assert_eq!(
            topo.contour_vertices(ContourId::new(2)).unwrap(),
            vec![VertexId::new(5), VertexId::new(6), VertexId::new(7)]
        );
        assert_consistent(&topo);
    }

    #[test]
    fn destroy_vertex_keeps_loop_closed() {
        let mut topo = three_contours();
        let c0 = ContourId::new(0);
        topo.set_loop(c0, true).unwrap();
        topo.destroy_vertex(VertexId::new(0)).unwrap();

        assert_eq!(
            topo.contour_vertices(c0).unwrap(),
            vec![VertexId::new(0), VertexId::new(1), VertexId::new(0)]
        );
        assert!(topo.is_looped(c0).unwrap());
        assert_consistent(&topo);
    }

    #[test]
    fn destroy_vertices_handles_every_order_and_duplicates() {
        let requests = [0, 4, 4, 8];
        for order in all_permutations(&requests) {
            let mut topo = three_contours();
            let ids: Vec<VertexId> = order.iter().map(|&i| VertexId::new(i)).collect();
            assert_eq!(topo.destroy_vertices(&ids).unwrap(), 3, "{order:?}");
            assert_eq!(topo.vertex_count(), 6);

            let positions: Vec<Point2> = topo.vertices().iter().map(|v| v.position).collect();
            assert_eq!(
                positions,
                vec![
                    p(1.0, 0.0),
                    p(2.0, 0.0),
                    p(0.0, 1.0),
                    p(2.0, 1.0),
                    p(0.0, 2.0),
                    p(1.0, 2.0),
                ],
                "{order:?}"
            );
            for c in 0..3 {
                assert_eq!(topo.contour_len(ContourId::new(c)).unwrap(), 2);
            }
            assert_consistent(&topo);
        }
    }

    #[test]
    fn destroy_vertices_rejects_bad_id_without_mutation() {
        let mut topo = three_contours();
        let err = topo
            .destroy_vertices(&[VertexId::new(2), VertexId::new(42)])
            .unwrap_err();
        assert_eq!(err, TopologyError::VertexOutOfRange { vertex: 42, count: 9 });
        assert_eq!(topo.vertex_count(), 9);
    }

    #[test]
    fn contourless_vertices_are_compacted() {
        let mut topo = three_contours();
        let stray = topo.add_vertex(p(9.0, 9.0));
        topo.remove_vertex_from_contour(VertexId::new(4), ContourId::new(1), true)
            .unwrap();
        assert_eq!(stray, VertexId::new(9));

        assert_eq!(topo.destroy_all_contourless_vertices(), 2);
        assert_eq!(topo.vertex_count(), 8);
        assert!(topo.vertices().iter().all(VertexData::is_referenced));
        assert_eq!(
            topo.contour_vertices(ContourId::new(2)).unwrap(),
            vec![VertexId::new(5), VertexId::new(6), VertexId::new(7)]
        );
        assert_eq!(topo.destroy_all_contourless_vertices(), 0);
        assert_consistent(&topo);
    }

    #[test]
    fn remove_contour_renumbers_higher_contours() {
        let mut topo = three_contours();
        topo.remove_contour(ContourId::new(1)).unwrap();

        assert_eq!(topo.contour_count(), 2);
        let former_two = ContourId::new(1);
        assert_eq!(
            topo.contour_vertices(former_two).unwrap(),
            vec![VertexId::new(6), VertexId::new(7), VertexId::new(8)]
        );
        for i in 6..9 {
            assert_eq!(
                topo.contours_of(VertexId::new(i)).unwrap(),
                vec![former_two]
            );
        }
        assert!(topo.occurrences(VertexId::new(4)).unwrap().is_empty());
        assert_eq!(topo.shape(former_two).unwrap().get(0), Some(p(0.0, 2.0)));
        assert_consistent(&topo);
    }

    #[test]
    fn remove_contour_drops_unbound_slots() {
        let mut topo = ContourTopology::new();
        let c0 = topo.add_contour();
        let c1 = topo.add_contour();
        topo.remove_contour(c0).unwrap();
        assert_eq!(topo.unbound_occurrences(), &[Occurrence::new(c0, 0)]);
        assert!(topo.remove_contour(c1).is_err());
    }

    #[test]
    fn remove_contours_handles_every_order_and_duplicates() {
        let requests = [0, 2, 2];
        for order in all_permutations(&requests) {
            let mut topo = three_contours();
            let ids: Vec<ContourId> = order.iter().map(|&i| ContourId::new(i)).collect();
            assert_eq!(topo.remove_contours(&ids).unwrap(), 2, "{order:?}");
            assert_eq!(topo.contour_count(), 1);
            assert_eq!(
                topo.contour_vertices(ContourId::new(0)).unwrap(),
                vec![VertexId::new(3), VertexId::new(4), VertexId::new(5)],
                "{order:?}"
            );
            assert_consistent(&topo);
        }
    }

    #[test]
    fn pointless_contours_are_compacted() {
        let mut topo = three_contours();
        let empty = topo.add_contour();
        topo.set_contour_length(empty, 3, false).unwrap();
        for i in 3..6 {
            topo.remove_vertex_from_contour(VertexId::new(i), ContourId::new(1), true)
                .unwrap();
        }
        assert_eq!(topo.contour_len(ContourId::new(1)).unwrap(), 0);

        assert_eq!(topo.destroy_all_pointless_contours().unwrap(), 2);
        assert_eq!(topo.contour_count(), 2);
        assert!(topo.unbound_occurrences().is_empty());
        assert_eq!(
            topo.contours_of(VertexId::new(7)).unwrap(),
            vec![ContourId::new(1)]
        );
        assert_consistent(&topo);
    }

    #[test]
    fn shape_normal_hand_off() {
        let mut topo = ContourTopology::new();
        let c = topo.add_contour();
        topo.take_shape_changes(c).unwrap();
        topo.set_shape_normal(c, Vector3::new(0.0, 0.0, -2.0)).unwrap();
        assert_eq!(topo.shape(c).unwrap().normal(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(
            topo.take_shape_changes(c).unwrap(),
            ShapeChanges::NORMAL_CHANGED
        );
        assert!(topo.take_shape_changes(c).unwrap().is_empty());
        assert!(topo.set_shape_normal(ContourId::new(1), Vector3::z()).is_err());
    }
}
