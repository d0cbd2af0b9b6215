use crate::error::Result;
use crate::math::Point2;
use crate::topology::{ContourId, ContourTopology, VertexId};

enum Source {
    Points(Vec<Point2>),
    Vertices(Vec<VertexId>),
}

/// Creates a contour from fresh points or from vertices already in the pool.
pub struct MakeContour {
    source: Source,
    close: bool,
}

impl MakeContour {
    /// Creates a `MakeContour` operation that adds one new vertex per point.
    #[must_use]
    pub fn from_points(points: Vec<Point2>, close: bool) -> Self {
        Self {
            source: Source::Points(points),
            close,
        }
    }

    /// Creates a `MakeContour` operation over existing vertices, which stay shared.
    #[must_use]
    pub fn from_vertices(vertices: Vec<VertexId>, close: bool) -> Self {
        Self {
            source: Source::Vertices(vertices),
            close,
        }
    }

    /// Executes the operation, creating the contour in the topology.
    ///
    /// An empty source yields a contour holding one unbound slot.
    ///
    /// # Errors
    ///
    /// Returns an error, before anything is created, if a vertex ID is out of range.
    pub fn execute(&self, topo: &mut ContourTopology) -> Result<ContourId> {
        let (contour, ids) = match &self.source {
            Source::Vertices(ids) => {
                for &id in ids {
                    topo.vertex(id)?;
                }
                let contour = topo.add_contour();
                (contour, ids.clone())
            }
            Source::Points(points) => {
                let contour = topo.add_contour();
                let ids: Vec<VertexId> = points.iter().map(|&p| topo.add_vertex(p)).collect();
                (contour, ids)
            }
        };
        let empty = ids.is_empty();
        for id in ids {
            topo.append_vertex_to_contour(contour, id, false)?;
        }
        if self.close && !empty {
            topo.set_loop(contour, true)?;
        }
        Ok(contour)
    }
}
