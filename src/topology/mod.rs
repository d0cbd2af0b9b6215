mod edit;
mod lifecycle;
pub mod params;
pub mod slot;
pub mod vertex;

pub use params::{PlaceholderFill, TopologyParams};
pub use slot::{ContourId, Occurrence, Slot, VertexId};
pub use vertex::VertexData;

use tracing::{trace, warn};

use crate::error::TopologyError;
use crate::geometry::GeometryShape;
use crate::math::Point2;

/// Central index that owns the vertex pool and every contour's occurrences.
///
/// Occurrences are recorded only from the vertex side: each vertex keeps the
/// `(contour, slot)` pairs that reference it, and slots reserved without a
/// vertex are kept on a separate unbound list. A contour's slot sequence is
/// rebuilt on demand by scanning all of them. Every contour also owns a
/// [`GeometryShape`] that mirrors the positions of its slots one to one.
#[derive(Debug, Default)]
pub struct ContourTopology {
    vertices: Vec<VertexData>,
    unbound: Vec<Occurrence>,
    shapes: Vec<GeometryShape>,
    params: TopologyParams,
}

impl ContourTopology {
    /// Creates a new, empty topology.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty topology with the given parameters.
    #[must_use]
    pub fn with_params(params: TopologyParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn params(&self) -> &TopologyParams {
        &self.params
    }

    pub fn set_params(&mut self, params: TopologyParams) {
        self.params = params;
    }

    /// Drops every vertex, unbound slot and contour. Parameters are kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.unbound.clear();
        self.shapes.clear();
    }

    // --- Queries ---

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn contour_count(&self) -> usize {
        self.shapes.len()
    }

    /// All pooled vertices, indexed by [`VertexId::index`].
    #[must_use]
    pub fn vertices(&self) -> &[VertexData] {
        &self.vertices
    }

    /// Returns a reference to the vertex data, or an error if out of range.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the pool.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.check_vertex(id)?;
        Ok(&self.vertices[id.index()])
    }

    /// Returns the position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the pool.
    pub fn vertex_position(&self, id: VertexId) -> Result<Point2, TopologyError> {
        Ok(self.vertex(id)?.position)
    }

    /// Returns every `(contour, slot)` the vertex is bound to.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the pool.
    pub fn occurrences(&self, id: VertexId) -> Result<&[Occurrence], TopologyError> {
        Ok(self.vertex(id)?.occurrences())
    }

    /// Slots that exist but are not bound to any vertex.
    #[must_use]
    pub fn unbound_occurrences(&self) -> &[Occurrence] {
        &self.unbound
    }

    /// Returns the geometry shape mirrored from a contour.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn shape(&self, contour: ContourId) -> Result<&GeometryShape, TopologyError> {
        self.check_contour(contour)?;
        Ok(&self.shapes[contour.index()])
    }

    /// All geometry shapes, indexed by [`ContourId::index`].
    #[must_use]
    pub fn shapes(&self) -> &[GeometryShape] {
        &self.shapes
    }

    /// Rebuilds the slot sequence of a contour, unbound slots included.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn contour_slots(&self, contour: ContourId) -> Result<Vec<Slot>, TopologyError> {
        self.check_contour(contour)?;
        Ok(self.reconstruct(contour))
    }

    /// Rebuilds the vertex sequence of a contour, skipping unbound slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn contour_vertices(&self, contour: ContourId) -> Result<Vec<VertexId>, TopologyError> {
        self.check_contour(contour)?;
        Ok(self
            .reconstruct(contour)
            .into_iter()
            .filter_map(Slot::vertex)
            .collect())
    }

    /// Number of slots in a contour, unbound slots included.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn contour_len(&self, contour: ContourId) -> Result<usize, TopologyError> {
        self.check_contour(contour)?;
        Ok(self.slot_count(contour))
    }

    /// Returns what a single slot is bound to.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist or the slot is out of range.
    pub fn slot(&self, contour: ContourId, slot: usize) -> Result<Slot, TopologyError> {
        self.check_contour(contour)?;
        self.check_slot(contour, slot)?;
        Ok(self.find_slot(contour, slot).unwrap_or(Slot::Unbound))
    }

    /// Returns `true` if the contour has at least three slots and its first
    /// and last slots are bound to the same vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn is_looped(&self, contour: ContourId) -> Result<bool, TopologyError> {
        self.check_contour(contour)?;
        Ok(is_loop(&self.reconstruct(contour)))
    }

    /// Distinct contours a vertex occurs in.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the pool.
    pub fn contours_of(&self, id: VertexId) -> Result<Vec<ContourId>, TopologyError> {
        Ok(self.vertex(id)?.contours())
    }

    // --- Validation ---

    fn check_vertex(&self, id: VertexId) -> Result<(), TopologyError> {
        let count = self.vertices.len();
        if id.index() < count {
            return Ok(());
        }
        warn!(vertex = id.index(), count, "vertex out of range");
        Err(TopologyError::VertexOutOfRange {
            vertex: id.index(),
            count,
        })
    }

    fn check_contour(&self, contour: ContourId) -> Result<(), TopologyError> {
        let count = self.shapes.len();
        if contour.index() < count {
            return Ok(());
        }
        warn!(contour = contour.index(), count, "contour out of range");
        Err(TopologyError::ContourOutOfRange {
            contour: contour.index(),
            count,
        })
    }

    fn check_slot(&self, contour: ContourId, slot: usize) -> Result<(), TopologyError> {
        let len = self.slot_count(contour);
        if slot < len {
            return Ok(());
        }
        warn!(contour = contour.index(), slot, len, "slot out of range");
        Err(TopologyError::SlotOutOfRange {
            contour: contour.index(),
            slot,
            len,
        })
    }

    fn check_target(&self, target: Slot) -> Result<(), TopologyError> {
        match target {
            Slot::Bound(v) => self.check_vertex(v),
            Slot::Unbound => Ok(()),
        }
    }

    // --- Reconstruction ---

    /// Every recorded occurrence paired with what holds it.
    fn all_occurrences(&self) -> impl Iterator<Item = (Slot, Occurrence)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .flat_map(|(i, data)| {
                data.occurrences
                    .iter()
                    .map(move |o| (Slot::Bound(VertexId::new(i)), *o))
            })
            .chain(self.unbound.iter().map(|o| (Slot::Unbound, *o)))
    }

    fn slot_count(&self, contour: ContourId) -> usize {
        self.all_occurrences()
            .filter(|(_, o)| o.contour == contour)
            .map(|(_, o)| o.slot + 1)
            .max()
            .unwrap_or(0)
    }

    fn reconstruct(&self, contour: ContourId) -> Vec<Slot> {
        let mut slots: Vec<Option<Slot>> = vec![None; self.slot_count(contour)];
        for (holder, o) in self.all_occurrences() {
            if o.contour != contour {
                continue;
            }
            let entry = &mut slots[o.slot];
            debug_assert!(
                entry.is_none(),
                "slot {} of {contour} is referenced twice",
                o.slot
            );
            *entry = Some(holder);
        }
        debug_assert!(
            slots.iter().all(Option::is_some),
            "{contour} has a gap in its slots"
        );
        slots
            .into_iter()
            .map(|s| s.unwrap_or(Slot::Unbound))
            .collect()
    }

    fn find_slot(&self, contour: ContourId, slot: usize) -> Option<Slot> {
        self.all_occurrences()
            .find(|(_, o)| o.contour == contour && o.slot == slot)
            .map(|(holder, _)| holder)
    }

    // --- Primitive edits (callers validate) ---

    fn holder_mut(&mut self, holder: Slot) -> &mut Vec<Occurrence> {
        match holder {
            Slot::Bound(v) => &mut self.vertices[v.index()].occurrences,
            Slot::Unbound => &mut self.unbound,
        }
    }

    fn for_each_occurrence_mut(&mut self, mut f: impl FnMut(&mut Occurrence)) {
        for data in &mut self.vertices {
            data.occurrences.iter_mut().for_each(&mut f);
        }
        self.unbound.iter_mut().for_each(f);
    }

    fn retain_occurrences(&mut self, mut keep: impl FnMut(&Occurrence) -> bool) {
        for data in &mut self.vertices {
            data.occurrences.retain(&mut keep);
        }
        self.unbound.retain(keep);
    }

    /// Removes the occurrence at `(contour, slot)` and returns who held it.
    fn take_occurrence(&mut self, contour: ContourId, slot: usize) -> Option<Slot> {
        let target = Occurrence::new(contour, slot);
        for (i, data) in self.vertices.iter_mut().enumerate() {
            if let Some(pos) = data.occurrences.iter().position(|o| *o == target) {
                data.occurrences.swap_remove(pos);
                return Some(Slot::Bound(VertexId::new(i)));
            }
        }
        let pos = self.unbound.iter().position(|o| *o == target)?;
        self.unbound.swap_remove(pos);
        Some(Slot::Unbound)
    }

    /// Moves every slot of `contour` at or above `from` up by one.
    fn shift_up(&mut self, contour: ContourId, from: usize) {
        self.for_each_occurrence_mut(|o| {
            if o.contour == contour && o.slot >= from {
                o.slot += 1;
            }
        });
    }

    /// Moves every slot of `contour` above `removed` down by one.
    fn shift_down(&mut self, contour: ContourId, removed: usize) {
        self.for_each_occurrence_mut(|o| {
            if o.contour == contour && o.slot > removed {
                o.slot -= 1;
            }
        });
    }

    fn placeholder_position(&self, contour: ContourId) -> Point2 {
        let shape = &self.shapes[contour.index()];
        match self.params.placeholder {
            PlaceholderFill::RepeatLast => shape
                .len()
                .checked_sub(1)
                .and_then(|last| shape.get(last))
                .unwrap_or_else(Point2::origin),
            PlaceholderFill::Origin => Point2::origin(),
        }
    }

    /// Binds `target` to `(contour, slot)`, replacing whatever held it.
    fn rebind(&mut self, contour: ContourId, slot: usize, target: Slot) -> Result<(), TopologyError> {
        let previous = self.take_occurrence(contour, slot);
        debug_assert!(previous.is_some(), "slot {slot} of {contour} has no holder");
        self.holder_mut(target).push(Occurrence::new(contour, slot));
        if let Slot::Bound(v) = target {
            let position = self.vertices[v.index()].position;
            self.shapes[contour.index()].set(slot, position)?;
        }
        trace!(%contour, slot, ?previous, ?target, "rebind slot");
        Ok(())
    }

    /// Inserts a new slot bound to `vertex` at `at`, shifting later slots up.
    fn insert_bound(&mut self, contour: ContourId, at: usize, vertex: VertexId) -> Result<(), TopologyError> {
        self.shift_up(contour, at);
        let data = &mut self.vertices[vertex.index()];
        data.occurrences.push(Occurrence::new(contour, at));
        let position = data.position;
        self.shapes[contour.index()].insert(at, position)?;
        trace!(%contour, slot = at, %vertex, "insert slot");
        Ok(())
    }

    /// Appends a new slot at the end of the contour.
    fn push_slot(&mut self, contour: ContourId, target: Slot) -> Result<(), TopologyError> {
        let slot = self.slot_count(contour);
        let position = match target {
            Slot::Bound(v) => self.vertices[v.index()].position,
            Slot::Unbound => self.placeholder_position(contour),
        };
        self.holder_mut(target).push(Occurrence::new(contour, slot));
        let shape = &mut self.shapes[contour.index()];
        debug_assert_eq!(shape.len(), slot, "{contour} shape out of sync");
        shape.insert(slot, position)?;
        trace!(%contour, slot, ?target, "push slot");
        Ok(())
    }

    /// Drops every slot of `contour` at or beyond `len`.
    fn truncate_slots(&mut self, contour: ContourId, len: usize) {
        self.retain_occurrences(|o| o.contour != contour || o.slot < len);
        self.shapes[contour.index()].truncate(len);
    }

    /// Drops the run of unbound slots at the end of the contour.
    fn strip_trailing_unbound(&mut self, contour: ContourId) {
        let slots = self.reconstruct(contour);
        if let Some(start) = trailing_unbound_start(&slots) {
            self.truncate_slots(contour, start);
        }
    }
}

/// Loop test on a rebuilt slot sequence; compares vertex identity, never positions.
fn is_loop(slots: &[Slot]) -> bool {
    slots.len() >= 3 && slots[0].is_bound() && slots.first() == slots.last()
}

/// Index of the first slot in the trailing run of unbound slots.
fn trailing_unbound_start(slots: &[Slot]) -> Option<usize> {
    let run = slots.iter().rev().take_while(|s| !s.is_bound()).count();
    (run > 0).then(|| slots.len() - run)
}
