//! Slot-level edits on a single contour.

use tracing::{debug, trace};

use super::{is_loop, trailing_unbound_start, ContourId, ContourTopology, Slot, VertexId};
use crate::error::TopologyError;
use crate::math::Point2;

impl ContourTopology {
    /// Moves a vertex and marks every shape it occurs in as stale.
    ///
    /// Shape positions are rewritten by [`sync_positions`](Self::sync_positions).
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not in the pool.
    pub fn move_vertex(&mut self, vertex: VertexId, position: Point2) -> Result<(), TopologyError> {
        self.check_vertex(vertex)?;
        let data = &mut self.vertices[vertex.index()];
        data.position = position;
        for contour in data.contours() {
            self.shapes[contour.index()].mark_stale();
        }
        Ok(())
    }

    /// Rewrites the positions of one contour's shape if a vertex moved.
    ///
    /// Returns `true` if the shape was stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn sync_contour(&mut self, contour: ContourId) -> Result<bool, TopologyError> {
        self.check_contour(contour)?;
        if !self.shapes[contour.index()].is_stale() {
            return Ok(false);
        }
        let slots = self.reconstruct(contour);
        let shape = &mut self.shapes[contour.index()];
        for (i, slot) in slots.iter().enumerate() {
            if let Slot::Bound(v) = slot {
                shape.set(i, self.vertices[v.index()].position)?;
            }
        }
        shape.clear_stale();
        Ok(true)
    }

    /// Rewrites every stale shape and returns how many were refreshed.
    ///
    /// # Errors
    ///
    /// Returns an error only if a shape has fallen out of sync with the index.
    pub fn sync_positions(&mut self) -> Result<usize, TopologyError> {
        let mut refreshed = 0;
        for i in 0..self.shapes.len() {
            if self.sync_contour(ContourId::new(i))? {
                refreshed += 1;
            }
        }
        Ok(refreshed)
    }

    /// Appends a vertex to a contour.
    ///
    /// On a looped contour with `preserve_loop`, the vertex goes just before
    /// the closing duplicate. Otherwise it fills the first slot of a trailing
    /// unbound run, or a new slot is created at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour or vertex does not exist.
    pub fn append_vertex_to_contour(
        &mut self,
        contour: ContourId,
        vertex: VertexId,
        preserve_loop: bool,
    ) -> Result<(), TopologyError> {
        self.check_contour(contour)?;
        self.check_vertex(vertex)?;
        let slots = self.reconstruct(contour);
        if preserve_loop && is_loop(&slots) {
            return self.insert_bound(contour, slots.len() - 1, vertex);
        }
        match trailing_unbound_start(&slots) {
            Some(slot) => self.rebind(contour, slot, Slot::Bound(vertex)),
            None => self.push_slot(contour, Slot::Bound(vertex)),
        }
    }

    /// Inserts a vertex at `at`.
    ///
    /// A bound slot is pushed up together with every later slot; an unbound
    /// slot is simply filled.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour or vertex does not exist, or `at` is
    /// not an existing slot.
    pub fn insert_vertex_in_contour(
        &mut self,
        contour: ContourId,
        at: usize,
        vertex: VertexId,
    ) -> Result<(), TopologyError> {
        self.check_contour(contour)?;
        self.check_vertex(vertex)?;
        self.check_slot(contour, at)?;
        match self.find_slot(contour, at) {
            Some(Slot::Unbound) => self.rebind(contour, at, Slot::Bound(vertex)),
            _ => self.insert_bound(contour, at, vertex),
        }
    }

    /// Removes every occurrence of a vertex from a contour, closing the gaps.
    ///
    /// If the vertex held the ends of a loop and `preserve_loop` is set, the
    /// loop is closed again on the new first vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour or vertex does not exist.
    pub fn remove_vertex_from_contour(
        &mut self,
        vertex: VertexId,
        contour: ContourId,
        preserve_loop: bool,
    ) -> Result<(), TopologyError> {
        self.check_vertex(vertex)?;
        self.check_contour(contour)?;
        let restore_loop = preserve_loop && {
            let slots = self.reconstruct(contour);
            is_loop(&slots) && slots[0] == Slot::Bound(vertex)
        };

        let mut removed = 0;
        loop {
            let occurrences = &mut self.vertices[vertex.index()].occurrences;
            let Some(pos) = occurrences.iter().position(|o| o.contour == contour) else {
                break;
            };
            let slot = occurrences.swap_remove(pos).slot;
            self.shift_down(contour, slot);
            self.shapes[contour.index()].remove_range(slot, 1)?;
            removed += 1;
        }
        if removed == 0 {
            return Ok(());
        }
        trace!(%vertex, %contour, removed, "removed vertex from contour");

        if restore_loop {
            let slots = self.reconstruct(contour);
            if let [Slot::Bound(first), .., last] = slots[..] {
                if last != Slot::Bound(first) {
                    self.push_slot(contour, Slot::Bound(first))?;
                }
            }
        }
        Ok(())
    }

    /// Rebinds a single slot.
    ///
    /// A real vertex overwrites the shape entry with its position. Binding
    /// [`Slot::Unbound`] leaves the last written position in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour, slot or vertex does not exist.
    pub fn replace_vertex_in_contour(
        &mut self,
        contour: ContourId,
        slot: usize,
        target: Slot,
    ) -> Result<(), TopologyError> {
        self.check_contour(contour)?;
        self.check_slot(contour, slot)?;
        self.check_target(target)?;
        self.rebind(contour, slot, target)
    }

    /// Resizes a contour.
    ///
    /// Trailing unbound slots are stripped first. Shrinking a looped contour
    /// with `preserve_loop` keeps it closed; growing appends unbound slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn set_contour_length(
        &mut self,
        contour: ContourId,
        len: usize,
        preserve_loop: bool,
    ) -> Result<(), TopologyError> {
        self.check_contour(contour)?;
        self.strip_trailing_unbound(contour);
        let slots = self.reconstruct(contour);

        if len < slots.len() {
            match slots.first() {
                Some(&Slot::Bound(first)) if preserve_loop && is_loop(&slots) && len >= 3 => {
                    self.truncate_slots(contour, len - 1);
                    self.push_slot(contour, Slot::Bound(first))?;
                }
                _ => self.truncate_slots(contour, len),
            }
        } else {
            for _ in slots.len()..len {
                self.push_slot(contour, Slot::Unbound)?;
            }
        }
        debug!(%contour, len, "set contour length");
        Ok(())
    }

    /// Opens or closes a contour.
    ///
    /// Closing appends the first vertex as a new last slot; opening drops the
    /// closing duplicate.
    ///
    /// # Errors
    ///
    /// Returns an error if the contour does not exist.
    pub fn set_loop(&mut self, contour: ContourId, looped: bool) -> Result<(), TopologyError> {
        self.check_contour(contour)?;
        self.strip_trailing_unbound(contour);
        let slots = self.reconstruct(contour);
        let currently = is_loop(&slots);

        if looped && !currently {
            match slots.first() {
                Some(&Slot::Bound(first)) if slots.len() >= 2 => {
                    self.push_slot(contour, Slot::Bound(first))?;
                }
                _ => debug!(%contour, len = slots.len(), "contour too short to close"),
            }
        } else if !looped && currently {
            self.truncate_slots(contour, slots.len() - 1);
        }
        Ok(())
    }
}
