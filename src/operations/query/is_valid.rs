use crate::topology::{ContourId, ContourTopology, Slot, VertexId};

/// A broken invariant found by [`IsValid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    /// An occurrence names a contour that does not exist.
    UnknownContour { contour: ContourId },
    /// Two holders claim the same slot.
    DuplicateSlot {
        contour: ContourId,
        slot: usize,
        first: Slot,
        second: Slot,
    },
    /// No holder claims a slot below the contour length.
    MissingSlot { contour: ContourId, slot: usize },
    /// The shape length differs from the number of slots.
    ShapeLength {
        contour: ContourId,
        slots: usize,
        shape: usize,
    },
}

/// Checks the occurrence index and the geometry shapes against each other.
///
/// Works on the raw occurrence lists, so it also reports states that slot
/// reconstruction would refuse.
#[derive(Debug, Default)]
pub struct IsValid;

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the validation, returning `true` if no issue was found.
    #[must_use]
    pub fn execute(&self, topo: &ContourTopology) -> bool {
        self.issues(topo).is_empty()
    }

    /// Lists every broken invariant.
    #[must_use]
    pub fn issues(&self, topo: &ContourTopology) -> Vec<ConsistencyIssue> {
        let count = topo.contour_count();
        let mut table: Vec<Vec<Option<Slot>>> = vec![Vec::new(); count];
        let mut issues = Vec::new();

        let bound = topo.vertices().iter().enumerate().flat_map(|(i, data)| {
            data.occurrences()
                .iter()
                .map(move |o| (Slot::Bound(VertexId::new(i)), *o))
        });
        let unbound = topo.unbound_occurrences().iter().map(|o| (Slot::Unbound, *o));

        for (holder, o) in bound.chain(unbound) {
            let Some(slots) = table.get_mut(o.contour.index()) else {
                issues.push(ConsistencyIssue::UnknownContour { contour: o.contour });
                continue;
            };
            if slots.len() <= o.slot {
                slots.resize(o.slot + 1, None);
            }
            match slots[o.slot] {
                Some(first) => issues.push(ConsistencyIssue::DuplicateSlot {
                    contour: o.contour,
                    slot: o.slot,
                    first,
                    second: holder,
                }),
                None => slots[o.slot] = Some(holder),
            }
        }

        for (i, slots) in table.iter().enumerate() {
            let contour = ContourId::new(i);
            for (slot, entry) in slots.iter().enumerate() {
                if entry.is_none() {
                    issues.push(ConsistencyIssue::MissingSlot { contour, slot });
                }
            }
            let shape = topo.shapes()[i].len();
            if shape != slots.len() {
                issues.push(ConsistencyIssue::ShapeLength {
                    contour,
                    slots: slots.len(),
                    shape,
                });
            }
        }
        issues
    }
}
