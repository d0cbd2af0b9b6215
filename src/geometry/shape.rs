use bitflags::bitflags;

use crate::error::ShapeError;
use crate::math::polygon_2d::centroid_2d;
use crate::math::{Point2, Vector3};

bitflags! {
    /// Pending changes of a [`GeometryShape`], polled and cleared by downstream builders.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShapeChanges: u8 {
        /// At least one position was rewritten.
        const POSITION_MOVED = 1 << 0;
        /// Entries were inserted or removed.
        const LENGTH_CHANGED = 1 << 1;
        /// The normal was replaced.
        const NORMAL_CHANGED = 1 << 2;
    }
}

/// Ordered sequence of 2D positions mirrored from a contour.
///
/// A shape knows nothing about vertices or sharing; it only stores the
/// positions in slot order, a unit normal, and the change flags raised by
/// every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryShape {
    positions: Vec<Point2>,
    normal: Vector3,
    changes: ShapeChanges,
    /// Set when a bound vertex moved and the positions have not been rewritten yet.
    stale: bool,
}

impl Default for GeometryShape {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryShape {
    /// Creates an empty shape facing +Z.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normal: Vector3::z(),
            changes: ShapeChanges::empty(),
            stale: false,
        }
    }

    /// Creates a shape holding the given positions.
    #[must_use]
    pub fn from_positions(positions: Vec<Point2>) -> Self {
        Self {
            positions,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the position stored at `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<Point2> {
        self.positions.get(slot).copied()
    }

    /// Returns all positions in slot order.
    #[must_use]
    pub fn positions(&self) -> &[Point2] {
        &self.positions
    }

    /// Overwrites the position at `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if `slot` is out of range.
    pub fn set(&mut self, slot: usize, position: Point2) -> Result<(), ShapeError> {
        let len = self.positions.len();
        let entry = self
            .positions
            .get_mut(slot)
            .ok_or(ShapeError::SlotOutOfRange { slot, len })?;
        *entry = position;
        self.changes |= ShapeChanges::POSITION_MOVED;
        Ok(())
    }

    /// Inserts a position before `slot`. `slot == len` appends.
    ///
    /// # Errors
    ///
    /// Returns an error if `slot > len`.
    pub fn insert(&mut self, slot: usize, position: Point2) -> Result<(), ShapeError> {
        let len = self.positions.len();
        if slot > len {
            return Err(ShapeError::SlotOutOfRange { slot, len });
        }
        self.positions.insert(slot, position);
        self.changes |= ShapeChanges::LENGTH_CHANGED;
        Ok(())
    }

    /// Appends a position at the end.
    pub fn push(&mut self, position: Point2) {
        self.positions.push(position);
        self.changes |= ShapeChanges::LENGTH_CHANGED;
    }

    /// Removes `count` positions starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range does not lie within the shape.
    pub fn remove_range(&mut self, start: usize, count: usize) -> Result<(), ShapeError> {
        let len = self.positions.len();
        let end = start
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or(ShapeError::RangeOutOfBounds { start, count, len })?;
        if count == 0 {
            return Ok(());
        }
        self.positions.drain(start..end);
        self.changes |= ShapeChanges::LENGTH_CHANGED;
        Ok(())
    }

    /// Drops every position at or beyond `len`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.positions.len() {
            self.positions.truncate(len);
            self.changes |= ShapeChanges::LENGTH_CHANGED;
        }
    }

    /// Average of all stored positions, or `None` when empty.
    #[must_use]
    pub fn center(&self) -> Option<Point2> {
        centroid_2d(&self.positions)
    }

    #[must_use]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Replaces the normal. Zero-length input is ignored.
    pub fn set_normal(&mut self, normal: Vector3) {
        let Some(unit) = normal.try_normalize(crate::math::TOLERANCE) else {
            return;
        };
        self.normal = unit;
        self.changes |= ShapeChanges::NORMAL_CHANGED;
    }

    /// Changes raised since the last [`take_changes`](Self::take_changes).
    #[must_use]
    pub fn changes(&self) -> ShapeChanges {
        self.changes
    }

    /// Returns the pending changes and clears them.
    pub fn take_changes(&mut self) -> ShapeChanges {
        std::mem::take(&mut self.changes)
    }

    /// Whether a vertex move is waiting to be written into this shape.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub(crate) fn mark_stale(&mut self) {
        self.stale = true;
        self.changes |= ShapeChanges::POSITION_MOVED;
    }

    pub(crate) fn clear_stale(&mut self) {
        self.stale = false;
    }
}
