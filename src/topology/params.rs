/// Position written into a geometry shape for a newly created unbound slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderFill {
    /// Repeat the last position in the shape (origin if the shape is empty).
    #[default]
    RepeatLast,
    /// Always use the origin.
    Origin,
}

/// Parameters controlling the topology engine's default behavior.
#[derive(Debug, Clone, Copy)]
pub struct TopologyParams {
    /// Loop policy for composite operations that take no explicit flag.
    pub preserve_loops: bool,
    /// Placeholder policy for slots created without a vertex.
    pub placeholder: PlaceholderFill,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            preserve_loops: true,
            placeholder: PlaceholderFill::RepeatLast,
        }
    }
}
