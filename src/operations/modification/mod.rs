mod detach;
mod merge;
mod reverse;

pub use detach::DetachVertex;
pub use merge::MergeVertices;
pub use reverse::ReverseContour;
