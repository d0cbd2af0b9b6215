pub mod shape;

pub use shape::{GeometryShape, ShapeChanges};
