mod insert_between;
mod make_contour;

pub use insert_between::InsertVertexBetween;
pub use make_contour::MakeContour;
