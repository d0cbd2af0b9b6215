mod center;
mod is_valid;

pub use center::ContourCenter;
pub use is_valid::{ConsistencyIssue, IsValid};
