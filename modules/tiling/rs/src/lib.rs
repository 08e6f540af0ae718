pub use errors::NoMatchingRead;
pub use segment::AceBaseSegment;
pub use tiler::best_segments;

mod errors;
mod segment;
mod tiler;
