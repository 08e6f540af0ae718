pub use builder::SliceMapBuilder;
pub use element::SliceElement;
pub use errors::{GapAtReadBoundary, MissingQualities};
pub use map::SliceMap;
pub use slice::Slice;

mod builder;
mod element;
mod errors;
pub mod gap_quality;
mod map;
pub mod quality_source;
mod slice;
