pub use builder::{CoverageMapBuilder, DepthLimits};
pub use map::CoverageMap;
pub use region::CoverageRegion;

mod builder;
mod map;
mod region;
mod threshold;
