use std::sync::Arc;

use contigscope_core_rs::loc::Direction;
use contigscope_core_rs::seq::{Nucleotide, PhredQuality};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

/// Contribution of a single read to a single consensus coordinate.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Getters, Dissolve, Constructor)]
pub struct SliceElement {
    read_id: Arc<str>,
    base: Nucleotide,
    quality: PhredQuality,
    direction: Direction,
}
