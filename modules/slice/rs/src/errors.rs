use std::sync::Arc;

use derive_more::{Display, Error};

/// The aligned part of a read starts or ends with a gap column, so there is no flanking base to
/// derive the gap quality from.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display("Read {read_id} has a gap at the boundary of its aligned range (gapped offset {gapped_offset})")]
pub struct GapAtReadBoundary {
    pub read_id: Arc<str>,
    pub gapped_offset: usize,
}

/// A quality source is configured, but it has no qualities for the read.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display("Quality values are missing for the read {read_id}")]
pub struct MissingQualities {
    pub read_id: Arc<str>,
}
