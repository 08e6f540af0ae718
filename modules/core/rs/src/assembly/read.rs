use std::sync::Arc;

use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use crate::loc::{Direction, Span, SpanOp};
use crate::seq::{GappedSequence, Nucleotide};

/// A read placed on the gapped consensus axis of a contig.
///
/// Only the valid (clear) range of the read is aligned. `valid_range` is expressed in ungapped
/// coordinates of the full-length read, in the direction the read was sequenced, while
/// `sequence` is the gapped alignment of that range in consensus orientation (reverse
/// complemented for reverse reads).
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct AssembledRead {
    id: Arc<str>,
    sequence: GappedSequence,
    offset: i64,
    direction: Direction,
    valid_range: Span<usize>,
    ungapped_length: usize,
}

impl AssembledRead {
    pub fn new(
        id: impl Into<Arc<str>>,
        sequence: GappedSequence,
        offset: i64,
        direction: Direction,
        valid_range: Span<usize>,
        ungapped_length: usize,
    ) -> Result<Self> {
        let id = id.into();
        ensure!(!id.is_empty(), "Read ID cannot be empty");
        ensure!(
            !sequence.is_empty(),
            "Aligned sequence of the read {id} cannot be empty"
        );
        ensure!(
            valid_range.len() == sequence.ungapped_len(),
            "Valid range {valid_range} of the read {id} must span exactly {} aligned bases",
            sequence.ungapped_len()
        );
        ensure!(
            valid_range.end() < ungapped_length,
            "Valid range {valid_range} of the read {id} exceeds its full length ({ungapped_length})"
        );

        Ok(Self {
            id,
            sequence,
            offset,
            direction,
            valid_range,
            ungapped_length,
        })
    }

    /// Read without trimmed ends: the whole ungapped read is aligned.
    pub fn fully_valid(
        id: impl Into<Arc<str>>,
        sequence: GappedSequence,
        offset: i64,
        direction: Direction,
    ) -> Result<Self> {
        let length = sequence.ungapped_len();
        ensure!(length > 0, "Read must have at least one aligned base");
        let valid_range = Span::of_length(0, length)?;
        Self::new(id, sequence, offset, direction, valid_range, length)
    }

    /// Gapped consensus coordinates occupied by the read.
    pub fn gapped_span(&self) -> Span<i64> {
        self.as_span()
    }

    /// Base aligned at the given gapped consensus coordinate, if the read covers it.
    pub fn base_at(&self, consensus_offset: i64) -> Option<Nucleotide> {
        if !self.contains(consensus_offset) {
            return None;
        }
        self.sequence.get((consensus_offset - self.offset) as usize)
    }
}

impl SpanOp for AssembledRead {
    type Idx = i64;

    #[inline(always)]
    fn start(&self) -> Self::Idx {
        self.offset
    }

    #[inline(always)]
    fn end(&self) -> Self::Idx {
        self.offset + self.sequence.len() as i64 - 1
    }
}
