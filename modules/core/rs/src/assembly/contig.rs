use ahash::HashSet;
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};

use super::read::AssembledRead;
use crate::loc::{Span, SpanOp};
use crate::seq::GappedSequence;

/// Frozen snapshot of an assembled contig: a gapped consensus and the reads aligned against it.
///
/// Guarantees:
/// - read IDs are unique within the contig;
/// - every read lies inside the consensus, i.e. within [0, consensus length);
/// - reads are sorted by their gapped start (ties keep the insertion order).
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct Contig {
    id: String,
    consensus: GappedSequence,
    reads: Vec<AssembledRead>,
}

impl Contig {
    pub fn new(
        id: impl Into<String>,
        consensus: GappedSequence,
        mut reads: Vec<AssembledRead>,
    ) -> Result<Self> {
        let id = id.into();
        ensure!(!id.is_empty(), "Contig ID cannot be empty");

        let bounds = Span::of_length(0, consensus.len() as i64)?;
        let mut ids = HashSet::default();
        for read in &reads {
            ensure!(
                ids.insert(read.id().clone()),
                "Read {} is present more than once in the contig {id}",
                read.id()
            );
            ensure!(
                bounds.contains(read.start()) && bounds.contains(read.end()),
                "Read {} at {} is outside of the contig {id} consensus {bounds}",
                read.id(),
                read.gapped_span()
            );
        }
        reads.sort_by_key(|x| x.start());

        Ok(Self {
            id,
            consensus,
            reads,
        })
    }

    /// Gapped consensus length.
    pub fn len(&self) -> usize {
        self.consensus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consensus.is_empty()
    }

    pub fn read(&self, id: &str) -> Option<&AssembledRead> {
        self.reads.iter().find(|x| x.id().as_ref() == id)
    }

    /// Reads covering the given gapped consensus coordinate, in contig order.
    pub fn reads_covering(&self, offset: i64) -> impl Iterator<Item = &AssembledRead> {
        let last = self.reads.partition_point(|x| x.start() <= offset);
        self.reads[..last]
            .iter()
            .filter(move |x| x.end() >= offset)
    }
}
