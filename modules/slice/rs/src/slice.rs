use std::collections::BTreeMap;
use std::sync::Arc;

use contigscope_core_rs::seq::{Nucleotide, NucleotideCounts};
use eyre::{ensure, Result};

use super::element::SliceElement;

/// All bases aligned at one consensus coordinate, keyed by read ID.
///
/// Per-base counts are maintained on insertion and always include every symbol of the alphabet.
/// Equality is by value and doesn't depend on the order elements were added in.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Slice {
    elements: BTreeMap<Arc<str>, SliceElement>,
    consensus: Option<Nucleotide>,
    counts: NucleotideCounts,
}

impl Slice {
    pub fn new(
        elements: impl IntoIterator<Item = SliceElement>,
        consensus: Option<Nucleotide>,
    ) -> Result<Self> {
        let mut slice = Self {
            consensus,
            ..Default::default()
        };
        for element in elements {
            ensure!(
                !slice.contains(element.read_id()),
                "Read {} contributes more than one element to the slice",
                element.read_id()
            );
            slice.insert(element);
        }
        Ok(slice)
    }

    /// Number of reads covering the coordinate.
    pub fn coverage(&self) -> usize {
        self.elements.len()
    }

    pub fn get(&self, read_id: &str) -> Option<&SliceElement> {
        self.elements.get(read_id)
    }

    pub fn contains(&self, read_id: &str) -> bool {
        self.elements.contains_key(read_id)
    }

    pub fn counts(&self) -> &NucleotideCounts {
        &self.counts
    }

    /// Consensus base called at the coordinate, if known.
    pub fn consensus_call(&self) -> Option<Nucleotide> {
        self.consensus
    }

    /// Elements ordered by read ID.
    pub fn iter(&self) -> impl Iterator<Item = &SliceElement> {
        self.elements.values()
    }

    pub(crate) fn set_consensus(&mut self, consensus: Option<Nucleotide>) {
        self.consensus = consensus;
    }

    // Reads are unique within a contig, so a read never lands twice in the same slice
    pub(crate) fn insert(&mut self, element: SliceElement) {
        let base = *element.base();
        let previous = self.elements.insert(element.read_id().clone(), element);
        debug_assert!(previous.is_none());
        self.counts.increment(base);
    }

    /// Keyed union with a partial slice of the same coordinate.
    pub(crate) fn merge(&mut self, other: Slice) {
        for (read_id, element) in other.elements {
            if !self.elements.contains_key(&read_id) {
                self.counts.increment(*element.base());
                self.elements.insert(read_id, element);
            }
        }
        if self.consensus.is_none() {
            self.consensus = other.consensus;
        }
    }
}

impl<'a> IntoIterator for &'a Slice {
    type Item = &'a SliceElement;
    type IntoIter = std::collections::btree_map::Values<'a, Arc<str>, SliceElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.values()
    }
}
