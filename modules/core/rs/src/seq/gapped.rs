use std::fmt::Display;
use std::ops::Index;
use std::str::FromStr;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use eyre::{Report, Result};

use super::nucleotide::Nucleotide;

/// Nucleotide sequence in padded (gapped) coordinates of a multiple alignment.
///
/// Gap offsets are indexed once on construction, so gapped <-> ungapped conversions are
/// a binary search away.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct GappedSequence {
    bases: Vec<Nucleotide>,
    // Sorted gapped offsets of all gap columns
    gaps: Vec<usize>,
}

impl GappedSequence {
    pub fn new(bases: Vec<Nucleotide>) -> Self {
        let gaps = bases
            .iter()
            .enumerate()
            .filter_map(|(i, x)| x.is_gap().then_some(i))
            .collect();
        Self { bases, gaps }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bases = bytes
            .iter()
            .map(|x| Nucleotide::from_byte(*x))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(bases))
    }

    /// Gapped length.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn get(&self, gapped: usize) -> Option<Nucleotide> {
        self.bases.get(gapped).copied()
    }

    pub fn bases(&self) -> &[Nucleotide] {
        &self.bases
    }

    /// Gapped offsets of all gap columns.
    pub fn gaps(&self) -> &[usize] {
        &self.gaps
    }

    pub fn ungapped_len(&self) -> usize {
        self.bases.len() - self.gaps.len()
    }

    pub fn is_gap(&self, gapped: usize) -> bool {
        self.gaps.binary_search(&gapped).is_ok()
    }

    /// Number of gaps strictly before the given gapped offset.
    pub fn gaps_before(&self, gapped: usize) -> usize {
        self.gaps.partition_point(|x| *x < gapped)
    }

    /// Ungapped offset of the base at the given gapped offset. Gap columns are mapped onto the
    /// closest real base to the left (or 0 when no such base exists).
    pub fn ungapped_offset(&self, gapped: usize) -> usize {
        let gaps = self.gaps_before(gapped);
        if self.is_gap(gapped) {
            gapped.saturating_sub(gaps + 1)
        } else {
            gapped - gaps
        }
    }

    /// Gapped offset of the ungapped base with the given index.
    pub fn gapped_offset(&self, ungapped: usize) -> Option<usize> {
        if ungapped >= self.ungapped_len() {
            return None;
        }
        // Every gap before the target column shifts it one position to the right
        let mut gapped = ungapped;
        for gap in &self.gaps {
            if *gap <= gapped {
                gapped += 1;
            } else {
                break;
            }
        }
        Some(gapped)
    }

    /// Real bases only.
    pub fn ungapped(&self) -> Vec<Nucleotide> {
        self.bases.iter().copied().filter(|x| !x.is_gap()).collect()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Nucleotide> + '_ {
        self.bases.iter().copied()
    }
}

impl Index<usize> for GappedSequence {
    type Output = Nucleotide;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bases[index]
    }
}

impl FromStr for GappedSequence {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

impl From<Vec<Nucleotide>> for GappedSequence {
    fn from(value: Vec<Nucleotide>) -> Self {
        Self::new(value)
    }
}

impl Display for GappedSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for base in &self.bases {
            write!(f, "{base}")?;
        }
        Ok(())
    }
}
