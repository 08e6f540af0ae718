use std::ops::Index;

use super::slice::Slice;

/// One [`Slice`] per gapped consensus coordinate: the slice at index `i` describes coordinate `i`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SliceMap {
    slices: Vec<Slice>,
}

impl SliceMap {
    pub(crate) fn new(slices: Vec<Slice>) -> Self {
        Self { slices }
    }

    pub fn get(&self, offset: usize) -> Option<&Slice> {
        self.slices.get(offset)
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slice> {
        self.slices.iter()
    }

    /// Number of slices, equal to the gapped consensus length.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl Index<usize> for SliceMap {
    type Output = Slice;

    fn index(&self, index: usize) -> &Self::Output {
        &self.slices[index]
    }
}

impl<'a> IntoIterator for &'a SliceMap {
    type Item = &'a Slice;
    type IntoIter = std::slice::Iter<'a, Slice>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.iter()
    }
}

impl IntoIterator for SliceMap {
    type Item = Slice;
    type IntoIter = std::vec::IntoIter<Slice>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.into_iter()
    }
}
