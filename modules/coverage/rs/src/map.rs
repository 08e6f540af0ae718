use contigscope_core_rs::assembly::{AssembledRead, Contig};
use contigscope_core_rs::loc::{Span, SpanOp};
use contigscope_core_rs::num::{self, One};

use super::builder::CoverageMapBuilder;
use super::region::CoverageRegion;

/// Partition of a coordinate axis into maximal constant-coverage regions.
///
/// Regions are sorted, contiguous and non-overlapping: every coordinate within the map's span
/// belongs to exactly one region. Coordinates not covered by any element but lying between
/// covered ones are represented by explicit zero-depth regions.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CoverageMap<E: SpanOp> {
    regions: Vec<CoverageRegion<E>>,
}

impl<E: SpanOp> Default for CoverageMap<E> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<E: SpanOp + Clone> CoverageMap<E> {
    pub fn builder() -> CoverageMapBuilder<E> {
        CoverageMapBuilder::default()
    }

    /// Plain coverage map of the given elements.
    pub fn of(elements: impl IntoIterator<Item = E>) -> Self {
        CoverageMapBuilder::default().extend(elements).build()
    }
}

impl<'a> CoverageMap<&'a AssembledRead> {
    /// Gapped coverage of the contig by its reads.
    pub fn of_contig(contig: &'a Contig) -> Self {
        Self::of(contig.reads())
    }
}

impl<E: SpanOp> CoverageMap<E> {
    pub(crate) fn new(regions: Vec<CoverageRegion<E>>) -> Self {
        debug_assert!(regions
            .windows(2)
            .all(|w| w[0].end() + E::Idx::one() == w[1].start()));
        Self { regions }
    }

    pub fn regions(&self) -> &[CoverageRegion<E>] {
        &self.regions
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoverageRegion<E>> {
        self.regions.iter()
    }

    /// Coordinates covered by the map, `None` for an empty map.
    pub fn span(&self) -> Option<Span<E::Idx>> {
        match (self.regions.first(), self.regions.last()) {
            (Some(first), Some(last)) => Span::new(first.start(), last.end()).ok(),
            _ => None,
        }
    }

    /// Region containing the given coordinate, `None` if the coordinate is outside the map.
    pub fn region_covering(&self, offset: E::Idx) -> Option<&CoverageRegion<E>> {
        let ind = self.regions.partition_point(|x| x.start() <= offset);
        if ind == 0 {
            return None;
        }
        let region = &self.regions[ind - 1];
        region.contains(offset).then_some(region)
    }

    /// Contiguous run of regions intersecting the query (empty if nothing intersects).
    pub fn regions_intersecting(&self, query: &impl SpanOp<Idx = E::Idx>) -> &[CoverageRegion<E>] {
        if query.is_empty() {
            return &[];
        }
        let first = self.regions.partition_point(|x| x.end() < query.start());
        let last = self.regions.partition_point(|x| x.start() <= query.end());
        if first < last {
            &self.regions[first..last]
        } else {
            &[]
        }
    }

    /// Coverage depth at the given coordinate (0 outside the map).
    pub fn depth_at(&self, offset: E::Idx) -> usize {
        self.region_covering(offset).map_or(0, |x| x.depth())
    }

    /// Length-weighted mean depth over all regions, 0 for an empty map.
    pub fn average_coverage(&self) -> f64 {
        let (mut weighted, mut total) = (0.0, 0.0);
        for region in &self.regions {
            let len = num::to_f64(region.len());
            weighted += region.depth() as f64 * len;
            total += len;
        }
        if total > 0.0 {
            weighted / total
        } else {
            0.0
        }
    }

    pub fn min_coverage(&self) -> usize {
        self.regions.iter().map(|x| x.depth()).min().unwrap_or(0)
    }

    pub fn max_coverage(&self) -> usize {
        self.regions.iter().map(|x| x.depth()).max().unwrap_or(0)
    }

    /// Maximal spans where the depth is strictly below the threshold.
    pub fn low_coverage_spans(&self, threshold: usize) -> Vec<Span<E::Idx>> {
        let mut result: Vec<Span<E::Idx>> = Vec::new();
        for region in self.regions.iter().filter(|x| x.depth() < threshold) {
            match result.last_mut() {
                Some(last) if last.end() + E::Idx::one() == region.start() => {
                    *last = Span::from(last.start()..=region.end());
                }
                _ => result.push(*region.span()),
            }
        }
        result
    }
}

impl<'a, E: SpanOp> IntoIterator for &'a CoverageMap<E> {
    type Item = &'a CoverageRegion<E>;
    type IntoIter = std::slice::Iter<'a, CoverageRegion<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: i64, end: i64) -> Span<i64> {
        Span::new(start, end).unwrap()
    }

    #[test]
    fn test_empty_map() {
        let map = CoverageMap::<Span<i64>>::default();
        assert!(map.is_empty());
        assert_eq!(map.span(), None);
        assert_eq!(map.region_covering(0), None);
        assert!(map.regions_intersecting(&span(0, 10)).is_empty());
        assert_eq!(map.average_coverage(), 0.0);
        assert_eq!(map.min_coverage(), 0);
        assert_eq!(map.max_coverage(), 0);
        assert!(map.low_coverage_spans(5).is_empty());
    }

    #[test]
    fn test_region_covering() {
        let map = CoverageMap::of([span(0, 9), span(5, 14), span(20, 24)]);
        assert_eq!(map.region_covering(-1), None);
        assert_eq!(map.region_covering(0).unwrap().span(), &span(0, 4));
        assert_eq!(map.region_covering(9).unwrap().span(), &span(5, 9));
        assert_eq!(map.region_covering(17).unwrap().depth(), 0);
        assert_eq!(map.region_covering(24).unwrap().span(), &span(20, 24));
        assert_eq!(map.region_covering(25), None);
        assert_eq!(map.depth_at(7), 2);
        assert_eq!(map.depth_at(100), 0);
    }

    #[test]
    fn test_regions_intersecting() {
        let map = CoverageMap::of([span(0, 9), span(5, 14), span(20, 24)]);
        let spans = |query: Span<i64>| {
            map.regions_intersecting(&query)
                .iter()
                .map(|x| *x.span())
                .collect::<Vec<_>>()
        };

        assert_eq!(spans(span(-10, -1)), Vec::<Span<i64>>::new());
        assert_eq!(spans(span(25, 30)), Vec::<Span<i64>>::new());
        assert_eq!(spans(span(3, 3)), vec![span(0, 4)]);
        assert_eq!(spans(span(4, 5)), vec![span(0, 4), span(5, 9)]);
        assert_eq!(
            spans(span(-5, 100)),
            vec![span(0, 4), span(5, 9), span(10, 14), span(15, 19), span(20, 24)]
        );
        assert_eq!(spans(span(8, 7)), Vec::<Span<i64>>::new());
    }

    #[test]
    fn test_low_coverage_spans() {
        let map = CoverageMap::of([span(0, 9), span(5, 14), span(20, 24)]);
        assert_eq!(map.low_coverage_spans(1), vec![span(15, 19)]);
        assert_eq!(map.low_coverage_spans(2), vec![span(0, 4), span(10, 24)]);
        assert!(map.low_coverage_spans(0).is_empty());
    }
}
