use std::collections::BTreeSet;

use contigscope_core_rs::loc::{Span, SpanOp};
use contigscope_core_rs::num::{One, Zero};
use eyre::{ensure, Result};
use itertools::Itertools;

use super::map::CoverageMap;
use super::region::CoverageRegion;
use super::threshold::{ActiveSet, Thresholded, Unbounded};

/// Depth limits enforced while sweeping.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DepthLimits {
    pub max: usize,
    pub min: usize,
}

/// Sweep-line builder of [`CoverageMap`]s.
pub struct CoverageMapBuilder<E: SpanOp> {
    elements: Vec<E>,
    include_origin: bool,
    limits: Option<DepthLimits>,
}

impl<E: SpanOp> Default for CoverageMapBuilder<E> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            include_origin: false,
            limits: None,
        }
    }
}

impl<E: SpanOp + Clone> CoverageMapBuilder<E> {
    pub fn add(mut self, element: E) -> Self {
        self.elements.push(element);
        self
    }

    pub fn extend(mut self, elements: impl IntoIterator<Item = E>) -> Self {
        self.elements.extend(elements);
        self
    }

    /// Make sure that coordinate 0 is covered by the map, adding a zero-depth region if needed.
    pub fn include_origin(mut self, include: bool) -> Self {
        self.include_origin = include;
        self
    }

    /// Never let the depth exceed `max` (elements are dropped and restored as the sweep goes).
    pub fn with_max_coverage(mut self, max: usize) -> Self {
        self.limits = Some(DepthLimits { max, min: 0 });
        self
    }

    /// Keep the depth within [min, max] when possible. Guaranteeing `min` takes precedence: an
    /// element is kept above `max` when dropping it would leave fewer than `min` elements on its
    /// remaining extent.
    pub fn with_coverage_bounds(mut self, max: usize, min: usize) -> Result<Self> {
        ensure!(
            min <= max,
            "Minimum coverage ({min}) must not exceed the maximum coverage ({max})"
        );
        self.limits = Some(DepthLimits { max, min });
        Ok(self)
    }

    pub fn build(self) -> CoverageMap<E> {
        let total = self.elements.len();
        let elements: Vec<E> = self.elements.into_iter().filter(|x| !x.is_empty()).collect();
        let spans: Vec<Span<E::Idx>> = elements.iter().map(|x| x.as_span()).collect();

        let regions = match self.limits {
            None => sweep(&spans, Unbounded::default()),
            Some(limits) => sweep(&spans, Thresholded::new(limits)),
        };

        let mut regions: Vec<CoverageRegion<E>> = regions
            .into_iter()
            .map(|(span, active)| {
                let active = active.into_iter().map(|ind| elements[ind].clone()).collect();
                CoverageRegion::new(span, active)
            })
            .collect();

        if self.include_origin {
            include_origin(&mut regions);
        }

        log::debug!(
            "Built coverage map with {} regions from {} elements ({} zero-length)",
            regions.len(),
            total,
            total - elements.len()
        );
        CoverageMap::new(regions)
    }
}

// Sweep over all coordinates where the active set may change. Each element enters at its start
// and leaves right after its end. Returns regions as (span, indices of active elements).
fn sweep<Idx: contigscope_core_rs::num::PrimInt>(
    spans: &[Span<Idx>],
    mut active: impl ActiveSet<Idx>,
) -> Vec<(Span<Idx>, BTreeSet<usize>)> {
    let one = Idx::one();
    let by_start: Vec<usize> = (0..spans.len()).sorted_by_key(|x| spans[*x].start()).collect();
    let by_end: Vec<usize> = (0..spans.len()).sorted_by_key(|x| spans[*x].end()).collect();

    let boundaries: Vec<Idx> = by_start
        .iter()
        .map(|x| spans[*x].start())
        .merge(by_end.iter().map(|x| spans[*x].end() + one))
        .dedup()
        .collect();

    let mut regions: Vec<(Span<Idx>, BTreeSet<usize>)> = Vec::new();
    let (mut entering, mut exiting) = (Vec::new(), Vec::new());
    let (mut starts, mut ends) = (by_start.iter().peekable(), by_end.iter().peekable());

    for (ind, boundary) in boundaries.iter().enumerate() {
        entering.clear();
        exiting.clear();
        while let Some(x) = starts.next_if(|x| spans[**x].start() == *boundary) {
            entering.push(*x);
        }
        while let Some(x) = ends.next_if(|x| spans[**x].end() + one == *boundary) {
            exiting.push(*x);
        }
        active.advance(*boundary, &entering, &exiting, spans);

        // Nothing can be active past the last boundary
        let Some(next) = boundaries.get(ind + 1) else {
            debug_assert!(active.active().is_empty());
            break;
        };
        let span = Span::from(*boundary..=(*next - one));

        match regions.last_mut() {
            Some((last, elements)) if elements == active.active() => {
                *last = Span::from(last.start()..=span.end());
            }
            _ => regions.push((span, active.active().clone())),
        }
    }
    regions
}

fn include_origin<E: SpanOp>(regions: &mut Vec<CoverageRegion<E>>) {
    let (zero, one) = (E::Idx::zero(), E::Idx::one());

    let (first, last) = match (regions.first(), regions.last()) {
        (Some(first), Some(last)) => (first.start(), last.end()),
        _ => {
            regions.push(CoverageRegion::new(Span::single(zero), Vec::new()));
            return;
        }
    };

    if first > zero {
        let span = Span::from(zero..=(first - one));
        extend_or_insert(regions, 0, span);
    } else if last < zero {
        let span = Span::from((last + one)..=zero);
        let at = regions.len();
        extend_or_insert(regions, at, span);
    }
}

// Zero-depth padding is merged into an adjacent zero-depth region to keep regions maximal
fn extend_or_insert<E: SpanOp>(regions: &mut Vec<CoverageRegion<E>>, at: usize, span: Span<E::Idx>) {
    let neighbour = if at == 0 { 0 } else { at - 1 };
    let region = &mut regions[neighbour];
    if region.depth() == 0 {
        let merged = Span::from(span.start().min(region.start())..=span.end().max(region.end()));
        *region = CoverageRegion::new(merged, Vec::new());
    } else {
        regions.insert(at, CoverageRegion::new(span, Vec::new()));
    }
}
