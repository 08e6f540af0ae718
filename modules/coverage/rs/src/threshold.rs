use std::cmp::Reverse;
use std::collections::BTreeSet;

use contigscope_core_rs::loc::{Span, SpanOp};
use contigscope_core_rs::num::PrimInt;

use super::builder::DepthLimits;

/// State of the sweep: which elements are considered active after each boundary.
pub(crate) trait ActiveSet<Idx: PrimInt> {
    /// Move the sweep to the next boundary. `entering` elements start at the boundary, `exiting`
    /// elements ended right before it. Both are indices into `spans`.
    fn advance(&mut self, boundary: Idx, entering: &[usize], exiting: &[usize], spans: &[Span<Idx>]);

    fn active(&self) -> &BTreeSet<usize>;
}

/// Every element is active over its whole span.
#[derive(Default)]
pub(crate) struct Unbounded {
    active: BTreeSet<usize>,
}

impl<Idx: PrimInt> ActiveSet<Idx> for Unbounded {
    fn advance(&mut self, _: Idx, entering: &[usize], exiting: &[usize], _: &[Span<Idx>]) {
        for ind in exiting {
            self.active.remove(ind);
        }
        self.active.extend(entering.iter().copied());
    }

    fn active(&self) -> &BTreeSet<usize> {
        &self.active
    }
}

/// Depth-limited sweep.
///
/// At every boundary, newcomers and previously dropped elements that still cover the boundary
/// compete for the free slots (max - active). Elements with the greatest remaining extent are
/// admitted first. Everything else is dropped, unless fewer than `min` active elements reach the
/// end of the candidate, in which case the candidate is admitted above `max`.
///
/// Admitted elements are never evicted and `min` is checked against the candidate's last
/// coordinate rather than the boundary itself. Depth may therefore stay above `max` after a
/// short element was kept: `[0, 9], [0, 2], [1, 9]` with max = 2 and min = 2 has depth 3 over
/// `[1, 2]`.
pub(crate) struct Thresholded {
    limits: DepthLimits,
    active: BTreeSet<usize>,
    dropped: BTreeSet<usize>,
    pending: Vec<usize>,
}

impl Thresholded {
    pub fn new(limits: DepthLimits) -> Self {
        Self {
            limits,
            active: BTreeSet::new(),
            dropped: BTreeSet::new(),
            pending: Vec::new(),
        }
    }

    // Number of active elements that are still present at the last coordinate of the given one
    fn support<Idx: PrimInt>(&self, end: Idx, spans: &[Span<Idx>]) -> usize {
        self.active.iter().filter(|x| spans[**x].end() >= end).count()
    }
}

impl<Idx: PrimInt> ActiveSet<Idx> for Thresholded {
    fn advance(&mut self, boundary: Idx, entering: &[usize], exiting: &[usize], spans: &[Span<Idx>]) {
        for ind in exiting {
            self.active.remove(ind);
            self.dropped.remove(ind);
        }

        // Both previously dropped elements and newcomers cover the boundary at this point
        self.pending.clear();
        self.pending.extend(self.dropped.iter().copied());
        self.pending.extend(entering.iter().copied());
        self.dropped.clear();
        if self.pending.is_empty() {
            return;
        }

        // Remaining extent (end - boundary) orders exactly like the end coordinate itself
        self.pending.sort_by_key(|x| (Reverse(spans[*x].end()), *x));

        let pending = std::mem::take(&mut self.pending);
        for &ind in &pending {
            if self.active.len() < self.limits.max {
                self.active.insert(ind);
            } else if self.support(spans[ind].end(), spans) < self.limits.min {
                log::trace!(
                    "Keeping element {ind} above max coverage ({}) at {boundary:?} to satisfy min coverage ({})",
                    self.limits.max,
                    self.limits.min
                );
                self.active.insert(ind);
            } else {
                self.dropped.insert(ind);
            }
        }
        self.pending = pending;
    }

    fn active(&self) -> &BTreeSet<usize> {
        &self.active
    }
}
