use contigscope_core_rs::loc::{Span, SpanOp};
use derive_getters::{Dissolve, Getters};

/// A maximal span of coordinates where the set of active elements doesn't change.
///
/// Every element of the region covers every coordinate of the region. Elements are stored in the
/// order they were supplied to the builder.
#[derive(Clone, PartialEq, Eq, Debug, Getters, Dissolve)]
pub struct CoverageRegion<E: SpanOp> {
    span: Span<E::Idx>,
    elements: Vec<E>,
}

impl<E: SpanOp> CoverageRegion<E> {
    pub(crate) fn new(span: Span<E::Idx>, elements: Vec<E>) -> Self {
        Self { span, elements }
    }

    /// Number of elements covering the region.
    pub fn depth(&self) -> usize {
        self.elements.len()
    }
}

impl<E: SpanOp> SpanOp for CoverageRegion<E> {
    type Idx = E::Idx;

    #[inline(always)]
    fn start(&self) -> Self::Idx {
        self.span.start()
    }

    #[inline(always)]
    fn end(&self) -> Self::Idx {
        self.span.end()
    }
}
