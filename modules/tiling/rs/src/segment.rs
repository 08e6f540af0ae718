use std::fmt::Display;
use std::sync::Arc;

use contigscope_core_rs::loc::{Span, SpanOp};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

/// Maximal run of consensus columns where a single read is the exemplar.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Getters, Dissolve, Constructor)]
pub struct AceBaseSegment {
    read_id: Arc<str>,
    span: Span<i64>,
}

impl SpanOp for AceBaseSegment {
    type Idx = i64;

    #[inline(always)]
    fn start(&self) -> Self::Idx {
        self.span.start()
    }

    #[inline(always)]
    fn end(&self) -> Self::Idx {
        self.span.end()
    }
}

impl Display for AceBaseSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.read_id, self.span)
    }
}
