use std::fmt::{Debug, Display};
use std::ops::{RangeInclusive, Shl, Shr};
use std::rc::Rc;
use std::sync::Arc;

use crate::num::{One, PrimInt};
#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use eyre::{eyre, Report, Result};
use impl_tools::autoimpl;

/// Span is a closed region [start, end] on a shared coordinate axis (e.g. gapped consensus
/// coordinates). Both ends are inclusive and coordinates may be negative.
///
/// Zero-length spans are allowed and are encoded as `end == start - 1`. They are legal inputs
/// everywhere but never cover a coordinate.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Dissolve)]
pub struct Span<Idx: PrimInt> {
    start: Idx,
    end: Idx,
}

/// Trait for positioned elements: anything that occupies an inclusive [start, end] span on a
/// shared coordinate axis (reads, quality values, plain spans, ...).
#[autoimpl(for <T: trait + ?Sized> &T, Box<T>, Rc<T>, Arc<T>)]
pub trait SpanOp {
    type Idx: PrimInt;

    /// First coordinate covered by the element.
    fn start(&self) -> Self::Idx;

    /// Last coordinate covered by the element (inclusive).
    fn end(&self) -> Self::Idx;

    /// Number of covered coordinates.
    fn len(&self) -> Self::Idx {
        self.end() + Self::Idx::one() - self.start()
    }

    /// True for zero-length elements.
    fn is_empty(&self) -> bool {
        self.end() < self.start()
    }

    /// Check if the element covers a given coordinate.
    fn contains(&self, pos: Self::Idx) -> bool {
        self.start() <= pos && pos <= self.end()
    }

    /// Check if two elements share at least one coordinate.
    fn intersects(&self, other: &impl SpanOp<Idx = Self::Idx>) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start() <= other.end()
            && other.start() <= self.end()
    }

    /// Turn the element into a basic span.
    fn as_span(&self) -> Span<Self::Idx> {
        Span {
            start: self.start(),
            end: self.end(),
        }
    }
}

impl<T: PrimInt> SpanOp for Span<T> {
    type Idx = T;

    #[inline(always)]
    fn start(&self) -> Self::Idx {
        self.start
    }
    #[inline(always)]
    fn end(&self) -> Self::Idx {
        self.end
    }
}

impl<Idx: PrimInt> Span<Idx> {
    pub fn new(start: Idx, end: Idx) -> Result<Self> {
        let empty = start > Idx::min_value() && end == start - Idx::one();
        if start <= end || empty {
            Ok(Self { start, end })
        } else {
            Err(eyre!("Invalid span: end must be >= start - 1"))
        }
    }

    /// Span covering a single coordinate.
    pub fn single(pos: Idx) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Zero-length span anchored at `pos` (`end == pos - 1`).
    pub fn empty_at(pos: Idx) -> Result<Self> {
        Self::of_length(pos, Idx::zero())
    }

    /// Span of the given length starting at `start`. A zero length produces an empty span.
    pub fn of_length(start: Idx, length: Idx) -> Result<Self> {
        if length > Idx::zero() {
            Self::new(start, start + (length - Idx::one()))
        } else if length.is_zero() && start > Idx::min_value() {
            Self::new(start, start - Idx::one())
        } else {
            Err(eyre!("Can't build a span of length {length:?} at {start:?}"))
        }
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn shift(&mut self, shift: Idx) -> &mut Self {
        self.start = self.start + shift;
        self.end = self.end + shift;
        self
    }

    /// Iterate over all coordinates covered by the span.
    pub fn iter(&self) -> impl Iterator<Item = Idx> {
        num::range_inclusive(self.start, self.end)
    }

    pub fn cast<T: PrimInt>(&self) -> Option<Span<T>> {
        match (T::from(self.start), T::from(self.end)) {
            (Some(start), Some(end)) => Some(Span { start, end }),
            _ => None,
        }
    }
}

impl<Idx: PrimInt + Display> Display for Span<Idx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl<Idx: PrimInt> TryFrom<(Idx, Idx)> for Span<Idx> {
    type Error = Report;

    fn try_from(value: (Idx, Idx)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

impl<Idx: PrimInt> From<Span<Idx>> for (Idx, Idx) {
    fn from(span: Span<Idx>) -> Self {
        (span.start, span.end)
    }
}

impl<Idx: PrimInt> From<RangeInclusive<Idx>> for Span<Idx> {
    fn from(value: RangeInclusive<Idx>) -> Self {
        let (start, end) = value.into_inner();
        // RangeInclusive has no notion of "end == start - 1", everything else collapses to empty
        if end < start && start > Idx::min_value() {
            Self {
                start,
                end: start - Idx::one(),
            }
        } else {
            Self { start, end }
        }
    }
}

impl<Idx: PrimInt> PartialEq<(Idx, Idx)> for Span<Idx> {
    fn eq(&self, other: &(Idx, Idx)) -> bool {
        self.start == other.0 && self.end == other.1
    }
}

impl<Idx: PrimInt> Shl<Idx> for Span<Idx> {
    type Output = Self;

    fn shl(mut self, shift: Idx) -> Self::Output {
        self.start = self.start - shift;
        self.end = self.end - shift;
        self
    }
}

impl<Idx: PrimInt> Shr<Idx> for Span<Idx> {
    type Output = Self;

    fn shr(mut self, shift: Idx) -> Self::Output {
        self.start = self.start + shift;
        self.end = self.end + shift;
        self
    }
}
