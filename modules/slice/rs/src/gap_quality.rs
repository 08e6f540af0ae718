//! Quality values for alignment gap columns.
//!
//! Gaps are not sequenced, so they carry no quality of their own. A strategy derives one value per
//! run of consecutive gap columns from the real bases flanking the run. Real-base qualities are
//! never modified.

use std::fmt::Debug;
use std::iter::repeat_n;

use contigscope_core_rs::assembly::AssembledRead;
use contigscope_core_rs::loc::SpanOp;
use contigscope_core_rs::seq::PhredQuality;
use dyn_clone::DynClone;
use eyre::{ensure, Result};
use itertools::Itertools;

use crate::errors::GapAtReadBoundary;

pub trait GapQualityStrategy: DynClone + Send + Sync + Debug {
    /// Quality assigned to every column of a gap run flanked by bases of the given qualities.
    ///
    /// Flanks follow the read's sequencing direction: `left` is the base sequenced right before
    /// the run and `right` the one sequenced right after it. For reverse reads this is the
    /// opposite of their consensus orientation.
    fn gap_quality(&self, left: PhredQuality, right: PhredQuality) -> PhredQuality;

    /// Qualities of the read's aligned columns, gaps included, in consensus orientation.
    ///
    /// `full` holds the qualities of the whole ungapped read in sequencing direction. It is
    /// trimmed to the valid range and reversed for reverse reads before the gapped sequence is
    /// walked.
    fn gapped_valid_range_qualities(
        &self,
        read: &AssembledRead,
        full: &[PhredQuality],
    ) -> Result<Vec<PhredQuality>> {
        check_boundaries(read)?;
        let ungapped = valid_range_qualities(read, full)?;

        let mut gapped = Vec::with_capacity(read.sequence().len());
        let mut consumed = 0;
        for (is_gap, run) in &read.sequence().iter().chunk_by(|x| x.is_gap()) {
            let run = run.count();
            if is_gap {
                // Boundary columns are real bases, so both flanks exist
                let quality = flanked(self, read, ungapped[consumed - 1], ungapped[consumed]);
                gapped.extend(repeat_n(quality, run));
            } else {
                gapped.extend_from_slice(&ungapped[consumed..consumed + run]);
                consumed += run;
            }
        }
        Ok(gapped)
    }

    /// Quality of a single aligned column of the read.
    fn quality_at(
        &self,
        read: &AssembledRead,
        full: &[PhredQuality],
        gapped_offset: usize,
    ) -> Result<PhredQuality> {
        check_boundaries(read)?;
        let sequence = read.sequence();
        ensure!(
            gapped_offset < sequence.len(),
            "Gapped offset {gapped_offset} is outside of the read {} ({} columns)",
            read.id(),
            sequence.len()
        );

        let ungapped = valid_range_qualities(read, full)?;
        let bases_before = gapped_offset - sequence.gaps_before(gapped_offset);
        if sequence.is_gap(gapped_offset) {
            Ok(flanked(
                self,
                read,
                ungapped[bases_before - 1],
                ungapped[bases_before],
            ))
        } else {
            Ok(ungapped[bases_before])
        }
    }
}

dyn_clone::clone_trait_object!(GapQualityStrategy);

/// Gap columns get the lower of the two flanking qualities.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct LowestFlanking;

impl GapQualityStrategy for LowestFlanking {
    fn gap_quality(&self, left: PhredQuality, right: PhredQuality) -> PhredQuality {
        left.min(right)
    }
}

/// Gap columns always get the zero quality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct AlwaysZero;

impl GapQualityStrategy for AlwaysZero {
    fn gap_quality(&self, _: PhredQuality, _: PhredQuality) -> PhredQuality {
        PhredQuality::MIN
    }
}

fn check_boundaries(read: &AssembledRead) -> Result<()> {
    let sequence = read.sequence();
    for gapped_offset in [0, sequence.len() - 1] {
        if sequence.is_gap(gapped_offset) {
            return Err(GapAtReadBoundary {
                read_id: read.id().clone(),
                gapped_offset,
            }
            .into());
        }
    }
    Ok(())
}

// `before` and `after` are the flanks of a gap run in consensus orientation
fn flanked<S: GapQualityStrategy + ?Sized>(
    strategy: &S,
    read: &AssembledRead,
    before: PhredQuality,
    after: PhredQuality,
) -> PhredQuality {
    if read.direction().is_reverse() {
        strategy.gap_quality(after, before)
    } else {
        strategy.gap_quality(before, after)
    }
}

// Valid-range qualities in consensus orientation
fn valid_range_qualities(read: &AssembledRead, full: &[PhredQuality]) -> Result<Vec<PhredQuality>> {
    ensure!(
        full.len() == *read.ungapped_length(),
        "Read {} has {} quality values, expected {}",
        read.id(),
        full.len(),
        read.ungapped_length()
    );
    let range = read.valid_range();
    let mut qualities = full[range.start()..=range.end()].to_vec();
    if read.direction().is_reverse() {
        qualities.reverse();
    }
    Ok(qualities)
}
