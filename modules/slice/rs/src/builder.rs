use std::sync::Arc;

use contigscope_core_rs::assembly::{AssembledRead, Contig};
use contigscope_core_rs::loc::SpanOp;
use contigscope_core_rs::parallelism;
use contigscope_core_rs::seq::PhredQuality;
use eyre::Result;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::element::SliceElement;
use super::errors::MissingQualities;
use super::gap_quality::{GapQualityStrategy, LowestFlanking};
use super::map::SliceMap;
use super::quality_source::QualitySource;
use super::slice::Slice;

/// Builds [`SliceMap`]s for contigs.
///
/// Without a quality source every base gets the same default quality. With a source configured,
/// every read of the contig must have qualities in it, otherwise the build fails.
#[derive(Clone)]
pub struct SliceMapBuilder<'a> {
    qualities: Option<&'a dyn QualitySource>,
    gap_strategy: Box<dyn GapQualityStrategy>,
    default_quality: PhredQuality,
    thread_pool: Option<Arc<ThreadPool>>,
}

impl Default for SliceMapBuilder<'_> {
    fn default() -> Self {
        Self {
            qualities: None,
            gap_strategy: Box::new(LowestFlanking),
            default_quality: PhredQuality::saturating(30),
            thread_pool: None,
        }
    }
}

// Contributions of a consecutive run of reads: slices starting at the given consensus offset
struct Partial {
    offset: usize,
    slices: Vec<Slice>,
}

impl<'a> SliceMapBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_qualities(mut self, qualities: &'a dyn QualitySource) -> Self {
        self.qualities = Some(qualities);
        self
    }

    pub fn with_gap_strategy(mut self, strategy: impl GapQualityStrategy + 'static) -> Self {
        self.gap_strategy = Box::new(strategy);
        self
    }

    /// Quality of every base when no quality source is configured.
    pub fn with_default_quality(mut self, quality: PhredQuality) -> Self {
        self.default_quality = quality;
        self
    }

    /// Run parallel builds inside the given pool instead of the global one.
    pub fn set_thread_pool(mut self, pool: ThreadPool) -> Self {
        self.thread_pool = Some(Arc::new(pool));
        self
    }

    /// Run parallel builds inside a dedicated pool with the requested number of threads
    /// (see [`parallelism::available`]).
    pub fn with_threads(self, threads: isize) -> Result<Self> {
        let threads = parallelism::available(threads)?;
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(self.set_thread_pool(pool))
    }

    pub fn gap_strategy(&self) -> &dyn GapQualityStrategy {
        self.gap_strategy.as_ref()
    }

    pub fn default_quality(&self) -> PhredQuality {
        self.default_quality
    }

    pub fn build(&self, contig: &Contig) -> Result<SliceMap> {
        let mut slices = vec![Slice::default(); contig.len()];
        for read in contig.reads() {
            self.add_read(read, 0, &mut slices)?;
        }
        Ok(self.finalize(contig, slices))
    }

    /// Same result as [`SliceMapBuilder::build`], computed by splitting the reads between worker
    /// threads and merging their partial slices.
    pub fn build_parallel(&self, contig: &Contig) -> Result<SliceMap> {
        match &self.thread_pool {
            Some(pool) => pool.install(|| self.par_build(contig)),
            None => self.par_build(contig),
        }
    }

    fn par_build(&self, contig: &Contig) -> Result<SliceMap> {
        let reads = contig.reads();
        let chunk_size = parallelism::chunk_size(reads.len(), rayon::current_num_threads());

        let partials = reads
            .par_chunks(chunk_size)
            .map(|chunk| self.partial(chunk))
            .collect::<Result<Vec<_>>>()?;

        let mut slices = vec![Slice::default(); contig.len()];
        for partial in partials {
            for (slice, contribution) in slices[partial.offset..].iter_mut().zip(partial.slices) {
                slice.merge(contribution);
            }
        }

        log::debug!(
            "Merged slices of {} reads computed in {} chunks",
            reads.len(),
            reads.len().div_ceil(chunk_size)
        );
        Ok(self.finalize(contig, slices))
    }

    fn partial(&self, reads: &[AssembledRead]) -> Result<Partial> {
        let (Some(start), Some(end)) = (
            reads.iter().map(|x| x.start()).min(),
            reads.iter().map(|x| x.end()).max(),
        ) else {
            return Ok(Partial {
                offset: 0,
                slices: Vec::new(),
            });
        };

        let offset = start as usize;
        let mut slices = vec![Slice::default(); (end - start + 1) as usize];
        for read in reads {
            self.add_read(read, offset, &mut slices)?;
        }
        Ok(Partial { offset, slices })
    }

    // `slices[0]` corresponds to the consensus coordinate `offset`
    fn add_read(&self, read: &AssembledRead, offset: usize, slices: &mut [Slice]) -> Result<()> {
        let qualities = match self.qualities {
            Some(source) => {
                let full = source
                    .qualities(read.id())
                    .ok_or_else(|| MissingQualities {
                        read_id: read.id().clone(),
                    })?;
                self.gap_strategy.gapped_valid_range_qualities(read, full)?
            }
            None => {
                let full = vec![self.default_quality; *read.ungapped_length()];
                self.gap_strategy.gapped_valid_range_qualities(read, &full)?
            }
        };

        // Contig guarantees that reads are within [0, consensus length)
        let start = read.start() as usize - offset;
        for (slice, (base, quality)) in slices[start..]
            .iter_mut()
            .zip(read.sequence().iter().zip(qualities))
        {
            slice.insert(SliceElement::new(
                read.id().clone(),
                base,
                quality,
                *read.direction(),
            ));
        }
        Ok(())
    }

    fn finalize(&self, contig: &Contig, mut slices: Vec<Slice>) -> SliceMap {
        for (slice, consensus) in slices.iter_mut().zip(contig.consensus().iter()) {
            slice.set_consensus(Some(consensus));
        }
        log::debug!(
            "Built {} slices for the contig {} ({} reads)",
            slices.len(),
            contig.id(),
            contig.reads().len()
        );
        SliceMap::new(slices)
    }
}
