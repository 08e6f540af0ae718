use contigscope_core_rs::assembly::{AssembledRead, Contig};
use contigscope_core_rs::loc::{Span, SpanOp};
use eyre::Result;

use super::errors::NoMatchingRead;
use super::segment::AceBaseSegment;

/// Tile the consensus with exemplar reads, one segment per maximal run of a single exemplar.
///
/// The consensus is walked left to right. The current exemplar is kept while it covers the column
/// and agrees with the consensus there. Otherwise the segment is closed and a new exemplar is
/// picked among the covering reads that agree with the consensus: reads that already served as
/// exemplars come first (in the order they were first used), then all other reads in contig order.
///
/// Fails with [`NoMatchingRead`] at the first column where no covering read agrees with the
/// consensus. An empty consensus produces no segments.
pub fn best_segments(contig: &Contig) -> Result<Vec<AceBaseSegment>> {
    let consensus = contig.consensus();
    let reads = contig.reads();

    let mut segments = Vec::new();
    let mut window = Window::default();
    let mut used: Vec<usize> = Vec::new();
    // (read index, first column of the open segment)
    let mut current: Option<(usize, i64)> = None;

    for (column, base) in consensus.iter().enumerate() {
        let column = column as i64;
        window.advance(column, reads);
        let matches = |ind: usize| reads[ind].base_at(column) == Some(base);

        if let Some((ind, _)) = current {
            if matches(ind) {
                continue;
            }
        }

        let Some(next) = used
            .iter()
            .copied()
            .filter(|ind| window.contains(*ind))
            .chain(window.iter())
            .find(|ind| matches(*ind))
        else {
            return Err(NoMatchingRead {
                contig: contig.id().clone(),
                offset: column,
            }
            .into());
        };

        if let Some((ind, start)) = current {
            segments.push(segment(&reads[ind], start, column - 1));
        }
        if !used.contains(&next) {
            used.push(next);
        }
        current = Some((next, column));
    }

    if let Some((ind, start)) = current {
        segments.push(segment(&reads[ind], start, consensus.len() as i64 - 1));
    }

    log::debug!(
        "Tiled the contig {} ({} columns) with {} segments from {} reads",
        contig.id(),
        consensus.len(),
        segments.len(),
        used.len()
    );
    Ok(segments)
}

fn segment(read: &AssembledRead, start: i64, end: i64) -> AceBaseSegment {
    AceBaseSegment::new(read.id().clone(), Span::from(start..=end))
}

// Indices of reads covering the current column, in contig order. Reads are sorted by start, so
// the window only ever admits reads from the front of the remaining ones.
#[derive(Default)]
struct Window {
    next: usize,
    active: Vec<usize>,
}

impl Window {
    fn advance(&mut self, column: i64, reads: &[AssembledRead]) {
        self.active.retain(|ind| reads[*ind].end() >= column);
        while self.next < reads.len() && reads[self.next].start() <= column {
            if reads[self.next].end() >= column {
                self.active.push(self.next);
            }
            self.next += 1;
        }
    }

    fn contains(&self, ind: usize) -> bool {
        self.active.contains(&ind)
    }

    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.iter().copied()
    }
}
