use std::sync::Arc;

use ahash::{HashMap, HashMapExt};
use contigscope_core_rs::assembly::{AssembledRead, Contig};
use contigscope_core_rs::loc::{Direction, Span, SpanOp};
use contigscope_core_rs::seq::{GappedSequence, Nucleotide, PhredQuality};
use contigscope_slice_rs::gap_quality::{AlwaysZero, LowestFlanking};
use contigscope_slice_rs::{GapAtReadBoundary, MissingQualities, SliceMapBuilder};
use eyre::Result;
use rayon::ThreadPoolBuilder;

fn qualities(values: impl IntoIterator<Item = u8>) -> Vec<PhredQuality> {
    PhredQuality::from_values(values).unwrap()
}

// Contig of `length` columns tiled with gapped, trimmed reads in both directions
fn synthetic(length: usize, reads: usize) -> Result<(Contig, HashMap<Arc<str>, Vec<PhredQuality>>)> {
    const ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];
    let consensus: String = (0..length).map(|i| ALPHABET[i % 4]).collect();

    let mut aligned = Vec::new();
    let mut quals = HashMap::new();
    for ind in 0..reads {
        let offset = (ind * 13) % (length - 40);
        let len = 20 + (ind * 7) % 20;
        let seq: String = (0..len)
            .map(|i| match i {
                0 => 'A',
                i if i + 1 == len => 'C',
                i if (i + ind) % 7 == 0 => '-',
                i => ALPHABET[(i + ind) % 4],
            })
            .collect();
        let seq: GappedSequence = seq.parse()?;

        // Trim 2 bases on both ends of the sequenced read
        let ungapped = seq.ungapped_len();
        let direction = if ind % 3 == 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        let id: Arc<str> = format!("read{ind}").into();
        quals.insert(
            id.clone(),
            qualities((0..ungapped + 4).map(|i| ((i * 11 + ind) % 60) as u8)),
        );
        aligned.push(AssembledRead::new(
            id,
            seq,
            offset as i64,
            direction,
            Span::of_length(2, ungapped)?,
            ungapped + 4,
        )?);
    }
    Ok((Contig::new("synthetic", consensus.parse()?, aligned)?, quals))
}

#[test]
fn gap_quality_from_lowest_flank() -> Result<()> {
    let read = AssembledRead::fully_valid("r1", "ACGT-CGT".parse()?, 0, Direction::Forward)?;
    let contig = Contig::new("ctg", "ACGTACGT".parse()?, vec![read])?;

    let mut quals = HashMap::new();
    quals.insert("r1".to_string(), qualities(11..=17));

    let map = SliceMapBuilder::new()
        .with_qualities(&quals)
        .with_gap_strategy(LowestFlanking)
        .build(&contig)?;
    let gapped: Vec<_> = map
        .iter()
        .map(|x| x.get("r1").map(|x| x.quality().value()))
        .collect();
    assert_eq!(
        gapped,
        [11u8, 12, 13, 14, 14, 15, 16, 17].map(Some).to_vec()
    );

    let map = SliceMapBuilder::new()
        .with_qualities(&quals)
        .with_gap_strategy(AlwaysZero)
        .build(&contig)?;
    assert_eq!(map[4].get("r1").map(|x| x.quality().value()), Some(0));
    assert_eq!(map[5].get("r1").map(|x| x.quality().value()), Some(15));
    Ok(())
}

#[test]
fn slices_hold_every_covering_read() -> Result<()> {
    let (contig, quals) = synthetic(200, 40)?;
    let map = SliceMapBuilder::new().with_qualities(&quals).build(&contig)?;
    assert_eq!(map.len(), contig.len());

    for (offset, slice) in map.iter().enumerate() {
        let covering: Vec<_> = contig.reads_covering(offset as i64).collect();
        assert_eq!(slice.coverage(), covering.len());
        assert_eq!(slice.counts().total(), covering.len());
        assert_eq!(slice.consensus_call(), contig.consensus().get(offset));

        for read in covering {
            let element = slice.get(read.id()).unwrap();
            assert_eq!(Some(*element.base()), read.base_at(offset as i64));
            assert_eq!(element.direction(), read.direction());
            assert!(slice.counts()[*element.base()] > 0);
        }
    }

    // A gap column of a reverse read gets the lower of its flanking qualities
    let read = contig
        .reads()
        .iter()
        .find(|x| x.direction().is_reverse() && !x.sequence().gaps().is_empty())
        .unwrap();
    let gap = read.sequence().gaps()[0] as i64 + read.start();
    let quality = *map[gap as usize].get(read.id()).unwrap().quality();
    let left = *map[gap as usize - 1].get(read.id()).unwrap().quality();
    let right = (gap + 1..=read.end())
        .map(|x| &map[x as usize])
        .map(|x| x.get(read.id()).unwrap())
        .find(|x| !x.base().is_gap())
        .map(|x| *x.quality())
        .unwrap();
    assert_eq!(quality, left.min(right));
    Ok(())
}

#[test]
fn parallel_build_matches_sequential() -> Result<()> {
    let (contig, quals) = synthetic(500, 120)?;
    let builder = SliceMapBuilder::new().with_qualities(&quals);
    let sequential = builder.build(&contig)?;
    assert_eq!(builder.build(&contig)?, sequential);
    assert_eq!(builder.build_parallel(&contig)?, sequential);

    for threads in [1, 2, 5] {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        let builder = builder.clone().set_thread_pool(pool);
        assert_eq!(builder.build_parallel(&contig)?, sequential);
    }

    let builder = builder.with_threads(-1)?.with_gap_strategy(AlwaysZero);
    assert_eq!(builder.build_parallel(&contig)?, builder.build(&contig)?);
    Ok(())
}

#[test]
fn missing_qualities_fail_the_build() -> Result<()> {
    let (contig, mut quals) = synthetic(200, 30)?;
    quals.remove("read17");

    let builder = SliceMapBuilder::new().with_qualities(&quals);
    for result in [builder.build(&contig), builder.build_parallel(&contig)] {
        let err = result.unwrap_err();
        let err = err.downcast_ref::<MissingQualities>().unwrap();
        assert_eq!(err.read_id.as_ref(), "read17");
    }
    Ok(())
}

#[test]
fn boundary_gap_fails_the_build() -> Result<()> {
    let reads = vec![
        AssembledRead::fully_valid("ok", "ACGT".parse()?, 0, Direction::Forward)?,
        AssembledRead::fully_valid("bad", "CG-".parse()?, 1, Direction::Reverse)?,
    ];
    let contig = Contig::new("ctg", "ACGT".parse()?, reads)?;

    for builder in [
        SliceMapBuilder::new(),
        SliceMapBuilder::new().with_gap_strategy(AlwaysZero),
    ] {
        for result in [builder.build(&contig), builder.build_parallel(&contig)] {
            let err = result.unwrap_err();
            let err = err.downcast_ref::<GapAtReadBoundary>().unwrap();
            assert_eq!(err.read_id.as_ref(), "bad");
            assert_eq!(err.gapped_offset, 2);
        }
    }
    Ok(())
}

#[test]
fn mismatched_quality_length_fails_the_build() -> Result<()> {
    let read = AssembledRead::fully_valid("r1", "ACGT".parse()?, 0, Direction::Forward)?;
    let contig = Contig::new("ctg", "ACGT".parse()?, vec![read])?;

    let mut quals = HashMap::new();
    quals.insert("r1".to_string(), qualities([30, 30, 30]));
    assert!(SliceMapBuilder::new()
        .with_qualities(&quals)
        .build(&contig)
        .is_err());
    Ok(())
}

#[test]
fn uncovered_columns_have_empty_slices() -> Result<()> {
    let read = AssembledRead::fully_valid("r1", "GT".parse()?, 2, Direction::Forward)?;
    let contig = Contig::new("ctg", "ACGTAC".parse()?, vec![read])?;
    let map = SliceMapBuilder::new().build(&contig)?;

    let coverage: Vec<_> = map.iter().map(|x| x.coverage()).collect();
    assert_eq!(coverage, vec![0, 0, 1, 1, 0, 0]);
    assert_eq!(map[0].counts().total(), 0);
    assert_eq!(map[0].consensus_call(), Some(Nucleotide::Adenine));
    assert!(map.get(6).is_none());
    Ok(())
}
