use contigscope_core_rs::assembly::{AssembledRead, Contig};
use contigscope_core_rs::loc::{Direction, SpanOp};
use contigscope_core_rs::seq::Nucleotide;
use contigscope_tiling_rs::{best_segments, AceBaseSegment, NoMatchingRead};
use eyre::Result;

fn read(id: &str, seq: &str, offset: i64, direction: Direction) -> Result<AssembledRead> {
    AssembledRead::fully_valid(id, seq.parse()?, offset, direction)
}

fn layout(segments: &[AceBaseSegment]) -> Vec<(String, (i64, i64))> {
    segments
        .iter()
        .map(|x| (x.read_id().to_string(), (x.start(), x.end())))
        .collect()
}

// Reads copied from the consensus with a substitution every `period` columns (shifted per read)
fn mutated_contig(length: usize, reads: usize, period: usize) -> Result<Contig> {
    const ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];
    let consensus: Vec<char> = (0..length).map(|i| ALPHABET[(i * 7 / 3) % 4]).collect();

    let mut aligned = Vec::new();
    for ind in 0..reads {
        let start = (ind * 17) % (length - 10);
        let end = (start + 10 + (ind * 31) % 40).min(length);
        let seq: String = (start..end)
            .map(|i| {
                if (i + ind) % period == 0 {
                    let pos = ALPHABET.iter().position(|x| *x == consensus[i]).unwrap_or(0);
                    ALPHABET[(pos + 1) % 4]
                } else {
                    consensus[i]
                }
            })
            .collect();
        let direction = if ind % 2 == 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };
        aligned.push(read(&format!("r{ind}"), &seq, start as i64, direction)?);
    }
    let consensus: String = consensus.into_iter().collect();
    Contig::new("mutated", consensus.parse()?, aligned)
}

fn first_unsupported(contig: &Contig) -> Option<i64> {
    contig
        .consensus()
        .iter()
        .enumerate()
        .map(|(i, base)| (i as i64, base))
        .find(|(i, base)| !contig.reads_covering(*i).any(|x| x.base_at(*i) == Some(*base)))
        .map(|(i, _)| i)
}

#[test]
fn switches_exemplar_at_gaps() -> Result<()> {
    let contig = Contig::new(
        "ctg",
        "ACGTACGT".parse()?,
        vec![
            read("read1", "ACG-ACGT", 0, Direction::Forward)?,
            read("read2", "ACGTAC-T", 0, Direction::Forward)?,
        ],
    )?;
    assert_eq!(
        layout(&best_segments(&contig)?),
        vec![
            ("read1".to_string(), (0, 2)),
            ("read2".to_string(), (3, 5)),
            ("read1".to_string(), (6, 7)),
        ]
    );
    Ok(())
}

#[test]
fn ambiguous_consensus_without_support() -> Result<()> {
    let contig = Contig::new(
        "ctg",
        "ACGWACGT".parse()?,
        vec![
            read("read1", "ACGTACGT", 0, Direction::Forward)?,
            read("read2", "ACGAACGT", 0, Direction::Reverse)?,
        ],
    )?;
    let err = best_segments(&contig).unwrap_err();
    let err = err.downcast_ref::<NoMatchingRead>().unwrap();
    assert_eq!(err.offset, 3);
    Ok(())
}

#[test]
fn gapped_consensus_columns() -> Result<()> {
    let contig = Contig::new(
        "ctg",
        "AC-GT".parse()?,
        vec![
            read("a", "ACTG", 0, Direction::Forward)?,
            read("b", "C-GT", 1, Direction::Forward)?,
        ],
    )?;
    assert_eq!(
        layout(&best_segments(&contig)?),
        vec![("a".to_string(), (0, 1)), ("b".to_string(), (2, 4))]
    );
    assert_eq!(contig.consensus().get(2), Some(Nucleotide::Gap));
    Ok(())
}

#[test]
fn segments_tile_the_consensus() -> Result<()> {
    for (reads, period) in [(60, 5), (80, 3), (40, 11), (25, 2)] {
        let contig = mutated_contig(300, reads, period)?;
        let result = best_segments(&contig);

        let Some(unsupported) = first_unsupported(&contig) else {
            let segments = result?;
            assert_eq!(segments.first().map(|x| x.start()), Some(0));
            assert_eq!(segments.last().map(|x| x.end()), Some(contig.len() as i64 - 1));
            assert_eq!(
                segments.iter().map(|x| x.len()).sum::<i64>(),
                contig.len() as i64
            );

            for pair in segments.windows(2) {
                assert_eq!(pair[0].end() + 1, pair[1].start());
                // A switch happens only when the previous exemplar can't continue
                let previous = contig.read(pair[0].read_id()).unwrap();
                let base = contig.consensus().get(pair[1].start() as usize);
                assert_ne!(previous.base_at(pair[1].start()), base);
            }

            for segment in &segments {
                let read = contig.read(segment.read_id()).unwrap();
                for column in segment.span().iter() {
                    assert_eq!(
                        read.base_at(column),
                        contig.consensus().get(column as usize)
                    );
                }
            }
            continue;
        };

        let err = result.unwrap_err();
        assert_eq!(err.downcast_ref::<NoMatchingRead>().unwrap().offset, unsupported);
    }
    Ok(())
}
