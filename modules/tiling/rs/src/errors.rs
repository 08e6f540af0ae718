use derive_more::{Display, Error};

/// None of the reads covering a consensus column agrees with the consensus base there.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
#[display("No read of the contig {contig} matches the consensus at {offset}")]
pub struct NoMatchingRead {
    pub contig: String,
    pub offset: i64,
}
