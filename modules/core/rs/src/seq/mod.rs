pub use gapped::GappedSequence;
pub use nucleotide::{Nucleotide, NucleotideCounts};
pub use quality::PhredQuality;

mod gapped;
mod nucleotide;
mod quality;
