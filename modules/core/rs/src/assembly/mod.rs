pub use contig::Contig;
pub use read::AssembledRead;

mod contig;
mod read;
