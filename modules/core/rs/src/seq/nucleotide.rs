use std::fmt::Display;
use std::ops::{Index, IndexMut};

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use eyre::{eyre, Report, Result};

/// IUPAC nucleotide alphabet extended with the alignment gap (pad).
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum Nucleotide {
    Adenine,
    Cytosine,
    Guanine,
    Thymine,
    /// A or G
    Purine,
    /// C or T
    Pyrimidine,
    /// G or T
    Keto,
    /// A or C
    Amino,
    /// C or G
    Strong,
    /// A or T
    Weak,
    /// Not A
    NotAdenine,
    /// Not C
    NotCytosine,
    /// Not G
    NotGuanine,
    /// Not T
    NotThymine,
    Unknown,
    Gap,
}

impl Nucleotide {
    /// Every symbol of the alphabet, in the order used for per-base counts.
    pub const ALL: [Nucleotide; 16] = [
        Self::Adenine,
        Self::Cytosine,
        Self::Guanine,
        Self::Thymine,
        Self::Purine,
        Self::Pyrimidine,
        Self::Keto,
        Self::Amino,
        Self::Strong,
        Self::Weak,
        Self::NotAdenine,
        Self::NotCytosine,
        Self::NotGuanine,
        Self::NotThymine,
        Self::Unknown,
        Self::Gap,
    ];

    /// Position of the nucleotide inside [`Nucleotide::ALL`].
    #[inline(always)]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline(always)]
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }

    /// Parse an upper- or lower-case IUPAC symbol. Both `-` and `*` denote a gap, `U` is read as T.
    pub fn from_byte(byte: u8) -> Result<Self> {
        let nuc = match byte.to_ascii_uppercase() {
            b'A' => Self::Adenine,
            b'C' => Self::Cytosine,
            b'G' => Self::Guanine,
            b'T' | b'U' => Self::Thymine,
            b'R' => Self::Purine,
            b'Y' => Self::Pyrimidine,
            b'K' => Self::Keto,
            b'M' => Self::Amino,
            b'S' => Self::Strong,
            b'W' => Self::Weak,
            b'B' => Self::NotAdenine,
            b'D' => Self::NotCytosine,
            b'H' => Self::NotGuanine,
            b'V' => Self::NotThymine,
            b'N' | b'X' => Self::Unknown,
            b'-' | b'*' => Self::Gap,
            _ => return Err(eyre!("Unknown nucleotide symbol: {:?}", byte as char)),
        };
        Ok(nuc)
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Adenine => 'A',
            Self::Cytosine => 'C',
            Self::Guanine => 'G',
            Self::Thymine => 'T',
            Self::Purine => 'R',
            Self::Pyrimidine => 'Y',
            Self::Keto => 'K',
            Self::Amino => 'M',
            Self::Strong => 'S',
            Self::Weak => 'W',
            Self::NotAdenine => 'B',
            Self::NotCytosine => 'D',
            Self::NotGuanine => 'H',
            Self::NotThymine => 'V',
            Self::Unknown => 'N',
            Self::Gap => '-',
        }
    }

    pub fn complement(&self) -> Self {
        match self {
            Self::Adenine => Self::Thymine,
            Self::Cytosine => Self::Guanine,
            Self::Guanine => Self::Cytosine,
            Self::Thymine => Self::Adenine,
            Self::Purine => Self::Pyrimidine,
            Self::Pyrimidine => Self::Purine,
            Self::Keto => Self::Amino,
            Self::Amino => Self::Keto,
            Self::Strong => Self::Strong,
            Self::Weak => Self::Weak,
            Self::NotAdenine => Self::NotThymine,
            Self::NotCytosine => Self::NotGuanine,
            Self::NotGuanine => Self::NotCytosine,
            Self::NotThymine => Self::NotAdenine,
            Self::Unknown => Self::Unknown,
            Self::Gap => Self::Gap,
        }
    }
}

impl Display for Nucleotide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<u8> for Nucleotide {
    type Error = Report;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value)
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = Report;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(byte) => Self::from_byte(byte),
            Err(_) => Err(eyre!("Unknown nucleotide symbol: {value:?}")),
        }
    }
}

/// Per-nucleotide counters. Every symbol of the alphabet is always present (zero by default).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NucleotideCounts([usize; Nucleotide::ALL.len()]);

impl NucleotideCounts {
    pub fn increment(&mut self, nuc: Nucleotide) {
        self.0[nuc.index()] += 1;
    }

    /// Total number of counted symbols.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// All (nucleotide, count) pairs in [`Nucleotide::ALL`] order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (Nucleotide, usize)> + '_ {
        Nucleotide::ALL.iter().map(|nuc| (*nuc, self.0[nuc.index()]))
    }
}

impl Index<Nucleotide> for NucleotideCounts {
    type Output = usize;

    fn index(&self, index: Nucleotide) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl IndexMut<Nucleotide> for NucleotideCounts {
    fn index_mut(&mut self, index: Nucleotide) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

impl FromIterator<Nucleotide> for NucleotideCounts {
    fn from_iter<T: IntoIterator<Item = Nucleotide>>(iter: T) -> Self {
        let mut counts = Self::default();
        for nuc in iter {
            counts.increment(nuc);
        }
        counts
    }
}
