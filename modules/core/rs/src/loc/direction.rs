use std::fmt::Display;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};

/// Sequencing direction of a read relative to the consensus it is aligned against.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(i8)]
pub enum Direction {
    /// The read was sequenced in the same direction as the consensus.
    #[default]
    Forward = 1,
    /// The read is the reverse complement of what was sequenced.
    Reverse = -1,
}

impl Direction {
    /// Flip the direction from forward to reverse or vice versa.
    pub fn flip(&mut self) -> &mut Self {
        *self = self.flipped();
        self
    }

    /// New direction that is the opposite of the current one.
    pub fn flipped(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    /// Get the symbolic representation of the direction.
    pub fn symbol(&self) -> char {
        match self {
            Self::Forward => '+',
            Self::Reverse => '-',
        }
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, Self::Reverse)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Direction {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Self::Forward),
            '-' => Ok(Self::Reverse),
            _ => Err(()),
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = ();

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Reverse),
            _ => Err(()),
        }
    }
}
