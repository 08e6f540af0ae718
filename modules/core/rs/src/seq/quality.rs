#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_more::{Display, Into};
use eyre::{ensure, Report, Result};

/// Phred-scaled base-call confidence, Q = -10 * log10(P(error)).
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Display, Into,
)]
pub struct PhredQuality(u8);

impl PhredQuality {
    pub const MIN: PhredQuality = PhredQuality(0);
    pub const MAX: PhredQuality = PhredQuality(93);

    pub fn new(value: u8) -> Result<Self> {
        ensure!(
            value <= Self::MAX.0,
            "Phred quality must be within [{}, {}], got {value}",
            Self::MIN.0,
            Self::MAX.0
        );
        Ok(Self(value))
    }

    /// Same as [`PhredQuality::new`] for compile-time constants. Out-of-range values saturate at
    /// [`PhredQuality::MAX`].
    pub const fn saturating(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    #[inline(always)]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Probability that the base call is wrong.
    pub fn error_probability(&self) -> f64 {
        10f64.powf(-(self.0 as f64) / 10.0)
    }

    /// Parse a list of raw phred values.
    pub fn from_values(values: impl IntoIterator<Item = u8>) -> Result<Vec<Self>> {
        values.into_iter().map(Self::new).collect()
    }
}

impl TryFrom<u8> for PhredQuality {
    type Error = Report;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(PhredQuality::new(30).unwrap().value(), 30);
        assert!(PhredQuality::new(93).is_ok());
        assert!(PhredQuality::new(94).is_err());
        assert!(PhredQuality::from_values([10, 20, 200]).is_err());

        assert_eq!(PhredQuality::try_from(93u8).unwrap(), PhredQuality::MAX);
        assert!(PhredQuality::try_from(94u8).is_err());
        assert!(PhredQuality::try_from(200u8).is_err());
        assert_eq!(u8::from(PhredQuality::MAX), 93);

        const Q30: PhredQuality = PhredQuality::saturating(30);
        assert_eq!(Q30.value(), 30);
        assert_eq!(PhredQuality::saturating(200), PhredQuality::MAX);
    }

    #[test]
    fn test_error_probability() {
        let q = PhredQuality::new(20).unwrap();
        assert!((q.error_probability() - 0.01).abs() < 1e-12);
        assert_eq!(PhredQuality::MIN.error_probability(), 1.0);
    }

    #[test]
    fn test_ordering() {
        let (a, b) = (PhredQuality::new(14).unwrap(), PhredQuality::new(15).unwrap());
        assert_eq!(a.min(b), a);
        assert_eq!(format!("{}", b), "15");
    }
}
