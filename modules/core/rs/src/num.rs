use std::fmt::Debug;

pub use ::num::{One, Zero};

/// T values are primitive integers
pub trait PrimInt: ::num::PrimInt + Debug + Default + Send + Sync {}
impl<T: ::num::PrimInt + Debug + Default + Send + Sync> PrimInt for T {}

/// Lossy conversion of a coordinate distance into f64, used for coverage averages.
pub fn to_f64<T: PrimInt>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
