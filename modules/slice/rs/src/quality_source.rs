//! Where full-length read qualities come from.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use contigscope_core_rs::seq::PhredQuality;

/// Lookup of full-length ungapped qualities (in sequencing direction) by read ID.
pub trait QualitySource: Send + Sync {
    fn qualities(&self, read_id: &str) -> Option<&[PhredQuality]>;
}

impl<S: BuildHasher + Send + Sync> QualitySource for HashMap<Arc<str>, Vec<PhredQuality>, S> {
    fn qualities(&self, read_id: &str) -> Option<&[PhredQuality]> {
        self.get(read_id).map(|x| x.as_slice())
    }
}

impl<S: BuildHasher + Send + Sync> QualitySource for HashMap<String, Vec<PhredQuality>, S> {
    fn qualities(&self, read_id: &str) -> Option<&[PhredQuality]> {
        self.get(read_id).map(|x| x.as_slice())
    }
}
