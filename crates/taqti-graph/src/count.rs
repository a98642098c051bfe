// Syllable-count acceptance filter.

use taqti_core::weight::weight_sum;

/// Target metrical count for accepting a completed scan.
///
/// A completed path's count is the sum over its weight string, longs
/// counting 2 and shorts counting 1. With no target configured, every
/// ending-flagged completion is accepted; a rejected completion is simply
/// excluded from the results, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountTarget {
    /// The count must equal this value.
    Exact(u32),
    /// The count must be one of these values.
    OneOf(Vec<u32>),
}

impl CountTarget {
    /// Whether a completed scan with the given count passes the filter.
    pub fn accepts(&self, count: u32) -> bool {
        match self {
            CountTarget::Exact(n) => count == *n,
            CountTarget::OneOf(set) => set.contains(&count),
        }
    }

    /// Whether a completed scan with the given weight string passes.
    pub fn accepts_scan(&self, scan: &str) -> bool {
        self.accepts(weight_sum(scan))
    }
}
