//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Search outcomes,
//! including cutoff and cancellation, are ordinary values of
//! [`crate::outcome::SearchOutcome`] and never errors.

/// Typed failure for pre-flight search validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The depth limit exceeds what the search is willing to allocate frames for.
    DepthLimitTooLarge { limit: i32, max: i32 },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepthLimitTooLarge { limit, max } => {
                write!(f, "depth limit {limit} exceeds maximum {max}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
