//! Search policy types.

use crate::error::SearchError;

/// Largest accepted depth limit. Each level of depth holds one frame of
/// pending siblings, so this bounds the search's own bookkeeping.
pub const MAX_DEPTH_LIMIT: i32 = 1_000_000;

/// Depth limit used when a caller does not choose one.
pub const DEFAULT_DEPTH_LIMIT: i32 = 25;

/// Configuration for a depth-limited search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Maximum number of edges from the root. Values `<= 0` allow only the
    /// root goal test.
    pub depth_limit: i32,
}

impl SearchPolicy {
    /// Policy with the given depth limit.
    #[must_use]
    pub fn with_depth_limit(depth_limit: i32) -> Self {
        Self { depth_limit }
    }

    /// Validate the policy before a search is built from it.
    ///
    /// Negative limits are accepted and mean "root only".
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DepthLimitTooLarge`] if the limit is above
    /// [`MAX_DEPTH_LIMIT`].
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth_limit > MAX_DEPTH_LIMIT {
            return Err(SearchError::DepthLimitTooLarge {
                limit: self.depth_limit,
                max: MAX_DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}
