//! Three-way search outcome.

use std::sync::Arc;

use plumb_kernel::node::Node;

/// Result of a depth-limited search.
#[derive(Debug, Clone)]
pub enum SearchOutcome<S, A> {
    /// A node satisfying the solution test.
    Solution(Arc<Node<S, A>>),
    /// The depth limit (or cancellation) truncated the search before it
    /// could rule a solution out.
    Cutoff,
    /// Every branch within the limit was exhausted without a solution.
    Failure,
}

/// Copyable tag for [`SearchOutcome`] without the solution payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Solution,
    Cutoff,
    Failure,
}

impl OutcomeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solution => "solution",
            Self::Cutoff => "cutoff",
            Self::Failure => "failure",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<S, A> SearchOutcome<S, A> {
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Solution(_) => OutcomeKind::Solution,
            Self::Cutoff => OutcomeKind::Cutoff,
            Self::Failure => OutcomeKind::Failure,
        }
    }

    #[must_use]
    pub fn is_solution(&self) -> bool {
        matches!(self, Self::Solution(_))
    }

    #[must_use]
    pub fn is_cutoff(&self) -> bool {
        matches!(self, Self::Cutoff)
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }

    /// The solution node, if any.
    #[must_use]
    pub fn solution(&self) -> Option<&Arc<Node<S, A>>> {
        match self {
            Self::Solution(node) => Some(node),
            Self::Cutoff | Self::Failure => None,
        }
    }

    /// Consume the outcome, keeping only the solution node.
    #[must_use]
    pub fn into_solution(self) -> Option<Arc<Node<S, A>>> {
        match self {
            Self::Solution(node) => Some(node),
            Self::Cutoff | Self::Failure => None,
        }
    }
}
