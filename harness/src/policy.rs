//! Run configuration: the conditions under which a world is searched.
//!
//! The runner derives a [`SearchPolicy`] from a [`RunConfig`]. Worlds do NOT
//! declare configuration; that would let a world choose its own budget.
//!
//! Configurations are plain JSON objects. Every field is optional:
//!
//! ```json
//! {"depth_limit": 8, "output": "actions", "time_limit_ms": 250, "max_logged_nodes": 1000}
//! ```

use serde::Deserialize;

use plumb_search::error::SearchError;
use plumb_search::policy::{SearchPolicy, DEFAULT_DEPTH_LIMIT};

/// Default cap on produced nodes recorded in a run report.
const DEFAULT_MAX_LOGGED_NODES: usize = 10_000;

/// Which search entry point the runner calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// `find_actions`: report the plan.
    Actions,
    /// `find_state`: report only the goal state.
    State,
    /// `find_node`: report the plan and the solution / cutoff / failure distinction.
    Node,
}

impl OutputMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Actions => "actions",
            Self::State => "state",
            Self::Node => "node",
        }
    }
}

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Depth limit passed to the search. `<= 0` tests only the root.
    pub depth_limit: i32,
    /// Entry point to call.
    pub output: OutputMode,
    /// Optional wall-clock limit; on expiry the search is cancelled and
    /// reports a cutoff.
    pub time_limit_ms: Option<u64>,
    /// Produced nodes beyond this count are tallied but not listed.
    pub max_logged_nodes: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            output: OutputMode::Node,
            time_limit_ms: None,
            max_logged_nodes: DEFAULT_MAX_LOGGED_NODES,
        }
    }
}

/// Error loading or validating a run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON could not be parsed into a [`RunConfig`].
    Parse { detail: String },
    /// The derived search policy is invalid.
    Invalid(SearchError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "invalid run config: {detail}"),
            Self::Invalid(e) => write!(f, "invalid search policy: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<SearchError> for ConfigError {
    fn from(e: SearchError) -> Self {
        Self::Invalid(e)
    }
}

impl RunConfig {
    /// Parse and validate a configuration from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] if the depth limit fails policy validation.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse {
            detail: e.to_string(),
        })?;
        config.search_policy()?;
        Ok(config)
    }

    /// The validated search policy for this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the policy fails validation.
    pub fn search_policy(&self) -> Result<SearchPolicy, ConfigError> {
        let policy = SearchPolicy::with_depth_limit(self.depth_limit);
        policy.validate()?;
        Ok(policy)
    }

    /// Echo of the configuration as it appears in run reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "depth_limit": self.depth_limit,
            "max_logged_nodes": self.max_logged_nodes,
            "output": self.output.as_str(),
            "time_limit_ms": self.time_limit_ms,
        })
    }
}
