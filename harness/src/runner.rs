//! Harness runner: runs a world through depth-limited search and produces a
//! run report.
//!
//! # Pipeline
//!
//! ```text
//! config.search_policy() → DepthLimitedSearch::from_policy()
//!   → attach produced-node recorder → arm optional timer
//!   → find_actions | find_state | find_node → describe → RunReport
//! ```
//!
//! The report serializes to JSON with sorted keys and no whitespace, so the
//! same world and configuration always produce the same bytes and digest
//! (unless a time limit fires).

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use plumb_kernel::cancel::{cancel_after, Cancellable};
use plumb_kernel::metrics::{Metrics, METRIC_NODES_EXPANDED};
use plumb_kernel::node::{plan_from_node, Node, PlanStep};
use plumb_search::depth_limited::DepthLimitedSearch;
use plumb_search::outcome::{OutcomeKind, SearchOutcome};

use crate::contract::World;
use crate::digest::{content_hash, ContentHash, DOMAIN_RUN_REPORT};
use crate::policy::{ConfigError, OutputMode, RunConfig};

/// Report schema identifier.
pub const RUN_REPORT_SCHEMA: &str = "run_report.v1";

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The configuration was rejected.
    Config(ConfigError),
    /// Report serialization failed.
    Serialize { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Serialize { detail } => write!(f, "report serialization failed: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Outcome as seen through the configured entry point.
///
/// `find_actions` and `find_state` cannot tell cutoff from failure; runs in
/// those modes report [`ReportOutcome::NotFound`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Solution,
    Cutoff,
    Failure,
    NotFound,
}

impl ReportOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solution => "solution",
            Self::Cutoff => "cutoff",
            Self::Failure => "failure",
            Self::NotFound => "not_found",
        }
    }
}

impl From<OutcomeKind> for ReportOutcome {
    fn from(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::Solution => Self::Solution,
            OutcomeKind::Cutoff => Self::Cutoff,
            OutcomeKind::Failure => Self::Failure,
        }
    }
}

/// One node produced by expansion, as recorded in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProducedNodeV1 {
    pub depth: u32,
    pub state: String,
    pub action: Option<String>,
    pub path_cost: f64,
}

/// Result of a harness run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub world_id: String,
    pub config: RunConfig,
    pub outcome: ReportOutcome,
    /// Plan labels (`"NoOp"` for an already-solved root). `None` in state mode
    /// or when no plan was found.
    pub plan: Option<Vec<String>>,
    /// Label of the goal state, when one was found.
    pub goal_state: Option<String>,
    pub metrics: Metrics,
    /// Produced nodes in expansion order, up to `config.max_logged_nodes`.
    pub produced: Vec<ProducedNodeV1>,
    /// Total produced nodes, including those not listed.
    pub produced_total: u64,
    /// Whether cancellation (a fired time limit) cut the run short. Never set
    /// for a solution.
    pub cancelled: bool,
}

/// Produced nodes captured by the run's listener.
struct ProducedLog<S, A> {
    nodes: Vec<Arc<Node<S, A>>>,
    total: u64,
}

/// Run `world` under `config`.
///
/// # Errors
///
/// Returns [`RunError::Config`] if the configuration's search policy is
/// invalid. Search outcomes (including cutoff and cancellation) are never
/// errors.
pub fn run_world<W>(world: &W, config: &RunConfig) -> Result<RunReport, RunError>
where
    W: World,
    W::State: Send + Sync + 'static,
    W::Action: Send + Sync + 'static,
{
    let policy = config.search_policy()?;
    let mut search = DepthLimitedSearch::from_policy(&policy).map_err(ConfigError::from)?;

    let log = Arc::new(Mutex::new(ProducedLog {
        nodes: Vec::new(),
        total: 0,
    }));
    let sink = Arc::clone(&log);
    let cap = config.max_logged_nodes;
    search.add_node_listener(move |node: &Arc<Node<W::State, W::Action>>| {
        let mut log = sink.lock().unwrap_or_else(PoisonError::into_inner);
        log.total += 1;
        if log.nodes.len() < cap {
            log.nodes.push(Arc::clone(node));
        }
    });

    let token = search.cancellation_token();
    let timer = config
        .time_limit_ms
        .map(|ms| cancel_after(&token, Duration::from_millis(ms)));

    let (outcome, plan, goal_state) = match config.output {
        OutputMode::Actions => {
            let plan = search.find_actions(world);
            if plan.is_empty() {
                (ReportOutcome::NotFound, None, None)
            } else {
                let labels = describe_plan(world, &plan);
                (ReportOutcome::Solution, Some(labels), None)
            }
        }
        OutputMode::State => match search.find_state(world) {
            Some(state) => (
                ReportOutcome::Solution,
                None,
                Some(world.describe_state(&state)),
            ),
            None => (ReportOutcome::NotFound, None, None),
        },
        OutputMode::Node => {
            let result = search.find_node(world);
            let kind = ReportOutcome::from(result.kind());
            match result {
                SearchOutcome::Solution(node) => (
                    kind,
                    Some(describe_plan(world, &plan_from_node(&node))),
                    Some(world.describe_state(node.state())),
                ),
                SearchOutcome::Cutoff | SearchOutcome::Failure => (kind, None, None),
            }
        }
    };

    // Disarm before reading the flag so it cannot change afterwards. A
    // solution stands even if the timer fired after it was found.
    if let Some(timer) = timer {
        timer.disarm();
    }
    let cancelled = outcome != ReportOutcome::Solution && token.is_cancelled();
    let metrics = search.metrics().clone();
    drop(search);

    let log = log.lock().unwrap_or_else(PoisonError::into_inner);
    let produced = log
        .nodes
        .iter()
        .map(|n| ProducedNodeV1 {
            depth: n.depth(),
            state: world.describe_state(n.state()),
            action: n.action().map(|a| world.describe_action(a)),
            path_cost: n.path_cost(),
        })
        .collect();

    tracing::info!(
        world_id = world.world_id(),
        mode = config.output.as_str(),
        depth_limit = config.depth_limit,
        outcome = outcome.as_str(),
        nodes_expanded = metrics.get_int(METRIC_NODES_EXPANDED).unwrap_or(0),
        cancelled,
        "run finished"
    );

    Ok(RunReport {
        world_id: world.world_id().to_string(),
        config: config.clone(),
        outcome,
        plan,
        goal_state,
        metrics,
        produced,
        produced_total: log.total,
        cancelled,
    })
}

fn describe_plan<W: World>(world: &W, plan: &[PlanStep<W::Action>]) -> Vec<String> {
    plan.iter()
        .map(|step| match step {
            PlanStep::NoOp => "NoOp".to_string(),
            PlanStep::Apply(action) => world.describe_action(action),
        })
        .collect()
}

impl RunReport {
    /// Convert to a `serde_json::Value`. Object keys are sorted.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cancelled": self.cancelled,
            "config": self.config.to_json_value(),
            "goal_state": self.goal_state,
            "metrics": self.metrics.to_json_value(),
            "outcome": self.outcome.as_str(),
            "plan": self.plan,
            "produced": self.produced.iter().map(produced_to_json).collect::<Vec<_>>(),
            "produced_total": self.produced_total,
            "schema_version": RUN_REPORT_SCHEMA,
            "world_id": self.world_id,
        })
    }

    /// Compact JSON bytes of the report.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Serialize`] if serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, RunError> {
        serde_json::to_vec(&self.to_json_value()).map_err(|e| RunError::Serialize {
            detail: e.to_string(),
        })
    }

    /// Digest of [`Self::to_json_bytes`] under [`DOMAIN_RUN_REPORT`].
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Serialize`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, RunError> {
        Ok(content_hash(DOMAIN_RUN_REPORT, &self.to_json_bytes()?))
    }
}

fn produced_to_json(n: &ProducedNodeV1) -> serde_json::Value {
    serde_json::json!({
        "action": n.action,
        "depth": n.depth,
        "path_cost": n.path_cost,
        "state": n.state,
    })
}
