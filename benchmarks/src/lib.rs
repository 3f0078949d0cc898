//! Shared helpers for plumb benchmark suites.

use plumb_harness::worlds::binary_tree::BinaryTree;
use plumb_kernel::metrics::METRIC_NODES_EXPANDED;
use plumb_kernel::problem::Problem;
use plumb_search::depth_limited::DepthLimitedSearch;
use plumb_search::outcome::OutcomeKind;

/// Tree whose only goal is its rightmost leaf: depth-first search visits
/// every other node before reaching it.
#[must_use]
pub fn rightmost_goal_tree(height: u32) -> BinaryTree {
    let tree = BinaryTree::new(height, None);
    BinaryTree::new(height, Some(tree.node_count()))
}

/// Run one search and return its outcome and expansion count.
pub fn run_once<P: Problem + ?Sized>(problem: &P, limit: i32) -> (OutcomeKind, u64) {
    let mut search = DepthLimitedSearch::new(limit);
    let kind = search.find_node(problem).kind();
    let expanded = search.metrics().get_int(METRIC_NODES_EXPANDED).unwrap_or(0);
    (kind, expanded)
}

/// Outcome and expansion count of one search as a JSON object, printed
/// before a benchmark group so inputs can be compared across machines.
#[must_use]
pub fn describe_input<P: Problem + ?Sized>(
    name: &str,
    problem: &P,
    limit: i32,
) -> serde_json::Value {
    let (kind, expanded) = run_once(problem, limit);
    serde_json::json!({
        "input": name,
        "limit": limit,
        "nodes_expanded": expanded,
        "outcome": kind.as_str(),
    })
}
