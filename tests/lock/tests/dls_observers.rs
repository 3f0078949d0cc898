//! Listener and cancellation lock tests.
//!
//! Proves:
//! 1. Listeners see every produced child exactly once, in expansion order
//! 2. `find_state` produces nodes without parent links; `find_actions` keeps them
//! 3. Removed listeners stop receiving nodes
//! 4. Cancellation before the search is an immediate cutoff
//! 5. Cancellation from a listener or another thread stops expansion and
//!    surfaces as a cutoff, never an error

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use plumb_harness::worlds::binary_tree::{BinaryTree, Branch};
use plumb_harness::worlds::linear_chain::{Advance, LinearChain};
use plumb_kernel::cancel::{cancel_after, Cancellable, CancellationToken};
use plumb_kernel::metrics::METRIC_NODES_EXPANDED;
use plumb_kernel::node::Node;
use plumb_search::depth_limited::DepthLimitedSearch;
use plumb_search::outcome::OutcomeKind;

type TreeNode = Node<u64, Branch>;

fn recording_search(limit: i32) -> (DepthLimitedSearch<u64, Branch>, Arc<Mutex<Vec<u64>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut search = DepthLimitedSearch::new(limit);
    search.add_node_listener(move |node: &Arc<TreeNode>| {
        sink.lock().unwrap().push(*node.state());
    });
    (search, seen)
}

// ---------------------------------------------------------------------------
// 1. Ordering
// ---------------------------------------------------------------------------

#[test]
fn listener_sees_children_in_expansion_order() {
    let tree = BinaryTree::new(2, None);
    let (mut search, seen) = recording_search(2);
    assert!(search.find_node(&tree).is_cutoff());
    assert_eq!(*seen.lock().unwrap(), vec![2, 3, 4, 5, 6, 7]);
}

#[test]
fn produced_count_is_twice_expansions_in_binary_tree() {
    let tree = BinaryTree::new(4, None);
    let (mut search, seen) = recording_search(3);
    search.find_node(&tree);
    let expanded = search.metrics().get_int(METRIC_NODES_EXPANDED).unwrap();
    let produced = u64::try_from(seen.lock().unwrap().len()).unwrap();
    assert_eq!(produced, expanded * 2);
}

// ---------------------------------------------------------------------------
// 2. Parent links
// ---------------------------------------------------------------------------

#[test]
fn find_state_omits_parent_links() {
    let chain = LinearChain::new(5);
    let with_parent = Arc::new(AtomicU64::new(0));
    let without_parent = Arc::new(AtomicU64::new(0));
    let (with_sink, without_sink) = (Arc::clone(&with_parent), Arc::clone(&without_parent));

    let mut search = DepthLimitedSearch::new(10);
    search.add_node_listener(move |node: &Arc<Node<u32, Advance>>| {
        if node.parent().is_some() {
            with_sink.fetch_add(1, Ordering::Relaxed);
        } else {
            without_sink.fetch_add(1, Ordering::Relaxed);
        }
    });

    assert_eq!(search.find_state(&chain), Some(4));
    assert_eq!(with_parent.load(Ordering::Relaxed), 0);
    assert_eq!(without_parent.load(Ordering::Relaxed), 4);

    // Switching modes between calls does not carry the previous mode over.
    assert_eq!(search.find_actions(&chain).len(), 4);
    assert_eq!(with_parent.load(Ordering::Relaxed), 4);
    assert_eq!(without_parent.load(Ordering::Relaxed), 4);
}

// ---------------------------------------------------------------------------
// 3. Removal
// ---------------------------------------------------------------------------

#[test]
fn removed_listener_is_silent() {
    let tree = BinaryTree::new(2, None);
    let count = Arc::new(AtomicU64::new(0));
    let sink = Arc::clone(&count);
    let mut search = DepthLimitedSearch::new(5);
    let id = search.add_node_listener(move |_: &Arc<TreeNode>| {
        sink.fetch_add(1, Ordering::Relaxed);
    });

    search.find_node(&tree);
    assert_eq!(count.load(Ordering::Relaxed), 6);

    assert!(search.remove_node_listener(id));
    assert!(!search.remove_node_listener(id));
    search.find_node(&tree);
    assert_eq!(count.load(Ordering::Relaxed), 6);
}

// ---------------------------------------------------------------------------
// 4-5. Cancellation
// ---------------------------------------------------------------------------

#[test]
fn cancelled_before_search_is_immediate_cutoff() {
    let token = CancellationToken::new();
    token.cancel();
    let chain = LinearChain::new(4);
    let mut search = DepthLimitedSearch::new(10).with_cancellation(token);
    assert_eq!(search.find_node(&chain).kind(), OutcomeKind::Cutoff);
    assert_eq!(search.metrics().get_int(METRIC_NODES_EXPANDED), Some(0));
}

#[test]
fn cancelled_search_still_finds_goal_root() {
    let token = CancellationToken::new();
    token.cancel();
    let chain = LinearChain::with_goal(4, 0);
    let mut search = DepthLimitedSearch::new(10).with_cancellation(token);
    assert!(search.find_node(&chain).is_solution());
}

#[test]
fn cancel_from_listener_stops_expansion() {
    let tree = BinaryTree::new(30, None);
    let mut search = DepthLimitedSearch::new(30);
    let token = search.cancellation_token();
    let produced = AtomicU64::new(0);
    search.add_node_listener(move |_: &Arc<TreeNode>| {
        if produced.fetch_add(1, Ordering::Relaxed) + 1 == 100 {
            token.cancel();
        }
    });

    assert!(search.find_node(&tree).is_cutoff());
    // The 100th child is produced by the 50th expansion; nothing after it
    // is expanded.
    assert_eq!(search.metrics().get_int(METRIC_NODES_EXPANDED), Some(50));
}

#[test]
fn cancel_from_another_thread_returns_cutoff() {
    // Far too large to finish: only cancellation ends this search.
    let tree = BinaryTree::new(40, None);
    let mut search = DepthLimitedSearch::new(40);
    let token = search.cancellation_token();
    let timer = cancel_after(&token, Duration::from_millis(20));

    assert!(search.find_node(&tree).is_cutoff());
    assert!(token.is_cancelled());
    assert!(timer.wait());
}

#[test]
fn reset_token_allows_next_search() {
    let chain = LinearChain::new(4);
    let mut search = DepthLimitedSearch::new(3);
    let token = search.cancellation_token();
    token.cancel();
    assert!(search.find_node(&chain).is_cutoff());

    token.reset();
    assert!(search.find_node(&chain).is_solution());
}
