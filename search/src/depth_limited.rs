//! Depth-limited search: the bounded-depth primitive that iterative
//! deepening and similar strategies are layered on.
//!
//! # Algorithm
//!
//! ```text
//! search(node, remaining):
//!   if problem.test_solution(node)            -> Solution(node)
//!   else if remaining <= 0 or cancelled       -> Cutoff
//!   else
//!     nodesExpanded += 1
//!     for child in expand(node)               (problem action order)
//!       match search(child, remaining - 1)
//!         Solution  -> return it
//!         Cutoff    -> cutoff_occurred = true
//!         Failure   -> continue
//!     if cutoff_occurred -> Cutoff else Failure
//! ```
//!
//! The recursion is run on an explicit frame stack (one frame per expanded
//! node on the current path), so large limits cannot exhaust the thread's
//! call stack. Outcomes are identical to the recursive definition.

use std::sync::Arc;

use plumb_kernel::cancel::{Cancellable, CancellationToken};
use plumb_kernel::expander::{ListenerId, NodeExpander};
use plumb_kernel::metrics::{Metrics, METRIC_NODES_EXPANDED, METRIC_PATH_COST};
use plumb_kernel::node::{plan_from_node, Node, ParentLinks, PlanStep};
use plumb_kernel::problem::Problem;

use crate::contract::{SearchForActions, SearchForStates};
use crate::error::SearchError;
use crate::outcome::SearchOutcome;
use crate::policy::SearchPolicy;

/// Bounded-depth search over a [`Problem`].
///
/// One instance owns its metrics; concurrent searches need separate
/// instances. Cancellation is shared through the [`CancellationToken`],
/// which other threads may set at any time.
pub struct DepthLimitedSearch<S, A> {
    limit: i32,
    expander: NodeExpander<S, A>,
    cancellation: CancellationToken,
    metrics: Metrics,
}

/// An expanded node whose children are still being searched.
struct Frame<S, A> {
    children: std::vec::IntoIter<Arc<Node<S, A>>>,
    remaining: i32,
    cutoff_occurred: bool,
}

/// What visiting one node produced.
enum Visit<S, A> {
    /// The node resolved without expansion (solution or cutoff).
    Resolved(SearchOutcome<S, A>),
    /// The node was expanded; its children must be searched.
    Expanded(Frame<S, A>),
}

impl<S, A> DepthLimitedSearch<S, A>
where
    S: Clone,
    A: Clone,
{
    /// Create a search with the given limit, an expander without listeners,
    /// and a fresh cancellation token.
    ///
    /// Any limit `<= 0` only tests the root: a goal root is a solution,
    /// anything else is an immediate cutoff.
    #[must_use]
    pub fn new(limit: i32) -> Self {
        Self {
            limit,
            expander: NodeExpander::new(),
            cancellation: CancellationToken::new(),
            metrics: Metrics::new(),
        }
    }

    /// Build a search from a validated policy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the policy fails validation.
    pub fn from_policy(policy: &SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self::new(policy.depth_limit))
    }

    /// Replace the expander (and with it, any registered listeners).
    #[must_use]
    pub fn with_expander(mut self, expander: NodeExpander<S, A>) -> Self {
        self.expander = expander;
        self
    }

    /// Use `token` as the cancellation scope for every subsequent call.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    #[must_use]
    pub fn limit(&self) -> i32 {
        self.limit
    }

    /// A handle to this search's cancellation flag.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Metrics of the most recent `find_*` call.
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Register a listener invoked once per produced node, in expansion order.
    pub fn add_node_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Arc<Node<S, A>>) + Send + Sync + 'static,
    {
        self.expander.add_node_listener(listener)
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove_node_listener(&mut self, id: ListenerId) -> bool {
        self.expander.remove_node_listener(id)
    }

    /// Search for a plan from the initial state to a goal.
    ///
    /// Returns `[NoOp]` if the initial state is already a goal, one
    /// `Apply` per edge for any other solution, and an empty plan on both
    /// cutoff and failure. Use [`Self::find_node`] to tell those apart.
    pub fn find_actions<P>(&mut self, problem: &P) -> Vec<PlanStep<A>>
    where
        P: Problem<State = S, Action = A> + ?Sized,
    {
        match self.find_node_with_links(problem, ParentLinks::Retain) {
            SearchOutcome::Solution(node) => plan_from_node(&node),
            SearchOutcome::Cutoff | SearchOutcome::Failure => Vec::new(),
        }
    }

    /// Search for a goal state only.
    ///
    /// Parent links are not kept, so subtrees are released as soon as the
    /// search leaves them. Returns `None` on both cutoff and failure.
    pub fn find_state<P>(&mut self, problem: &P) -> Option<S>
    where
        P: Problem<State = S, Action = A> + ?Sized,
    {
        self.find_node_with_links(problem, ParentLinks::Omit)
            .into_solution()
            .map(|node| node.state().clone())
    }

    /// Run the search and return the full three-way outcome, keeping
    /// parent links so the solution's path can be walked.
    pub fn find_node<P>(&mut self, problem: &P) -> SearchOutcome<S, A>
    where
        P: Problem<State = S, Action = A> + ?Sized,
    {
        self.find_node_with_links(problem, ParentLinks::Retain)
    }

    /// Shared primitive behind every `find_*` entry point.
    ///
    /// Resets metrics, builds the root node, and runs the search with the
    /// given parent-link mode.
    pub fn find_node_with_links<P>(
        &mut self,
        problem: &P,
        links: ParentLinks,
    ) -> SearchOutcome<S, A>
    where
        P: Problem<State = S, Action = A> + ?Sized,
    {
        self.clear_instrumentation();
        tracing::debug!(limit = self.limit, ?links, "depth-limited search started");

        let root = self.expander.create_root_node(problem.initial_state());
        let outcome = self.search(root, problem, links);

        let nodes_expanded = self.metrics.get_int(METRIC_NODES_EXPANDED).unwrap_or(0);
        if outcome.is_cutoff() && self.cancellation.is_cancelled() {
            tracing::info!(
                limit = self.limit,
                nodes_expanded,
                "depth-limited search cancelled"
            );
        }
        tracing::debug!(
            limit = self.limit,
            outcome = outcome.kind().as_str(),
            nodes_expanded,
            "depth-limited search finished"
        );
        outcome
    }

    fn clear_instrumentation(&mut self) {
        self.metrics.clear();
        self.metrics.set_int(METRIC_NODES_EXPANDED, 0);
        self.metrics.set_float(METRIC_PATH_COST, 0.0);
    }

    fn search<P>(
        &mut self,
        root: Arc<Node<S, A>>,
        problem: &P,
        links: ParentLinks,
    ) -> SearchOutcome<S, A>
    where
        P: Problem<State = S, Action = A> + ?Sized,
    {
        let mut stack = match self.visit(root, problem, self.limit, links) {
            Visit::Resolved(outcome) => return outcome,
            Visit::Expanded(frame) => vec![frame],
        };

        loop {
            let Some(frame) = stack.last_mut() else {
                // The root frame's completion returns below; an empty stack
                // means every frame was already resolved.
                return SearchOutcome::Failure;
            };

            if let Some(child) = frame.children.next() {
                let remaining = frame.remaining - 1;
                match self.visit(child, problem, remaining, links) {
                    Visit::Resolved(SearchOutcome::Solution(node)) => {
                        return SearchOutcome::Solution(node);
                    }
                    Visit::Resolved(SearchOutcome::Cutoff) => {
                        if let Some(parent) = stack.last_mut() {
                            parent.cutoff_occurred = true;
                        }
                    }
                    Visit::Resolved(SearchOutcome::Failure) => {}
                    Visit::Expanded(next) => stack.push(next),
                }
                continue;
            }

            // All children tried: this node's outcome flows to its parent.
            let cutoff_occurred = frame.cutoff_occurred;
            stack.pop();
            match stack.last_mut() {
                None if cutoff_occurred => return SearchOutcome::Cutoff,
                None => return SearchOutcome::Failure,
                Some(parent) => parent.cutoff_occurred |= cutoff_occurred,
            }
        }
    }

    fn visit<P>(
        &mut self,
        node: Arc<Node<S, A>>,
        problem: &P,
        remaining: i32,
        links: ParentLinks,
    ) -> Visit<S, A>
    where
        P: Problem<State = S, Action = A> + ?Sized,
    {
        // Goal test precedes the depth check: a goal root is found at any limit.
        if problem.test_solution(&node) {
            self.metrics.set_float(METRIC_PATH_COST, node.path_cost());
            return Visit::Resolved(SearchOutcome::Solution(node));
        }
        if remaining <= 0 || self.cancellation.is_cancelled() {
            return Visit::Resolved(SearchOutcome::Cutoff);
        }

        self.metrics.increment_int(METRIC_NODES_EXPANDED);
        let children = self.expander.expand(&node, problem, links);
        Visit::Expanded(Frame {
            children: children.into_iter(),
            remaining,
            cutoff_occurred: false,
        })
    }
}

impl<S, A> std::fmt::Debug for DepthLimitedSearch<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthLimitedSearch")
            .field("limit", &self.limit)
            .field("expander", &self.expander)
            .field("cancellation", &self.cancellation)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl<P> SearchForActions<P> for DepthLimitedSearch<P::State, P::Action>
where
    P: Problem + ?Sized,
{
    fn find_actions(&mut self, problem: &P) -> Vec<PlanStep<P::Action>> {
        Self::find_actions(self, problem)
    }

    fn metrics(&self) -> &Metrics {
        Self::metrics(self)
    }
}

impl<P> SearchForStates<P> for DepthLimitedSearch<P::State, P::Action>
where
    P: Problem + ?Sized,
{
    fn find_state(&mut self, problem: &P) -> Option<P::State> {
        Self::find_state(self, problem)
    }

    fn metrics(&self) -> &Metrics {
        Self::metrics(self)
    }
}
