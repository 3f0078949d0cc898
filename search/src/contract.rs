//! Caller-facing search traits.
//!
//! Callers that only need a plan or only need a terminal state can depend
//! on these traits instead of a concrete search.

use plumb_kernel::metrics::Metrics;
use plumb_kernel::node::PlanStep;
use plumb_kernel::problem::Problem;

/// A search that produces an action plan.
pub trait SearchForActions<P: Problem + ?Sized> {
    /// Plan from the initial state to a goal. Empty when no plan was found.
    fn find_actions(&mut self, problem: &P) -> Vec<PlanStep<P::Action>>;

    /// Metrics of the most recent invocation.
    fn metrics(&self) -> &Metrics;
}

/// A search that produces only the goal state.
pub trait SearchForStates<P: Problem + ?Sized> {
    /// The goal state reached, or `None` when no goal was found.
    fn find_state(&mut self, problem: &P) -> Option<P::State>;

    /// Metrics of the most recent invocation.
    fn metrics(&self) -> &Metrics;
}
