//! Problem contract: the state space a search explores.

use std::fmt::Debug;

use crate::node::Node;

/// A state space with an initial state, ordered actions, a transition
/// function, a goal test, and a step-cost function.
///
/// # Contract
///
/// - `actions` must be deterministic: the same state yields the same actions
///   in the same order. Searches preserve this order when expanding.
/// - Every action returned by `actions(state)` must be valid input to
///   `transition(state, action)`.
/// - `step_cost` must be non-negative so that path cost never decreases
///   along a path.
pub trait Problem {
    /// Opaque state type, compared by value.
    type State: Clone + PartialEq + Debug;
    /// Opaque action type.
    type Action: Clone + Debug;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Actions applicable in `state`, in the order they should be tried.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state reached by applying `action` in `state`.
    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// Cost of the step `state --action--> next`. Defaults to 1.
    fn step_cost(&self, _state: &Self::State, _action: &Self::Action, _next: &Self::State) -> f64 {
        1.0
    }

    /// Whether `node` is a solution.
    ///
    /// Defaults to the goal test on the node's state. Problems whose goal
    /// depends on the path taken may override this.
    fn test_solution(&self, node: &Node<Self::State, Self::Action>) -> bool {
        self.is_goal(node.state())
    }
}
