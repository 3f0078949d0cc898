//! `LinearChain`: states `0..length` joined by a single forward action.
//!
//! States are labelled `A`, `B`, `C`, ... in reports (numbers past `Z`).
//! The default goal is the last state, which sits at depth `length - 1`.

use plumb_kernel::problem::Problem;

use crate::contract::World;

/// The only action: advance from one state to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub from: u32,
    pub to: u32,
}

/// A chain of `length` states with an optional goal.
#[derive(Debug, Clone)]
pub struct LinearChain {
    length: u32,
    goal: Option<u32>,
}

impl LinearChain {
    /// Chain whose goal is its last state.
    #[must_use]
    pub fn new(length: u32) -> Self {
        Self {
            length,
            goal: length.checked_sub(1),
        }
    }

    /// Chain with no goal anywhere.
    #[must_use]
    pub fn without_goal(length: u32) -> Self {
        Self { length, goal: None }
    }

    /// Chain with the goal at `goal`.
    #[must_use]
    pub fn with_goal(length: u32, goal: u32) -> Self {
        Self {
            length,
            goal: Some(goal),
        }
    }
}

fn label(state: u32) -> String {
    match u8::try_from(state) {
        Ok(n) if n < 26 => char::from(b'A' + n).to_string(),
        _ => state.to_string(),
    }
}

impl Problem for LinearChain {
    type State = u32;
    type Action = Advance;

    fn initial_state(&self) -> u32 {
        0
    }

    fn actions(&self, state: &u32) -> Vec<Advance> {
        if state + 1 < self.length {
            vec![Advance {
                from: *state,
                to: state + 1,
            }]
        } else {
            Vec::new()
        }
    }

    fn transition(&self, _state: &u32, action: &Advance) -> u32 {
        action.to
    }

    fn is_goal(&self, state: &u32) -> bool {
        self.goal == Some(*state)
    }
}

impl World for LinearChain {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "linear_chain"
    }

    fn describe_state(&self, state: &u32) -> String {
        label(*state)
    }

    fn describe_action(&self, action: &Advance) -> String {
        format!("{}->{}", label(action.from), label(action.to))
    }
}
