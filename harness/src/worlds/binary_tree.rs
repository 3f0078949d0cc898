//! `BinaryTree`: a complete binary tree addressed by heap index.
//!
//! The root is index 1; node `n` has children `2n` (left) and `2n + 1`
//! (right). Nodes at depth `height` are leaves with no actions.

use plumb_kernel::problem::Problem;

use crate::contract::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Left,
    Right,
}

/// Tallest tree whose heap indices fit in a `u64`.
pub const MAX_HEIGHT: u32 = 62;

/// Complete binary tree of a given height with an optional goal index.
#[derive(Debug, Clone)]
pub struct BinaryTree {
    height: u32,
    goal: Option<u64>,
}

impl BinaryTree {
    /// Tree of `height` levels below the root, clamped to [`MAX_HEIGHT`].
    #[must_use]
    pub fn new(height: u32, goal: Option<u64>) -> Self {
        Self {
            height: height.min(MAX_HEIGHT),
            goal,
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> u64 {
        (1u64 << (self.height + 1)) - 1
    }

    fn depth_of(index: u64) -> u32 {
        63 - index.leading_zeros()
    }
}

impl Problem for BinaryTree {
    type State = u64;
    type Action = Branch;

    fn initial_state(&self) -> u64 {
        1
    }

    fn actions(&self, state: &u64) -> Vec<Branch> {
        if Self::depth_of(*state) < self.height {
            vec![Branch::Left, Branch::Right]
        } else {
            Vec::new()
        }
    }

    fn transition(&self, state: &u64, action: &Branch) -> u64 {
        match action {
            Branch::Left => state * 2,
            Branch::Right => state * 2 + 1,
        }
    }

    fn is_goal(&self, state: &u64) -> bool {
        self.goal == Some(*state)
    }
}

impl World for BinaryTree {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "binary_tree"
    }

    fn describe_state(&self, state: &u64) -> String {
        state.to_string()
    }

    fn describe_action(&self, action: &Branch) -> String {
        match action {
            Branch::Left => "L".into(),
            Branch::Right => "R".into(),
        }
    }
}
