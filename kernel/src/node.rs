//! Search tree nodes and action plans.

use std::sync::Arc;

/// Whether child nodes keep a link to the node they were expanded from.
///
/// Links are required to reconstruct an action path. When only the terminal
/// state matters they can be omitted so that finished subtrees are released
/// as soon as the search leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLinks {
    /// Children hold an `Arc` to their parent.
    Retain,
    /// Children are created without a parent link.
    Omit,
}

/// An immutable point in the search tree.
///
/// Nodes are never mutated after creation and are shared through `Arc`, so
/// listeners may hold on to them without synchronization.
#[derive(Debug, Clone)]
pub struct Node<S, A> {
    state: S,
    parent: Option<Arc<Node<S, A>>>,
    action: Option<A>,
    path_cost: f64,
    depth: u32,
}

impl<S, A> Node<S, A> {
    /// Create a root node: no parent, no action, zero cost, depth 0.
    #[must_use]
    pub fn root(state: S) -> Self {
        Self {
            state,
            parent: None,
            action: None,
            path_cost: 0.0,
            depth: 0,
        }
    }

    /// Create the child reached from `parent` by `action`.
    ///
    /// Cost and depth accumulate from the parent whether or not the parent
    /// link is retained.
    #[must_use]
    pub fn child(
        parent: &Arc<Self>,
        action: A,
        state: S,
        step_cost: f64,
        links: ParentLinks,
    ) -> Self {
        Self {
            state,
            parent: match links {
                ParentLinks::Retain => Some(Arc::clone(parent)),
                ParentLinks::Omit => None,
            },
            action: Some(action),
            path_cost: parent.path_cost + step_cost,
            depth: parent.depth.saturating_add(1),
        }
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Node<S, A>>> {
        self.parent.as_ref()
    }

    /// The action that produced this node (`None` for a root).
    #[must_use]
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn path_cost(&self) -> f64 {
        self.path_cost
    }

    /// Tree depth (root = 0).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// True if this node has no parent link and no producing action.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none() && self.action.is_none()
    }

    /// Nodes from the furthest reachable ancestor down to `self`.
    ///
    /// With parent links retained the first element is the root. Without
    /// links the path contains only `self`.
    #[must_use]
    pub fn path_from_root(&self) -> Vec<&Node<S, A>> {
        let mut path = Vec::with_capacity(self.depth as usize + 1);
        let mut current = Some(self);
        while let Some(node) = current {
            path.push(node);
            current = node.parent.as_deref();
        }
        path.reverse();
        path
    }
}

impl<S, A> Drop for Node<S, A> {
    // Unlink iteratively so that a long parent chain does not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            match Arc::try_unwrap(parent) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl<S, A: Clone> Node<S, A> {
    /// Producing actions along [`Node::path_from_root`], in root-to-self order.
    #[must_use]
    pub fn actions_from_root(&self) -> Vec<A> {
        self.path_from_root()
            .into_iter()
            .filter_map(|n| n.action.clone())
            .collect()
    }
}

/// One element of an action plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep<A> {
    /// Placeholder meaning "the initial state is already a goal".
    NoOp,
    /// Apply this action.
    Apply(A),
}

impl<A> PlanStep<A> {
    /// The wrapped action (`None` for [`PlanStep::NoOp`]).
    #[must_use]
    pub fn action(&self) -> Option<&A> {
        match self {
            Self::NoOp => None,
            Self::Apply(a) => Some(a),
        }
    }

    #[must_use]
    pub fn is_no_op(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Convert a solution node into a plan.
///
/// A root solution yields `[NoOp]`; any other node yields one `Apply` per
/// edge on its path from the root.
#[must_use]
pub fn plan_from_node<S, A: Clone>(node: &Node<S, A>) -> Vec<PlanStep<A>> {
    if node.is_root() {
        return vec![PlanStep::NoOp];
    }
    node.actions_from_root()
        .into_iter()
        .map(PlanStep::Apply)
        .collect()
}
