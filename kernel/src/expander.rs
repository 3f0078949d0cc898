//! Node expansion with an observer side channel.

use std::sync::Arc;

use crate::node::{Node, ParentLinks};
use crate::problem::Problem;

/// Callback invoked once per node produced by expansion.
pub type NodeListener<S, A> = Box<dyn Fn(&Arc<Node<S, A>>) + Send + Sync>;

/// Handle returned by [`NodeExpander::add_node_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Produces child nodes in problem action order.
///
/// Listeners are notified synchronously after each child is fully built, in
/// the order the children are produced. They observe only; nothing they do
/// changes what the expander returns.
pub struct NodeExpander<S, A> {
    listeners: Vec<(ListenerId, NodeListener<S, A>)>,
    next_listener_id: u64,
}

impl<S, A> NodeExpander<S, A> {
    /// Create an expander with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Build the root node for `state`.
    #[must_use]
    pub fn create_root_node(&self, state: S) -> Arc<Node<S, A>> {
        Arc::new(Node::root(state))
    }

    /// Expand `node` into one child per applicable action.
    ///
    /// `links` applies to this call only; no mode is remembered between calls.
    pub fn expand<P>(
        &self,
        node: &Arc<Node<S, A>>,
        problem: &P,
        links: ParentLinks,
    ) -> Vec<Arc<Node<S, A>>>
    where
        P: Problem<State = S, Action = A> + ?Sized,
    {
        let actions = problem.actions(node.state());
        let mut children = Vec::with_capacity(actions.len());
        for action in actions {
            let next = problem.transition(node.state(), &action);
            let step_cost = problem.step_cost(node.state(), &action, &next);
            let child = Arc::new(Node::child(node, action, next, step_cost, links));
            for (_, listener) in &self.listeners {
                listener(&child);
            }
            children.push(child);
        }
        tracing::trace!(depth = node.depth(), children = children.len(), "expanded node");
        children
    }

    /// Register a listener; returns a handle for removal.
    pub fn add_node_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&Arc<Node<S, A>>) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if `id` was not registered.
    pub fn remove_node_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<S, A> Default for NodeExpander<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> std::fmt::Debug for NodeExpander<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeExpander")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
