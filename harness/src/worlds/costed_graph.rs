//! `CostedGraph`: an explicit weighted digraph with named vertices.
//!
//! Edges are tried in insertion order. Step cost is the edge weight, so
//! solutions carry non-unit path costs.

use std::collections::BTreeMap;

use plumb_kernel::problem::Problem;

use crate::contract::World;

/// A directed, weighted edge taken as an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub cost: f64,
}

/// Weighted digraph with a start vertex and a set of goal vertices.
#[derive(Debug, Clone, Default)]
pub struct CostedGraph {
    names: Vec<String>,
    index: BTreeMap<String, usize>,
    edges: Vec<Vec<Edge>>,
    start: usize,
    goals: Vec<usize>,
}

impl CostedGraph {
    /// Empty graph whose start vertex is `start`.
    #[must_use]
    pub fn new(start: &str) -> Self {
        let mut graph = Self::default();
        graph.start = graph.vertex(start);
        graph
    }

    /// Add a directed edge, creating vertices as needed.
    ///
    /// Negative weights are clamped to zero so path cost never decreases.
    #[must_use]
    pub fn edge(mut self, from: &str, to: &str, cost: f64) -> Self {
        let from = self.vertex(from);
        let to = self.vertex(to);
        self.edges[from].push(Edge {
            from,
            to,
            cost: cost.max(0.0),
        });
        self
    }

    /// Mark `name` as a goal vertex.
    #[must_use]
    pub fn goal(mut self, name: &str) -> Self {
        let v = self.vertex(name);
        if !self.goals.contains(&v) {
            self.goals.push(v);
        }
        self
    }

    /// Name of vertex `v`.
    #[must_use]
    pub fn name(&self, v: usize) -> &str {
        self.names.get(v).map_or("?", String::as_str)
    }

    fn vertex(&mut self, name: &str) -> usize {
        if let Some(&v) = self.index.get(name) {
            return v;
        }
        let v = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), v);
        self.edges.push(Vec::new());
        v
    }
}

impl Problem for CostedGraph {
    type State = usize;
    type Action = Edge;

    fn initial_state(&self) -> usize {
        self.start
    }

    fn actions(&self, state: &usize) -> Vec<Edge> {
        self.edges.get(*state).cloned().unwrap_or_default()
    }

    fn transition(&self, _state: &usize, action: &Edge) -> usize {
        action.to
    }

    fn is_goal(&self, state: &usize) -> bool {
        self.goals.contains(state)
    }

    fn step_cost(&self, _state: &usize, action: &Edge, _next: &usize) -> f64 {
        action.cost
    }
}

impl World for CostedGraph {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "costed_graph"
    }

    fn describe_state(&self, state: &usize) -> String {
        self.name(*state).to_string()
    }

    fn describe_action(&self, action: &Edge) -> String {
        format!("{}->{}", self.name(action.from), self.name(action.to))
    }
}
