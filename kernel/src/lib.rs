//! Plumb Kernel: the problem model and node bookkeeping shared by every search.
//!
//! # API Surface
//!
//! - [`problem::Problem`] -- the contract a state space implements
//! - [`node::Node`] -- an immutable point in the search tree
//! - [`expander::NodeExpander`] -- produces child nodes and notifies listeners
//! - [`metrics::Metrics`] -- named counters written by a search invocation
//! - [`cancel::CancellationToken`] -- cooperative, poll-based cancellation
//!
//! # Module Dependency Direction
//!
//! `problem` ← `node` ← `expander`
//!
//! `metrics` and `cancel` depend on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cancel;
pub mod expander;
pub mod metrics;
pub mod node;
pub mod problem;
