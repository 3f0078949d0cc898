//! Plumb Search: bounded-depth state-space search.
//!
//! This crate provides the search layer. It depends only on `plumb_kernel`;
//! it does NOT depend on `plumb_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! plumb_kernel  ←  plumb_search  ←  plumb_harness
//! (problem, nodes)   (depth-limited)   (worlds, runner, reports)
//! ```
//!
//! # Key types
//!
//! - [`DepthLimitedSearch`](depth_limited::DepthLimitedSearch): the bounded-depth primitive
//! - [`SearchOutcome`](outcome::SearchOutcome): solution / cutoff / failure
//! - [`SearchPolicy`](policy::SearchPolicy): depth limit configuration
//! - [`SearchForActions`](contract::SearchForActions) and
//!   [`SearchForStates`](contract::SearchForStates): caller-facing search traits

#![forbid(unsafe_code)]

pub mod contract;
pub mod depth_limited;
pub mod error;
pub mod outcome;
pub mod policy;
