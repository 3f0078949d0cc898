//! Plumb Harness: world-level orchestration for the search core.
//!
//! The harness runs a world through [`plumb_search`]'s depth-limited search
//! and packages the result as a deterministic, digest-bound run report.
//!
//! The harness does NOT implement search logic; it delegates to the search
//! crate. Worlds provide domain data only; the harness owns orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod digest;
pub mod policy;
pub mod report_dir;
pub mod runner;
pub mod worlds;
