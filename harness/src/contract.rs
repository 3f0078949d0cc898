//! World contract: what a problem must provide to be run by the harness.
//!
//! A world is a [`Problem`] plus a stable identifier and human-readable
//! labels used in run reports. Worlds may NOT run searches, hash reports,
//! or enforce configuration; those are runner concerns.

use plumb_kernel::problem::Problem;

/// A problem that can be run and reported on by the harness runner.
pub trait World: Problem {
    /// Unique world identifier (e.g., `"linear_chain"`).
    fn world_id(&self) -> &str;

    /// Stable label for a state in reports.
    fn describe_state(&self, state: &Self::State) -> String {
        format!("{state:?}")
    }

    /// Stable label for an action in reports.
    fn describe_action(&self, action: &Self::Action) -> String {
        format!("{action:?}")
    }
}
