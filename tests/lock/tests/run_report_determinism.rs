//! Run report determinism and persistence lock tests.
//!
//! Proves:
//! 1. Repeated in-process runs produce byte-identical reports and digests
//! 2. The report digest is sha256 over the domain prefix and the report bytes
//! 3. A report written to disk reads back to the same digest
//! 4. Tampering with a stored report fails closed
//! 5. The domain prefix is null-terminated and namespaced

use lock_tests::{fixture_graph, fixture_maze, independent_report_digest};
use plumb_harness::digest::DOMAIN_RUN_REPORT;
use plumb_harness::policy::{OutputMode, RunConfig};
use plumb_harness::report_dir::{
    read_report_dir, write_report_dir, ReportDirReadError, REPORT_FILENAME,
};
use plumb_harness::runner::{run_world, ReportOutcome};
use plumb_harness::worlds::linear_chain::LinearChain;

fn maze_config() -> RunConfig {
    RunConfig {
        depth_limit: 5,
        output: OutputMode::Actions,
        ..RunConfig::default()
    }
}

// ---------------------------------------------------------------------------
// 1. Repeated runs
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_are_byte_identical() {
    let maze = fixture_maze();
    let config = maze_config();
    let first = run_world(&maze, &config).unwrap();
    let first_bytes = first.to_json_bytes().unwrap();
    for _ in 0..10 {
        let again = run_world(&maze, &config).unwrap();
        assert_eq!(again.to_json_bytes().unwrap(), first_bytes);
        assert_eq!(again.digest().unwrap(), first.digest().unwrap());
    }
}

#[test]
fn different_limits_give_different_digests() {
    let chain = LinearChain::new(4);
    let solved = run_world(&chain, &RunConfig::default()).unwrap();
    let cut = run_world(
        &chain,
        &RunConfig {
            depth_limit: 2,
            ..RunConfig::default()
        },
    )
    .unwrap();
    assert_eq!(solved.outcome, ReportOutcome::Solution);
    assert_eq!(cut.outcome, ReportOutcome::Cutoff);
    assert_ne!(solved.digest().unwrap(), cut.digest().unwrap());
}

// ---------------------------------------------------------------------------
// 2. Digest construction
// ---------------------------------------------------------------------------

#[test]
fn digest_matches_independent_sha256() {
    let report = run_world(&fixture_graph(), &RunConfig::default()).unwrap();
    let bytes = report.to_json_bytes().unwrap();
    assert_eq!(
        report.digest().unwrap().as_str(),
        independent_report_digest(&bytes)
    );
}

#[test]
fn report_json_keys_are_sorted() {
    let report = run_world(&fixture_graph(), &RunConfig::default()).unwrap();
    let bytes = report.to_json_bytes().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(value["outcome"], "solution");
    assert_eq!(value["plan"], serde_json::json!(["s->a", "a->g"]));
    assert_eq!(value["metrics"]["pathCost"], 5.0);
}

// ---------------------------------------------------------------------------
// 3-4. Report directory
// ---------------------------------------------------------------------------

#[test]
fn report_dir_round_trip_preserves_digest() {
    let report = run_world(&fixture_maze(), &maze_config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let written = write_report_dir(&report, dir.path()).unwrap();

    let stored = read_report_dir(dir.path()).unwrap();
    assert_eq!(stored.digest, written);
    assert_eq!(stored.digest, report.digest().unwrap());
    assert_eq!(stored.report["world_id"], "grid_maze");
}

#[test]
fn edited_report_fails_digest_check() {
    let report = run_world(&fixture_maze(), &maze_config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();

    let path = dir.path().join(REPORT_FILENAME);
    let original = std::fs::read_to_string(&path).unwrap();
    let edited = original.replace("\"grid_maze\"", "\"grid_mazf\"");
    assert_ne!(original, edited);
    std::fs::write(&path, edited).unwrap();

    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirReadError::DigestMismatch { .. })
    ));
}

// ---------------------------------------------------------------------------
// 5. Domain prefix
// ---------------------------------------------------------------------------

#[test]
fn run_report_domain_is_namespaced_and_null_terminated() {
    assert!(DOMAIN_RUN_REPORT.starts_with(b"PLUMB::"));
    assert!(DOMAIN_RUN_REPORT.ends_with(&[0]));
    assert_eq!(
        DOMAIN_RUN_REPORT.iter().filter(|&&b| b == 0).count(),
        1,
        "domain prefix must contain exactly one null byte"
    );
}
