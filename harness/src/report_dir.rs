//! Run report persistence: write/read/verify a [`RunReport`] on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   run_report.json    compact JSON, sorted keys
//!   run_digest.txt     ASCII digest string (e.g. "sha256:...")
//! ```
//!
//! The directory path is never part of the digest.
//!
//! # Fail-closed semantics
//!
//! - Missing report or digest file → error
//! - Malformed digest string → error
//! - Recomputed digest differs from the stored one → error
//! - Report is not a JSON object with the expected `schema_version` → error

use std::path::Path;

use crate::digest::{content_hash, ContentHash, DOMAIN_RUN_REPORT};
use crate::runner::{RunError, RunReport, RUN_REPORT_SCHEMA};

pub const REPORT_FILENAME: &str = "run_report.json";
pub const DIGEST_FILENAME: &str = "run_digest.txt";

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    /// I/O error during write.
    Io { detail: String },
    /// The report could not be serialized.
    Run(RunError),
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Run(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error reading a report directory.
#[derive(Debug)]
pub enum ReportDirReadError {
    /// A required file is missing or unreadable.
    MissingFile { filename: String },
    /// `run_digest.txt` is not a valid `algorithm:hex` string.
    InvalidDigest { found: String },
    /// `run_report.json` is not valid JSON.
    ReportParseError { detail: String },
    /// `schema_version` is not recognized.
    SchemaMismatch { found: String },
    /// Stored digest does not match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::InvalidDigest { found } => write!(f, "invalid digest string: {found:?}"),
            Self::ReportParseError { detail } => write!(f, "report parse error: {detail}"),
            Self::SchemaMismatch { found } => write!(f, "report schema mismatch: {found}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
        }
    }
}

impl std::error::Error for ReportDirReadError {}

/// A report read back from disk with its verified digest.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    pub report: serde_json::Value,
    pub digest: ContentHash,
}

/// Write `report` to `dir`, creating the directory if needed.
///
/// Returns the digest that was written.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on serialization or I/O failure.
pub fn write_report_dir(
    report: &RunReport,
    dir: &Path,
) -> Result<ContentHash, ReportDirWriteError> {
    let bytes = report.to_json_bytes().map_err(ReportDirWriteError::Run)?;
    let digest = content_hash(DOMAIN_RUN_REPORT, &bytes);

    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;
    write_atomic(&dir.join(REPORT_FILENAME), &bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;

    tracing::debug!(dir = %dir.display(), digest = digest.as_str(), "wrote run report");
    Ok(digest)
}

/// Read and verify a report directory written by [`write_report_dir`].
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on any validation failure.
pub fn read_report_dir(dir: &Path) -> Result<StoredReport, ReportDirReadError> {
    let bytes = read_required(dir, REPORT_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    let stored_str = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    let stored = ContentHash::parse(&stored_str)
        .ok_or(ReportDirReadError::InvalidDigest { found: stored_str })?;

    let recomputed = content_hash(DOMAIN_RUN_REPORT, &bytes);
    if recomputed != stored {
        return Err(ReportDirReadError::DigestMismatch {
            stored: stored.as_str().to_string(),
            recomputed: recomputed.as_str().to_string(),
        });
    }

    let report: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ReportDirReadError::ReportParseError {
            detail: e.to_string(),
        })?;
    let schema = report["schema_version"].as_str().unwrap_or("");
    if schema != RUN_REPORT_SCHEMA {
        return Err(ReportDirReadError::SchemaMismatch {
            found: schema.to_string(),
        });
    }

    Ok(StoredReport {
        report,
        digest: stored,
    })
}

/// Write to a temp file in the same directory, then rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} -> {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirReadError::MissingFile {
        filename: filename.to_string(),
    })
}
