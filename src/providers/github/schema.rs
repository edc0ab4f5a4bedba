//! Shapes of `gh search ... --json` output. Only the fields the report uses are declared, the
//! rest of each object is ignored.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GhCommit {
    pub commit: GhCommitDetails,
}

#[derive(Debug, Deserialize)]
pub struct GhCommitDetails {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GhPullRequest {
    pub title: String,
}
