//! Serializable results of an estimation run.

use hourglass_core::Experience;
use serde::{Deserialize, Serialize};

/// One file touched by a commit, with its weighted contribution.
///
/// # Examples
///
/// ```
/// use hourglass_estimate::report::FileChange;
///
/// let change = FileChange {
///     filename: "src/main.rs".into(),
///     additions: 30,
///     deletions: 10,
///     weight: 1.5,
///     weighted_changes: 60.0,
/// };
/// assert_eq!(change.weighted_changes, (30 + 10) as f64 * 1.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    /// Path as reported by the numstat line, may contain spaces.
    pub filename: String,
    /// Lines added in this commit.
    pub additions: u64,
    /// Lines deleted in this commit.
    pub deletions: u64,
    /// Language weight applied to this file.
    pub weight: f64,
    /// `(additions + deletions) × weight`.
    pub weighted_changes: f64,
}

/// A finalized commit with its computed time contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitEstimate {
    /// Full commit hash.
    pub hash: String,
    /// Commit timestamp formatted as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Commit subject line.
    pub message: String,
    /// Lines added across all files in the commit.
    pub lines_added: u64,
    /// Lines deleted across all files in the commit.
    pub lines_deleted: u64,
    /// Sum of the files' weighted changes.
    pub weighted_changes: f64,
    /// Classifier multiplier applied to the baseline time.
    pub multiplier: f64,
    /// Floored, adjusted hours contributed by this commit.
    pub hours: f64,
    /// Running total after this commit.
    pub cumulative_hours: f64,
    /// Per-file detail, in numstat order.
    pub files: Vec<FileChange>,
}

/// Totals and per-commit detail for one estimation run.
///
/// # Examples
///
/// ```
/// use hourglass_core::Experience;
/// use hourglass_estimate::report::EstimateReport;
///
/// let report = EstimateReport::new(Experience::Mid);
/// assert_eq!(report.total_commits, 0);
/// assert_eq!(report.rounded_total(), 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    /// Experience level the run was scaled for.
    pub experience: Experience,
    /// Number of commit headers seen, finalized or not.
    pub total_commits: u64,
    /// Lines added across all numstat lines.
    pub total_lines_added: u64,
    /// Lines deleted across all numstat lines.
    pub total_lines_deleted: u64,
    /// Weighted changes across all numstat lines.
    pub total_weighted_changes: f64,
    /// Sum of every finalized commit's floored, adjusted hours.
    pub total_man_hours: f64,
    /// Finalized commits in log order.
    pub commits: Vec<CommitEstimate>,
}

impl EstimateReport {
    /// An empty report for `experience`.
    pub fn new(experience: Experience) -> Self {
        Self {
            experience,
            total_commits: 0,
            total_lines_added: 0,
            total_lines_deleted: 0,
            total_weighted_changes: 0.0,
            total_man_hours: 0.0,
            commits: Vec::new(),
        }
    }

    /// Total man-hours rounded to three decimal places, the value reported
    /// to the caller.
    pub fn rounded_total(&self) -> f64 {
        (self.total_man_hours * 1000.0).round() / 1000.0
    }
}
