//! Man-hour estimation from a repository's commit history.
//!
//! Folds the line stream of `git log --numstat` into a single estimated
//! total plus a human-readable trace: per-file churn is scaled by a language
//! weight, per-commit time by a message classifier and the assumed developer
//! experience, with a 15-minute floor per commit.

pub mod classifier;
pub mod engine;
pub mod report;
pub mod trace;
pub mod weights;

pub use engine::estimate_from_log;
pub use report::{CommitEstimate, EstimateReport, FileChange};
pub use trace::TraceSink;
pub use weights::WeightTable;
