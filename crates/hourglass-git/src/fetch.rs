//! Repository fetcher: mirrors a repository's history into a temporary
//! directory for log extraction.

use std::path::Path;
use std::process::Command;

use hourglass_core::HourglassError;
use tempfile::TempDir;

/// A bare clone in a temporary directory.
///
/// The directory is removed when the value is dropped, on every exit path.
#[derive(Debug)]
pub struct ClonedRepo {
    dir: TempDir,
}

impl ClonedRepo {
    /// Path of the bare clone on disk.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Clone `repo` (URL or local path) bare into a fresh temporary directory.
///
/// # Errors
///
/// Returns [`HourglassError::Io`] if the temporary directory cannot be
/// created or git cannot be spawned, and [`HourglassError::Fetch`] with
/// git's combined output if the clone exits non-zero.
///
/// # Examples
///
/// ```no_run
/// use hourglass_git::fetch::clone_repository;
///
/// let clone = clone_repository("https://github.com/serde-rs/serde").unwrap();
/// assert!(clone.path().exists());
/// ```
pub fn clone_repository(repo: &str) -> Result<ClonedRepo, HourglassError> {
    let dir = tempfile::Builder::new().prefix("hourglass-repo-").tempdir()?;

    let output = Command::new("git")
        .arg("clone")
        .arg("--bare")
        .arg(repo)
        .arg(dir.path())
        .output()?;

    if !output.status.success() {
        let mut diagnostics = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            if !diagnostics.is_empty() {
                diagnostics.push('\n');
            }
            diagnostics.push_str(stderr.trim());
        }
        return Err(HourglassError::Fetch(diagnostics));
    }

    Ok(ClonedRepo { dir })
}
