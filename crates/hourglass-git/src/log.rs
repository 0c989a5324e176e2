//! Log producer: turns a materialized repository into the raw line sequence
//! the estimation engine consumes.

use std::path::Path;
use std::process::Command;

use hourglass_core::HourglassError;

/// Produce the commit log of the repository at `repo_path` as an ordered
/// line sequence: per commit, one `<hash>|<iso date>|<subject>` header,
/// zero or more `<additions>\t<deletions>\t<filename>` numstat lines, and
/// one blank separator.
///
/// Raw git output omits the separator after the very last block (and after
/// empty commits that end the log); a trailing blank line is appended so
/// the final commit always reaches the engine's finalization step.
///
/// # Errors
///
/// Returns [`HourglassError::Io`] if git cannot be spawned, and
/// [`HourglassError::Log`] with git's stderr if the log command exits
/// non-zero.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use hourglass_git::log::commit_log;
///
/// let lines = commit_log(Path::new("/tmp/some-clone")).unwrap();
/// assert_eq!(lines.last().map(String::as_str), Some(""));
/// ```
pub fn commit_log(repo_path: &Path) -> Result<Vec<String>, HourglassError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(repo_path)
        .args([
            "log",
            "--pretty=format:%H|%ad|%s",
            "--date=iso",
            "--numstat",
        ])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(HourglassError::Log(stderr));
    }

    let mut lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
        std::fs::write(dir.join(name), content).unwrap();
        for args in [
            vec!["add", "-A"],
            vec![
                "-c",
                "user.email=t@t",
                "-c",
                "user.name=t",
                "commit",
                "-q",
                "-m",
                message,
            ],
        ] {
            assert!(Command::new("git")
                .args(&args)
                .current_dir(dir)
                .output()
                .unwrap()
                .status
                .success());
        }
    }

    #[test]
    fn log_of_a_real_repo_is_terminated() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        assert!(Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir.path())
            .output()
            .unwrap()
            .status
            .success());
        commit_file(dir.path(), "a.txt", "one\n", "initial commit");
        commit_file(dir.path(), "b.js", "let x = 1;\n", "add script");

        let lines = commit_log(dir.path()).unwrap();
        assert_eq!(lines.last().map(String::as_str), Some(""));
        let headers = lines.iter().filter(|l| l.contains('|')).count();
        assert_eq!(headers, 2);
        assert!(lines.iter().any(|l| l.ends_with("a.txt")));
    }

    #[test]
    fn log_of_a_non_repo_is_a_log_error() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let err = commit_log(dir.path()).unwrap_err();
        assert!(matches!(err, HourglassError::Log(_)));
        assert!(err.to_string().starts_with("Failed to get git log:"));
    }
}
