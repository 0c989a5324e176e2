//! The estimation engine: folds a raw `git log --numstat` line stream into
//! a man-hour total and a tabular trace.
//!
//! The stream is consumed strictly in order by a two-state parser: `Idle`
//! until a commit header opens a record, `InCommit` while numstat lines
//! accumulate into it, back to `Idle` when a blank separator finalizes the
//! commit. Lines that are neither headers, numstat lines, nor separators
//! are ignored.

use chrono::{DateTime, FixedOffset, Utc};
use hourglass_core::Experience;

use crate::classifier::message_multiplier;
use crate::report::{CommitEstimate, EstimateReport, FileChange};
use crate::trace::TraceSink;
use crate::weights::{WeightTable, DEFAULT_WEIGHT};

/// Hours per weighted line-unit: one minute per unit.
const BASELINE_HOURS_PER_UNIT: f64 = 1.0 / 60.0;

/// Minimum billable time per finalized commit, in hours.
const MINIMUM_COMMIT_HOURS: f64 = 0.25;

/// The commit block currently being accumulated.
#[derive(Debug)]
struct CommitRecord {
    hash: String,
    timestamp: DateTime<FixedOffset>,
    message: String,
    lines_added: u64,
    lines_deleted: u64,
    weighted_changes: f64,
    // Weight of the most recently processed file; the per-commit trace row
    // reports this value, matching the historical trace format.
    last_weight: f64,
    files: Vec<FileChange>,
}

impl CommitRecord {
    fn open(hash: &str, date: &str, message: &str) -> Self {
        Self {
            hash: hash.to_string(),
            timestamp: parse_commit_date(date),
            message: message.to_string(),
            lines_added: 0,
            lines_deleted: 0,
            weighted_changes: 0.0,
            last_weight: DEFAULT_WEIGHT,
            files: Vec::new(),
        }
    }
}

/// Parser state: between commit blocks, or inside one.
#[derive(Debug)]
enum ParserState {
    Idle,
    InCommit(CommitRecord),
}

/// Fold a log line stream into an [`EstimateReport`], writing the
/// human-readable table into `sink`.
///
/// Each line is classified in fixed priority order: a line containing a
/// pipe opens a new commit record (replacing any still-open one), a
/// `<digits> <digits> <filename>` line adds a file to the open record, an
/// empty line finalizes the open record, and anything else is skipped. A
/// commit block not followed by an empty line is never finalized; the log
/// producer is responsible for terminating the stream.
///
/// # Examples
///
/// ```
/// use hourglass_core::Experience;
/// use hourglass_estimate::engine::estimate_from_log;
/// use hourglass_estimate::trace::TraceSink;
/// use hourglass_estimate::weights::WeightTable;
///
/// let log = [
///     "abc1234def|2024-03-01 10:00:00 +0000|initial commit",
///     "30\t10\tmain.js",
///     "",
/// ];
/// let mut sink = TraceSink::new();
/// let report = estimate_from_log(log, &WeightTable::default(), Experience::Mid, &mut sink);
/// assert_eq!(report.total_commits, 1);
/// assert!((report.total_man_hours - 40.0 / 60.0).abs() < 1e-9);
/// ```
pub fn estimate_from_log<I, S>(
    lines: I,
    weights: &WeightTable,
    experience: Experience,
    sink: &mut TraceSink,
) -> EstimateReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = EstimateReport::new(experience);
    let mut state = ParserState::Idle;

    emit_table_header(sink);

    for line in lines {
        let line = line.as_ref();

        if line.contains('|') {
            // Commit header. An already-open record is replaced, not
            // finalized; only a separator line finalizes.
            let (hash, date, message) = split_header(line);
            state = ParserState::InCommit(CommitRecord::open(hash, date, message));
            report.total_commits += 1;
        } else if let Some((additions, deletions, filename)) = parse_numstat(line) {
            let ParserState::InCommit(record) = &mut state else {
                continue;
            };
            let weight = weights.weight_for(filename);
            let file_changes = (additions + deletions) as f64 * weight;

            record.lines_added += additions;
            record.lines_deleted += deletions;
            record.weighted_changes += file_changes;
            record.last_weight = weight;
            record.files.push(FileChange {
                filename: filename.to_string(),
                additions,
                deletions,
                weight,
                weighted_changes: file_changes,
            });

            report.total_lines_added += additions;
            report.total_lines_deleted += deletions;
            report.total_weighted_changes += file_changes;
        } else if line.is_empty() {
            if let ParserState::InCommit(record) = std::mem::replace(&mut state, ParserState::Idle)
            {
                finalize_commit(record, experience, &mut report, sink);
            }
        }
        // Anything else (binary markers, stray text) is skipped.
    }

    emit_summary(&report, sink);
    report
}

/// Convert a finished commit block into hours and append its trace rows.
fn finalize_commit(
    record: CommitRecord,
    experience: Experience,
    report: &mut EstimateReport,
    sink: &mut TraceSink,
) {
    let multiplier = message_multiplier(&record.message);
    let mut hours = record.weighted_changes * BASELINE_HOURS_PER_UNIT;
    hours *= multiplier;
    hours *= experience.multiplier();
    if hours < MINIMUM_COMMIT_HOURS {
        hours = MINIMUM_COMMIT_HOURS;
    }
    report.total_man_hours += hours;

    let short_hash: String = record.hash.chars().take(7).collect();
    let timestamp = record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
    sink.line(format!(
        "{:<40} | {:<20} | {:<12} | {:<13} | {:<12} | {:<16} | {:<16} | {:<16} | {:<16}",
        short_hash,
        timestamp,
        record.lines_added,
        record.lines_deleted,
        format!("{:.2}", record.last_weight),
        format!("{:.2}", record.weighted_changes),
        format!("{multiplier:.2}"),
        format!("{hours:.2}"),
        format!("{:.2}", report.total_man_hours),
    ));
    for file in &record.files {
        sink.line(format!(
            "  -> {:<58} | {:<12} | {:<13} | {:<12} | {:<16}",
            file.filename,
            file.additions,
            file.deletions,
            format!("{:.2}", file.weight),
            format!("{:.2}", file.weighted_changes),
        ));
    }

    report.commits.push(CommitEstimate {
        hash: record.hash,
        timestamp,
        message: record.message,
        lines_added: record.lines_added,
        lines_deleted: record.lines_deleted,
        weighted_changes: record.weighted_changes,
        multiplier,
        hours,
        cumulative_hours: report.total_man_hours,
        files: record.files,
    });
}

fn emit_table_header(sink: &mut TraceSink) {
    sink.line(format!(
        "{:<40} | {:<20} | {:<12} | {:<12} | {:<12} | {:<16} | {:<16} | {:<16} | {:<16}",
        "Commit Hash",
        "Timestamp",
        "Lines Added",
        "Lines Deleted",
        "File Weight",
        "Weighted Changes",
        "Message Analysis",
        "Adjusted Time (H)",
        "Cumulative Total (H)",
    ));
    sink.line("-".repeat(160));
}

fn emit_summary(report: &EstimateReport, sink: &mut TraceSink) {
    sink.line("");
    sink.line("Summary Statistics:");
    sink.line("-".repeat(40));
    sink.line(format!("Total Commits: {}", report.total_commits));
    sink.line(format!("Total Lines Added: {}", report.total_lines_added));
    sink.line(format!("Total Lines Deleted: {}", report.total_lines_deleted));
    sink.line(format!(
        "Total Weighted Changes: {:.2}",
        report.total_weighted_changes
    ));
    sink.line(format!(
        "Total Estimated Man-Hours: {:.2}",
        report.total_man_hours
    ));
}

/// Split a header line on its first two pipes; the message keeps any
/// further pipes. Missing fields come back empty.
fn split_header(line: &str) -> (&str, &str, &str) {
    let mut parts = line.splitn(3, '|');
    let hash = parts.next().unwrap_or("");
    let date = parts.next().unwrap_or("");
    let message = parts.next().unwrap_or("");
    (hash, date, message)
}

/// Parse `<digits><ws><digits><ws><filename>`, anchored at the start of the
/// line. The filename may contain spaces. Returns `None` for anything else,
/// including binary-file markers (`-	-	path`).
fn parse_numstat(line: &str) -> Option<(u64, u64, &str)> {
    let (additions, rest) = take_number(line)?;
    let rest = take_whitespace(rest)?;
    let (deletions, rest) = take_number(rest)?;
    let filename = take_whitespace(rest)?;
    if filename.is_empty() {
        return None;
    }
    Some((additions, deletions, filename))
}

/// Split a leading run of ASCII digits off `input` and parse it.
fn take_number(input: &str) -> Option<(u64, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    let value = input[..end].parse().ok()?;
    Some((value, &input[end..]))
}

/// Strip a non-empty run of leading whitespace.
fn take_whitespace(input: &str) -> Option<&str> {
    let rest = input.trim_start();
    if rest.len() == input.len() {
        return None;
    }
    Some(rest)
}

/// Parse the `--date=iso` timestamp of a header line. Malformed dates
/// resolve to the Unix epoch rather than failing the run.
fn parse_commit_date(date: &str) -> DateTime<FixedOffset> {
    let date = date.trim();
    DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_rfc3339(date))
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str], experience: Experience) -> (EstimateReport, String) {
        let mut sink = TraceSink::new();
        let report = estimate_from_log(lines, &WeightTable::default(), experience, &mut sink);
        (report, sink.contents().to_string())
    }

    #[test]
    fn single_commit_mid_experience() {
        let (report, _) = run(
            &[
                "deadbeefcafe|2024-03-01 10:00:00 +0000|initial commit",
                "30\t10\tmain.js",
                "",
            ],
            Experience::Mid,
        );
        assert_eq!(report.total_commits, 1);
        assert_eq!(report.total_lines_added, 30);
        assert_eq!(report.total_lines_deleted, 10);
        assert!((report.total_weighted_changes - 40.0).abs() < 1e-9);
        assert!((report.total_man_hours - 40.0 / 60.0).abs() < 1e-9);
        assert_eq!(report.rounded_total(), 0.667);
    }

    #[test]
    fn tiny_fix_is_floored_to_minimum() {
        let (report, _) = run(
            &[
                "deadbeefcafe|2024-03-01 10:00:00 +0000|fix typo",
                "2\t0\tREADME.md",
                "",
            ],
            Experience::Mid,
        );
        // 0.6 weighted changes × 1/60 × 0.8 = 0.008h, floored to 0.25h.
        assert!((report.total_weighted_changes - 0.6).abs() < 1e-9);
        assert_eq!(report.commits[0].multiplier, 0.8);
        assert_eq!(report.commits[0].hours, 0.25);
        assert_eq!(report.total_man_hours, 0.25);
    }

    #[test]
    fn experience_scales_baseline() {
        let lines = [
            "deadbeefcafe|2024-03-01 10:00:00 +0000|initial commit",
            "30\t10\tmain.js",
            "",
        ];
        let (junior, _) = run(&lines, Experience::Junior);
        assert!((junior.total_man_hours - 1.0).abs() < 1e-9);
        let (senior, _) = run(&lines, Experience::Senior);
        assert!((senior.total_man_hours - 40.0 / 60.0 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn refactor_commit_scales_up() {
        // 120 weighted changes → 2h baseline × 1.3
        let (report, _) = run(
            &[
                "deadbeefcafe|2024-03-01 10:00:00 +0000|refactor auth module",
                "100\t20\thandlers.js",
                "",
            ],
            Experience::Mid,
        );
        assert!((report.total_weighted_changes - 120.0).abs() < 1e-9);
        assert!((report.total_man_hours - 2.6).abs() < 1e-9);
    }

    #[test]
    fn zero_file_commit_still_costs_minimum() {
        let (report, _) = run(
            &["deadbeefcafe|2024-03-01 10:00:00 +0000|bump version", ""],
            Experience::Mid,
        );
        assert_eq!(report.total_commits, 1);
        assert_eq!(report.total_man_hours, 0.25);
        assert!(report.commits[0].files.is_empty());
    }

    #[test]
    fn unterminated_final_commit_is_not_finalized() {
        let (report, _) = run(
            &[
                "aaaa|2024-03-01 10:00:00 +0000|first",
                "10\t0\ta.js",
                "",
                "bbbb|2024-03-02 10:00:00 +0000|second",
                "10\t0\tb.js",
            ],
            Experience::Mid,
        );
        // The second block never sees a separator: it is counted but
        // contributes no hours. The log producer appends the separator in
        // real runs.
        assert_eq!(report.total_commits, 2);
        assert_eq!(report.commits.len(), 1);
        assert_eq!(report.total_lines_added, 20);
        assert_eq!(report.total_man_hours, 0.25);
    }

    #[test]
    fn header_replaces_open_record() {
        // Raw git emits empty commits with no separator before the next
        // header; the open record is dropped, not finalized.
        let (report, _) = run(
            &[
                "aaaa|2024-03-01 10:00:00 +0000|empty commit",
                "bbbb|2024-02-01 10:00:00 +0000|real commit",
                "6\t6\tlib.rs",
                "",
            ],
            Experience::Mid,
        );
        assert_eq!(report.total_commits, 2);
        assert_eq!(report.commits.len(), 1);
        assert_eq!(report.commits[0].hash, "bbbb");
    }

    #[test]
    fn message_may_contain_pipes() {
        let (report, _) = run(
            &[
                "aaaa|2024-03-01 10:00:00 +0000|add a | b | c table",
                "60\t0\tapp.js",
                "",
            ],
            Experience::Mid,
        );
        assert_eq!(report.commits[0].message, "add a | b | c table");
        assert_eq!(report.commits[0].multiplier, 1.0);
    }

    #[test]
    fn filename_with_spaces_is_kept_whole() {
        let (report, _) = run(
            &[
                "aaaa|2024-03-01 10:00:00 +0000|docs",
                "5\t1\tdocs/user guide.md",
                "",
            ],
            Experience::Mid,
        );
        assert_eq!(report.commits[0].files[0].filename, "docs/user guide.md");
        assert_eq!(report.commits[0].files[0].weight, 0.3);
    }

    #[test]
    fn binary_markers_and_noise_are_ignored() {
        let (report, _) = run(
            &[
                "aaaa|2024-03-01 10:00:00 +0000|add logo",
                "-\t-\tassets/logo.png",
                "warning: something unrelated",
                "12\t0\tindex.html",
                "",
            ],
            Experience::Mid,
        );
        assert_eq!(report.commits[0].files.len(), 1);
        assert_eq!(report.commits[0].files[0].filename, "index.html");
        assert!((report.total_weighted_changes - 6.0).abs() < 1e-9);
    }

    #[test]
    fn numstat_outside_a_commit_is_ignored() {
        let (report, _) = run(&["3\t1\tstray.js", ""], Experience::Mid);
        assert_eq!(report.total_commits, 0);
        assert_eq!(report.total_lines_added, 0);
        assert!(report.commits.is_empty());
    }

    #[test]
    fn totals_are_the_fold_of_per_commit_hours() {
        let (report, _) = run(
            &[
                "aaaa|2024-03-01 10:00:00 +0000|feature work",
                "120\t0\ta.js",
                "",
                "bbbb|2024-03-02 10:00:00 +0000|fix the thing",
                "30\t30\tb.js",
                "",
                "cccc|2024-03-03 10:00:00 +0000|tweak readme",
                "1\t0\tREADME.md",
                "",
            ],
            Experience::Mid,
        );
        let folded: f64 = report.commits.iter().map(|c| c.hours).sum();
        assert!((report.total_man_hours - folded).abs() < 1e-9);
        assert_eq!(report.commits.len(), 3);
        // 2.0 + 0.8 + 0.25
        assert!((report.total_man_hours - 3.05).abs() < 1e-9);
    }

    #[test]
    fn trace_reports_last_file_weight() {
        let (_, trace) = run(
            &[
                "abcdef0123456789|2024-03-01 10:00:00 +0000|mixed commit",
                "10\t0\tmain.rs",
                "10\t0\tnotes.txt",
                "",
            ],
            Experience::Mid,
        );
        let row = trace
            .lines()
            .find(|l| l.starts_with("abcdef0"))
            .expect("commit row");
        // Weight column shows the last file's 0.20, not the rust file's 1.50.
        assert!(row.contains("0.20"));
        assert!(trace.contains("  -> main.rs"));
        assert!(trace.contains("  -> notes.txt"));
    }

    #[test]
    fn trace_has_header_and_summary() {
        let (_, trace) = run(
            &["aaaa|2024-03-01 10:00:00 +0000|work", "6\t0\ta.js", ""],
            Experience::Mid,
        );
        assert!(trace.starts_with("Commit Hash"));
        assert!(trace.contains(&"-".repeat(160)));
        assert!(trace.contains("Summary Statistics:"));
        assert!(trace.contains("Total Commits: 1"));
        assert!(trace.contains("Total Lines Added: 6"));
        assert!(trace.contains("Total Estimated Man-Hours: 0.25"));
    }

    #[test]
    fn malformed_date_falls_back_to_epoch() {
        let (report, trace) = run(
            &["aaaa|not a date|work", "6\t0\ta.js", ""],
            Experience::Mid,
        );
        assert_eq!(report.commits[0].timestamp, "1970-01-01 00:00:00");
        assert!(trace.contains("1970-01-01 00:00:00"));
    }

    #[test]
    fn iso_date_keeps_its_offset() {
        let (report, _) = run(
            &["aaaa|2024-06-01 09:30:00 +0200|work", "6\t0\ta.js", ""],
            Experience::Mid,
        );
        assert_eq!(report.commits[0].timestamp, "2024-06-01 09:30:00");
    }

    #[test]
    fn empty_stream_produces_empty_report() {
        let (report, trace) = run(&[], Experience::Mid);
        assert_eq!(report.total_commits, 0);
        assert_eq!(report.total_man_hours, 0.0);
        assert!(trace.contains("Total Commits: 0"));
    }
}
