use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result, WrapErr};

use hourglass_core::{Experience, HourglassConfig, OutputFormat};
use hourglass_estimate::{estimate_from_log, EstimateReport, TraceSink, WeightTable};
use hourglass_git::{clone_repository, commit_log};

#[derive(Parser)]
#[command(
    name = "hourglass",
    version,
    about = "Estimate the human effort embodied in a repository's history",
    long_about = "hourglass converts a repository's commit history into a rough man-hour estimate.\n\n\
                   It clones the repository, walks `git log --numstat`, weights each file's line\n\
                   churn by language, classifies commit messages, scales for developer experience,\n\
                   and floors every commit at 15 minutes.\n\n\
                   Examples:\n  \
                     hourglass estimate https://github.com/owner/repo   Estimate a remote repository\n  \
                     hourglass estimate . --experience senior           Estimate the current checkout\n  \
                     hourglass estimate ../service --format json        Machine-readable report\n  \
                     hourglass init                                     Create a .hourglass.toml config"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .hourglass.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        long_help = "Output format for command results.\n\n\
                       Formats:\n  \
                         text  The human-readable estimation trace (default)\n  \
                         json  Machine-readable report with camelCase keys"
    )]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// When to use colors
    #[arg(long, global = true, default_value = "auto")]
    color: ColorChoice,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate the man-hours behind a repository's commit history
    #[command(long_about = "Estimate the man-hours behind a repository's commit history.\n\n\
        Clones the repository bare into a temporary directory (removed afterwards),\n\
        folds its numstat log into an estimate, prints the trace, and writes it to\n\
        <log-dir>/<repo>.log.\n\n\
        Examples:\n  hourglass estimate https://github.com/owner/repo\n  \
        hourglass estimate . --experience junior\n  \
        hourglass estimate ../service --format json")]
    Estimate {
        /// Repository URL or local path
        repo: String,

        /// Developer experience level: junior, mid, or senior
        #[arg(long)]
        experience: Option<Experience>,

        /// Directory for the trace log file (default: ./logs)
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Create a default .hourglass.toml configuration file
    #[command(long_about = "Create a default .hourglass.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .hourglass.toml already exists.")]
    Init,
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Auto-detect based on terminal
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

const DEFAULT_CONFIG: &str = r#"# hourglass configuration

[estimate]
# Default developer experience level: junior, mid, or senior
# experience = "mid"
# Directory where estimation trace logs are written
# log_dir = "./logs"

# Override or extend the built-in language weights (extension = weight)
[weights]
# rs = 1.5
# proto = 1.1
"#;

fn print_welcome(use_color: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if use_color {
        println!("\x1b[1m\x1b[33m⌛\x1b[0m \x1b[1mhourglass\x1b[0m v{version} — man-hour estimates from commit history\n");

        println!("Quick start:");
        println!("  \x1b[36mhourglass init\x1b[0m                            Create a .hourglass.toml config file");
        println!("  \x1b[36mhourglass estimate <repo>\x1b[0m                 Estimate a repository");
        println!("  \x1b[36mhourglass estimate . --format json\x1b[0m        Machine-readable report\n");

        println!("All commands:");
        println!("  \x1b[32mestimate\x1b[0m  Clone a repository and estimate the effort in its history");
        println!("  \x1b[32minit\x1b[0m      Create default configuration\n");
    } else {
        println!("hourglass v{version} — man-hour estimates from commit history\n");

        println!("Quick start:");
        println!("  hourglass init                            Create a .hourglass.toml config file");
        println!("  hourglass estimate <repo>                 Estimate a repository");
        println!("  hourglass estimate . --format json        Machine-readable report\n");

        println!("All commands:");
        println!("  estimate  Clone a repository and estimate the effort in its history");
        println!("  init      Create default configuration\n");
    }

    println!("Run 'hourglass <command> --help' for details.");
}

/// Clone, read the log, and fold it into a report. The trace accumulates in
/// `sink`; a fetch or log failure aborts with no partial result.
fn run_estimate(
    repo: &str,
    experience: Experience,
    weights: &WeightTable,
    sink: &mut TraceSink,
) -> hourglass_core::Result<EstimateReport> {
    let clone = clone_repository(repo)?;
    let lines = commit_log(clone.path())?;
    Ok(estimate_from_log(&lines, weights, experience, sink))
}

/// Log file name for a repository location: the last path segment without
/// a `.git` suffix. Handles both slash styles in local paths.
fn repo_log_name(repo: &str) -> &str {
    let trimmed = repo.trim_end_matches(['/', '\\']);
    let base = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    let base = base.strip_suffix(".git").unwrap_or(base);
    if base.is_empty() {
        "repository"
    } else {
        base
    }
}

/// Write the trace to `<log_dir>/<repo name>.log`, replacing any previous
/// run's file. Returns the path written.
fn write_trace_log(log_dir: &Path, repo: &str, sink: &TraceSink) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    let path = log_dir.join(format!("{}.log", repo_log_name(repo)));
    std::fs::write(&path, sink.contents())?;
    Ok(path)
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HourglassConfig::from_file(path).into_diagnostic()?,
        None => {
            let default_path = Path::new(".hourglass.toml");
            if default_path.exists() {
                HourglassConfig::from_file(default_path).into_diagnostic()?
            } else {
                HourglassConfig::default()
            }
        }
    };

    let use_color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    };

    match cli.command {
        None => {
            print_welcome(use_color);
        }
        Some(Command::Estimate {
            ref repo,
            experience,
            ref log_dir,
        }) => {
            let experience = experience.unwrap_or(config.estimate.experience);
            let weights = WeightTable::with_overrides(&config.weights);
            let log_dir = log_dir.as_deref().unwrap_or(&config.estimate.log_dir);

            if cli.verbose {
                eprintln!("repository: {repo}");
                eprintln!("experience: {experience}");
                eprintln!("format: {}", cli.format);
            }

            let spinner = indicatif::ProgressBar::new_spinner();
            spinner.set_message(format!("Estimating {repo}"));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let mut sink = TraceSink::new();
            let outcome = run_estimate(repo, experience, &weights, &mut sink);
            spinner.finish_and_clear();

            match outcome {
                Ok(report) => {
                    sink.line(format!("Estimated man hours: {}", report.rounded_total()));
                    let log_path = write_trace_log(log_dir, repo, &sink)
                        .into_diagnostic()
                        .wrap_err(format!("writing trace log to {}", log_dir.display()))?;
                    if cli.verbose {
                        eprintln!("trace log: {}", log_path.display());
                    }
                    match cli.format {
                        OutputFormat::Json => {
                            println!(
                                "{}",
                                serde_json::to_string_pretty(&report).into_diagnostic()?
                            );
                        }
                        OutputFormat::Text => {
                            print!("{}", sink.contents());
                        }
                    }
                }
                Err(err) => {
                    // The trace is surfaced even on failure, with the error
                    // in place of a result.
                    sink.line(format!("Error: {err}"));
                    if let Err(io_err) = write_trace_log(log_dir, repo, &sink) {
                        eprintln!("warning: could not write trace log: {io_err}");
                    }
                    print!("{}", sink.contents());
                    std::process::exit(1);
                }
            }
        }
        Some(Command::Init) => {
            let path = Path::new(".hourglass.toml");
            if path.exists() {
                miette::bail!(".hourglass.toml already exists");
            }
            std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
            println!("Created .hourglass.toml with default configuration");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_log_name_strips_url_parts() {
        assert_eq!(
            repo_log_name("https://github.com/owner/estimate-repo-hours"),
            "estimate-repo-hours"
        );
        assert_eq!(repo_log_name("git@host:x/y.git/"), "y");
        assert_eq!(repo_log_name("/home/dev/project"), "project");
        assert_eq!(repo_log_name("/"), "repository");
    }

    #[test]
    fn repo_log_name_handles_windows_paths() {
        assert_eq!(repo_log_name("C:\\work\\repo"), "repo");
        assert_eq!(repo_log_name("C:\\work\\repo\\"), "repo");
    }

    #[test]
    fn default_config_is_valid_toml() {
        let config = HourglassConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.estimate.experience, Experience::Mid);
    }
}
