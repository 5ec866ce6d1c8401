use crate::error::Error;
use crate::executor::ProcessRunner;
use crate::prompt::{
    DialoguerConfirmPrompter, DialoguerSelectPrompter, DialoguerStringPrompter, IdentityDefaults,
};
use crate::request::RewriteMode;
use crate::rewrite::{self, Flow, Prompters, RewriteOptions};
use crate::{git, report};

use clap::Parser;
use console::style;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Rewrite commit author and committer identities across git history.
///
/// Prompts for a rewrite mode and the replacement identity, shows a warning,
/// asks for confirmation, then runs `git filter-branch` over every branch
/// and tag. The original refs are kept under refs/original/.
#[derive(Debug, Parser)]
#[command(name = "git-history-rewrite", version)]
pub struct Cli {
    /// Run inside this repository instead of the current directory
    #[arg(short = 'C', long = "repo", value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Pre-select the rewrite mode instead of choosing from the menu
    #[arg(long, value_enum)]
    pub mode: Option<RewriteMode>,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Verifies `git` is available and `dir` is inside a work tree.
///
/// Returns the repository root.
fn verify_environment(dir: &Path) -> Result<PathBuf, Error> {
    let git_path = git::locate().ok_or(Error::GitNotFound)?;
    tracing::debug!(git = %git_path.display(), "found git");

    git::show_toplevel(dir).map_err(Error::NotARepository)
}

/// Maps a finished pipeline to its exit code, printing the outcome.
fn finish(flow: Flow) -> i32 {
    match flow {
        Flow::Cancelled => {
            println!("{}", style("Cancelled. No changes made.").dim());
            0
        }
        Flow::Declined => {
            println!("{}", style("Operation cancelled.").dim());
            0
        }
        Flow::Completed(outcome) => {
            report::print_outcome(&outcome);
            if outcome.is_success() { 0 } else { 1 }
        }
    }
}

/// Main CLI entry point for `git-history-rewrite`.
///
/// This function:
/// 1. Parses CLI flags and installs logging.
/// 2. Verifies that `git` is installed and the target directory is a git repository.
/// 3. Reads `user.name` / `user.email` from `git config` as prompt defaults.
/// 4. Runs the rewrite pipeline with dialoguer prompts and a real process runner.
/// 5. Prints the outcome.
///
/// # Errors
///
/// Returns the first [`Error`] hit. Nothing is printed for it here; the
/// binary reports it with [`report_error`].
///
/// # Exit Codes
///
/// * `0` – Successful rewrite, or the user cancelled or declined.
/// * `1` – The rewrite ran and `git filter-branch` failed.
pub fn entry() -> Result<i32, Error> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dir = cli.repo.unwrap_or_else(|| PathBuf::from("."));
    let root = verify_environment(&dir)?;
    tracing::info!(root = %root.display(), "rewriting repository");

    let defaults = IdentityDefaults {
        name: git::config_get(&root, "user.name"),
        email: git::config_get(&root, "user.email"),
    };

    let options = RewriteOptions {
        repo_dir: root,
        mode: cli.mode,
        defaults,
        show_progress: !cli.no_progress,
    };
    let mut prompters = Prompters {
        input: DialoguerStringPrompter,
        confirm: DialoguerConfirmPrompter,
        select: DialoguerSelectPrompter,
    };

    let flow = rewrite::run(&options, &mut prompters, &mut ProcessRunner)?;
    Ok(finish(flow))
}

/// Prints `err` as a single red line on stderr.
pub fn report_error(err: &Error) {
    let msg = match err {
        Error::Validation(v) => capitalize(&v.to_string()),
        other => format!("Error: {}", other),
    };
    eprintln!("{}", style(msg).red().bold());
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::RewriteOutcome;
    use crate::request::{Field, ValidationError};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repo_and_mode() {
        let cli = Cli::try_parse_from(["git-history-rewrite", "-C", "/src/app", "--mode", "by-email"])
            .unwrap();
        assert_eq!(cli.repo, Some(PathBuf::from("/src/app")));
        assert_eq!(cli.mode, Some(RewriteMode::ByEmail));
        assert!(!cli.no_progress);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["git-history-rewrite", "--mode", "everything"]).is_err());
    }

    #[test]
    fn exit_codes_follow_flow() {
        assert_eq!(finish(Flow::Cancelled), 0);
        assert_eq!(finish(Flow::Declined), 0);
        assert_eq!(finish(Flow::Completed(RewriteOutcome::Succeeded)), 0);
        assert_eq!(
            finish(Flow::Completed(RewriteOutcome::Failed {
                exit_code: Some(2),
                stderr: "x".to_string(),
                stdout: String::new(),
            })),
            1
        );
    }

    #[test]
    fn capitalize_first_letter() {
        let msg = ValidationError::MissingField(Field::NewName).to_string();
        assert_eq!(capitalize(&msg), "The new author name is required. Aborting.");
        assert_eq!(capitalize(""), "");
    }
}
