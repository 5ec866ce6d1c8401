//! Runs `git filter-branch` with a [`FilterScript`] and classifies the result.
//!
//! The executor moves through `Idle -> Running -> {Succeeded, Failed}` exactly
//! once. The child process is waited on synchronously while a spinner runs.

use crate::error::Error;
use crate::filter::FilterScript;

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;

/// Namespace where `git filter-branch` stores the pre-rewrite refs.
pub const BACKUP_REF_NAMESPACE: &str = "refs/original/";

/// Environment variable that silences filter-branch's interactive warning and delay.
pub const SQUELCH_WARNING_ENV: &str = "FILTER_BRANCH_SQUELCH_WARNING";

const SPINNER_MESSAGE: &str = "Rewriting commit history... (this may take a while)";

/// A fully described external command: program, argument vector, extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Describes the filter-branch call for `script`:
    ///
    /// ```text
    /// git filter-branch --force --env-filter <script> --tag-name-filter cat -- --branches --tags
    /// ```
    ///
    /// `script` is a single argument; no shell parses the outer command.
    pub fn filter_branch(script: &FilterScript, current_dir: Option<&Path>) -> Self {
        let args = [
            "filter-branch",
            "--force",
            "--env-filter",
            script.as_str(),
            "--tag-name-filter",
            "cat",
            "--",
            "--branches",
            "--tags",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Invocation {
            program: String::from("git"),
            args,
            envs: vec![(SQUELCH_WARNING_ENV.to_string(), String::from("1"))],
            current_dir: current_dir.map(Path::to_path_buf),
        }
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for ProcessOutput {
    fn from(out: Output) -> Self {
        ProcessOutput {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        }
    }
}

/// Abstraction over spawning an external command and waiting for it.
///
/// Lets the rewrite pipeline be driven by a recording runner in tests.
pub trait CommandRunner {
    /// Runs `invocation` to completion.
    ///
    /// Returns `Err` only when the process could not be started; a non-zero
    /// exit is reported through [`ProcessOutput::code`].
    fn run(&mut self, invocation: &Invocation) -> Result<ProcessOutput, String>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, invocation: &Invocation) -> Result<ProcessOutput, String> {
        (**self).run(invocation)
    }
}

/// Default [`CommandRunner`] backed by [`std::process::Command`].
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<ProcessOutput, String> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd.envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        match cmd.output() {
            Ok(out) => Ok(ProcessOutput::from(out)),
            Err(e) => Err(format!("{}", e)),
        }
    }
}

/// Result of one executed rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    Succeeded,
    Failed {
        exit_code: Option<i32>,
        stderr: String,
        stdout: String,
    },
}

impl RewriteOutcome {
    /// Classifies a finished process solely by its exit status.
    pub fn from_output(output: ProcessOutput) -> Self {
        match output.code {
            Some(0) => RewriteOutcome::Succeeded,
            code => RewriteOutcome::Failed {
                exit_code: code,
                stderr: output.stderr,
                stdout: output.stdout,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RewriteOutcome::Succeeded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// Runs a single history rewrite.
pub struct RewriteExecutor<R> {
    runner: R,
    repo_dir: Option<PathBuf>,
    show_progress: bool,
    state: ExecutorState,
}

impl<R: CommandRunner> RewriteExecutor<R> {
    pub fn new(runner: R) -> Self {
        RewriteExecutor {
            runner,
            repo_dir: None,
            show_progress: true,
            state: ExecutorState::Idle,
        }
    }

    /// Runs the rewrite inside `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn state(&self) -> ExecutorState {
        self.state
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs `git filter-branch` with `script` and blocks until it exits.
    ///
    /// There is no retry and no rollback. A failed run leaves the repository
    /// as git left it; recovery goes through [`BACKUP_REF_NAMESPACE`].
    ///
    /// # Errors
    ///
    /// * [`Error::ExecutorReused`] if this executor already left `Idle`.
    /// * [`Error::Spawn`] if `git` could not be started. The executor ends in
    ///   [`ExecutorState::Failed`].
    pub fn execute(&mut self, script: &FilterScript) -> Result<RewriteOutcome, Error> {
        if self.state != ExecutorState::Idle {
            return Err(Error::ExecutorReused);
        }

        let invocation = Invocation::filter_branch(script, self.repo_dir.as_deref());
        tracing::debug!(args = ?invocation.args, dir = ?invocation.current_dir, "running git");

        self.state = ExecutorState::Running;
        let spinner = spinner(self.show_progress);
        let result = self.runner.run(&invocation);
        spinner.finish_and_clear();

        match result {
            Ok(output) => {
                tracing::info!(code = ?output.code, "git filter-branch exited");
                let outcome = RewriteOutcome::from_output(output);
                self.state = if outcome.is_success() {
                    ExecutorState::Succeeded
                } else {
                    ExecutorState::Failed
                };
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "git filter-branch could not be started");
                self.state = ExecutorState::Failed;
                Err(Error::Spawn(e))
            }
        }
    }
}

fn spinner(show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(SPINNER_MESSAGE);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
