//! The rewrite command as one sequential pipeline:
//! mode → fields → validation → confirmation gate → filter script → executor.
//!
//! Each prompt is a suspension point. Cancelling any of them ends the
//! pipeline with [`Flow::Cancelled`] and nothing is spawned.

use crate::error::Error;
use crate::executor::{CommandRunner, RewriteExecutor, RewriteOutcome};
use crate::filter::FilterScript;
use crate::gate::{self, GateDecision};
use crate::prompt::{self, ConfirmPrompter, IdentityDefaults, SelectPrompter, StringPrompter};
use crate::request::RewriteMode;

use std::path::PathBuf;

/// Settings for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Directory the rewrite runs in.
    pub repo_dir: PathBuf,
    /// Pre-selected mode. `None` shows the mode menu.
    pub mode: Option<RewriteMode>,
    /// Defaults offered for the new name and email prompts.
    pub defaults: IdentityDefaults,
    pub show_progress: bool,
}

/// The prompters the pipeline reads from.
pub struct Prompters<S, C, M> {
    pub input: S,
    pub confirm: C,
    pub select: M,
}

/// How a rewrite invocation ended, when it did not end in an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// A prompt was dismissed before the gate.
    Cancelled,
    /// The user declined at the confirmation gate.
    Declined,
    /// `git filter-branch` ran and exited.
    Completed(RewriteOutcome),
}

/// Runs the rewrite pipeline.
///
/// Validation happens before the gate and the gate before any process is
/// spawned, so a missing field or a "no" never reaches `runner`.
///
/// # Errors
///
/// * [`Error::Validation`] for a missing field or an empty hash list.
/// * [`Error::Prompt`] if input could not be read.
/// * [`Error::Spawn`] if `git` could not be started.
pub fn run<S, C, M, R>(
    options: &RewriteOptions,
    prompters: &mut Prompters<S, C, M>,
    runner: &mut R,
) -> Result<Flow, Error>
where
    S: StringPrompter,
    C: ConfirmPrompter,
    M: SelectPrompter,
    R: CommandRunner,
{
    let mode = match options.mode {
        Some(mode) => mode,
        None => match prompt::choose_mode(&mut prompters.select)? {
            Some(mode) => mode,
            None => return Ok(Flow::Cancelled),
        },
    };
    tracing::debug!(?mode, "rewrite mode selected");

    let Some(request) = prompt::collect_request(&mut prompters.input, mode, &options.defaults)?
    else {
        return Ok(Flow::Cancelled);
    };

    if gate::confirm(&mut prompters.confirm, &request)? == GateDecision::Declined {
        return Ok(Flow::Declined);
    }

    let script = FilterScript::build(&request);
    tracing::debug!(script = %script, "filter script built");

    let mut executor = RewriteExecutor::new(runner)
        .in_dir(options.repo_dir.clone())
        .with_progress(options.show_progress);
    let outcome = executor.execute(&script)?;
    Ok(Flow::Completed(outcome))
}
