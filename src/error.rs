use crate::request::ValidationError;

/// Errors that terminate a rewrite invocation.
///
/// User cancellation and a failed `git filter-branch` run are not errors:
/// the first is [`crate::rewrite::Flow::Cancelled`], the second is
/// [`crate::executor::RewriteOutcome::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("`git` is not installed or not in your PATH")]
    GitNotFound,

    #[error("not inside a git repository ({0})")]
    NotARepository(String),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("failed to start `git filter-branch`: {0}")]
    Spawn(String),

    #[error("a rewrite has already been executed by this executor")]
    ExecutorReused,
}
