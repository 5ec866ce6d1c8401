//! # git-history-rewrite
//!
//! A CLI tool to rewrite commit author and committer identities across the
//! history of a Git repository with `git filter-branch`.
//!
//! This crate provides functionality to:
//! - Choose a rewrite mode: all commits, commits from one email, or commits by hash
//! - Prompt for and validate the replacement identity
//! - Show a destructive-operation warning and require explicit confirmation
//! - Build the per-commit `--env-filter` fragment
//! - Run the rewrite and report the outcome with follow-up commands
//!
//! ## Usage
//!
//! ```bash
//! # Choose the mode from a menu
//! git-history-rewrite
//!
//! # Pre-select a mode and run in another repository
//! git-history-rewrite --mode by-email -C ../other-repo
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface and main entry point
//! - [`rewrite`] - The sequential rewrite pipeline
//! - [`request`] - Rewrite modes and validated requests
//! - [`filter`] - Filter script construction
//! - [`gate`] - Confirmation gate
//! - [`executor`] - `git filter-branch` execution and outcome classification
//! - [`report`] - Outcome reporting
//! - [`prompt`] - User input abstractions
//! - [`git`] - Git command wrappers
//! - [`banner`] - Boxed warning banner
//! - [`error`] - Error type

pub mod banner;
pub mod cli;
pub mod error;
pub mod executor;
pub mod filter;
pub mod gate;
pub mod git;
pub mod prompt;
pub mod report;
pub mod request;
pub mod rewrite;

pub use error::Error;
