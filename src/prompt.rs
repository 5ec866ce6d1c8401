use crate::error::Error;
use crate::request::{RewriteMode, RewriteRequest};

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::io;

/// Abstraction over a string input prompt.
///
/// Implementors define how string input is collected from the user,
/// including any styling or interactivity. This trait enables testability
/// by decoupling user input from the logic that consumes it.
pub trait StringPrompter {
    /// Prompt the user for a string input.
    ///
    /// # Parameters
    /// - `prompt`: The message shown to the user.
    /// - `default`: Value used if the user presses Enter without input. An
    ///   empty default means the answer may be left empty.
    ///
    /// # Returns
    /// `Ok(Some(String))` with the answer, `Ok(None)` if the user cancelled,
    /// or `Err(String)` describing the failure.
    fn prompt(&mut self, prompt: &str, default: &str) -> Result<Option<String>, String>;
}

/// Abstraction over a boolean (yes/no) confirmation prompt.
pub trait ConfirmPrompter {
    /// Prompt the user for a yes/no confirmation.
    ///
    /// # Returns
    /// `Ok(Some(bool))` with the answer, `Ok(None)` if the user dismissed the
    /// prompt, or `Err(String)` on input failure.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, String>;
}

/// Abstraction over a single-choice menu.
pub trait SelectPrompter {
    /// Prompt the user to pick one of `items`, returning its index.
    ///
    /// `Ok(None)` means the user dismissed the menu.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Option<usize>, String>;
}

/// Maps a dialoguer error, treating an interrupted read as cancellation.
fn cancelled_or_err<T>(e: dialoguer::Error) -> Result<Option<T>, String> {
    match e {
        dialoguer::Error::IO(io_err) if io_err.kind() == io::ErrorKind::Interrupted => Ok(None),
        other => Err(other.to_string()),
    }
}

/// Default implementation of `StringPrompter` using `dialoguer::Input`.
///
/// Empty answers are accepted so that a missing field can be reported once
/// instead of re-prompting.
pub struct DialoguerStringPrompter;

impl StringPrompter for DialoguerStringPrompter {
    fn prompt(&mut self, prompt: &str, default: &str) -> Result<Option<String>, String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        match input.interact_text() {
            Ok(v) => Ok(Some(v)),
            Err(e) => cancelled_or_err(e),
        }
    }
}

/// Default implementation of `ConfirmPrompter` using `dialoguer::Confirm`.
pub struct DialoguerConfirmPrompter;

impl ConfirmPrompter for DialoguerConfirmPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, String> {
        let theme = ColorfulTheme::default();
        let confirm = Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(default);
        match confirm.interact_opt() {
            Ok(v) => Ok(v),
            Err(e) => cancelled_or_err(e),
        }
    }
}

/// Default implementation of `SelectPrompter` using `dialoguer::Select`.
pub struct DialoguerSelectPrompter;

impl SelectPrompter for DialoguerSelectPrompter {
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<Option<usize>, String> {
        let theme = ColorfulTheme::default();
        let select = Select::with_theme(&theme)
            .with_prompt(prompt)
            .items(items)
            .default(0);
        match select.interact_opt() {
            Ok(v) => Ok(v),
            Err(e) => cancelled_or_err(e),
        }
    }
}

/// Prompt defaults for the replacement identity, usually read from `git config`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityDefaults {
    pub name: String,
    pub email: String,
}

/// Ask which kind of rewrite to perform.
///
/// Returns `Ok(None)` if the user dismissed the menu.
pub fn choose_mode<P: SelectPrompter>(prompter: &mut P) -> Result<Option<RewriteMode>, Error> {
    let labels: Vec<&str> = RewriteMode::MENU.iter().map(|m| m.label()).collect();
    let picked = prompter
        .select(
            "What kind of commit history rewrite do you want to perform?",
            &labels,
        )
        .map_err(Error::Prompt)?;
    Ok(picked.and_then(|i| RewriteMode::MENU.get(i).copied()))
}

/// Prompt for the fields `mode` needs, then validate them into a request.
///
/// Returns `Ok(None)` as soon as any prompt is cancelled; later prompts are
/// not shown.
///
/// # Errors
///
/// * [`Error::Prompt`] if input could not be read.
/// * [`Error::Validation`] if a required field is empty or no commit hash
///   survives splitting.
pub fn collect_request<P: StringPrompter>(
    prompter: &mut P,
    mode: RewriteMode,
    defaults: &IdentityDefaults,
) -> Result<Option<RewriteRequest>, Error> {
    let mut ask = |label: &str, default: &str| prompter.prompt(label, default).map_err(Error::Prompt);

    let request = match mode {
        RewriteMode::All => {
            let Some(name) = ask("Enter the new author name for ALL commits", &defaults.name)?
            else {
                return Ok(None);
            };
            let Some(email) = ask("Enter the new author email for ALL commits", &defaults.email)?
            else {
                return Ok(None);
            };
            RewriteRequest::all(&name, &email)?
        }
        RewriteMode::ByEmail => {
            let Some(old_email) = ask("Enter the old email address to replace", "")? else {
                return Ok(None);
            };
            let Some(name) = ask("Enter the new author name", &defaults.name)? else {
                return Ok(None);
            };
            let Some(email) = ask("Enter the new author email", &defaults.email)? else {
                return Ok(None);
            };
            RewriteRequest::by_email(&old_email, &name, &email)?
        }
        RewriteMode::ByHash => {
            let Some(name) = ask("Enter the new author name", &defaults.name)? else {
                return Ok(None);
            };
            let Some(email) = ask("Enter the new author email", &defaults.email)? else {
                return Ok(None);
            };
            let Some(hashes) = ask(
                "Enter commit hashes to rewrite (space or comma separated)",
                "",
            )?
            else {
                return Ok(None);
            };
            RewriteRequest::by_hash(&name, &email, &hashes)?
        }
    };

    tracing::debug!(mode = ?request.mode(), "rewrite request validated");
    Ok(Some(request))
}
