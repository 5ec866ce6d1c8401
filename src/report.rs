use crate::executor::{BACKUP_REF_NAMESPACE, RewriteOutcome};

use console::style;

/// Deletes every backup ref left by `git filter-branch`.
pub const CLEANUP_COMMAND: &str =
    r#"git for-each-ref --format="%(refname)" refs/original/ | xargs -n 1 git update-ref -d"#;

/// Publishes the rewritten branches and tags.
pub const FORCE_PUSH_COMMAND: &str = "git push --force --tags origin 'refs/heads/*'";

/// How a report line is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Hint,
    Command,
    Error,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub tone: Tone,
    pub text: String,
}

impl ReportLine {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        ReportLine {
            tone,
            text: text.into(),
        }
    }

    fn render(&self) -> String {
        match self.tone {
            Tone::Success => style(&self.text).green().bold().to_string(),
            Tone::Info => style(&self.text).green().to_string(),
            Tone::Hint => style(&self.text).yellow().to_string(),
            Tone::Command => style(&self.text).cyan().to_string(),
            Tone::Error => style(&self.text).red().to_string(),
            Tone::Detail => style(&self.text).dim().to_string(),
        }
    }
}

/// Builds the report for a finished rewrite.
///
/// Success lines name the backup namespace and give the cleanup and
/// force-push commands. Failure lines carry standard error verbatim, then
/// standard output when it is not empty.
pub fn outcome_lines(outcome: &RewriteOutcome) -> Vec<ReportLine> {
    match outcome {
        RewriteOutcome::Succeeded => vec![
            ReportLine::new(
                Tone::Success,
                "✔ Commit history has been rewritten successfully.",
            ),
            ReportLine::new(
                Tone::Info,
                format!(
                    "A backup of the original refs was stored in {}.",
                    BACKUP_REF_NAMESPACE
                ),
            ),
            ReportLine::new(
                Tone::Hint,
                "Please review your git history to confirm the changes.",
            ),
            ReportLine::new(Tone::Hint, ""),
            ReportLine::new(
                Tone::Hint,
                "To clean up the backup and finalize the changes, run:",
            ),
            ReportLine::new(Tone::Command, format!("  {}", CLEANUP_COMMAND)),
            ReportLine::new(Tone::Hint, ""),
            ReportLine::new(
                Tone::Hint,
                "After confirming, you may need to force-push to your remote repository:",
            ),
            ReportLine::new(Tone::Command, format!("  {}", FORCE_PUSH_COMMAND)),
        ],
        RewriteOutcome::Failed {
            exit_code,
            stderr,
            stdout,
        } => {
            let status = match exit_code {
                Some(code) => format!("exit status {}", code),
                None => String::from("terminated by signal"),
            };
            let mut lines = vec![
                ReportLine::new(
                    Tone::Error,
                    format!(
                        "✖ An error occurred during the rewrite process ({}).",
                        status
                    ),
                ),
                ReportLine::new(Tone::Error, stderr.clone()),
            ];
            if !stdout.is_empty() {
                lines.push(ReportLine::new(Tone::Detail, stdout.clone()));
            }
            lines
        }
    }
}

/// Prints the report for `outcome`. Success goes to stdout, failure to stderr.
pub fn print_outcome(outcome: &RewriteOutcome) {
    let lines = outcome_lines(outcome);
    if outcome.is_success() {
        for line in &lines {
            println!("{}", line.render());
        }
    } else {
        for line in &lines {
            eprintln!("{}", line.render());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(outcome: &RewriteOutcome) -> Vec<String> {
        outcome_lines(outcome).into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn success_includes_backup_cleanup_and_push() {
        let lines = texts(&RewriteOutcome::Succeeded);
        let s = lines.join("\n");

        assert!(s.contains("refs/original/"));
        assert!(lines.iter().any(|l| l.trim() == CLEANUP_COMMAND));
        assert!(lines.iter().any(|l| l.trim() == FORCE_PUSH_COMMAND));
    }

    #[test]
    fn cleanup_command_targets_backup_namespace() {
        assert!(CLEANUP_COMMAND.contains(BACKUP_REF_NAMESPACE));
        assert!(CLEANUP_COMMAND.contains("git update-ref -d"));
    }

    #[test]
    fn failure_carries_stderr_verbatim() {
        let stderr = "fatal: Needed a single revision\n  with   odd   spacing\n";
        let outcome = RewriteOutcome::Failed {
            exit_code: Some(128),
            stderr: stderr.to_string(),
            stdout: String::new(),
        };
        let lines = outcome_lines(&outcome);

        assert!(lines[0].text.contains("exit status 128"));
        assert_eq!(lines[1].text, stderr);
        assert_eq!(lines[1].tone, Tone::Error);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn failure_appends_non_empty_stdout_as_detail() {
        let outcome = RewriteOutcome::Failed {
            exit_code: None,
            stderr: "boom".to_string(),
            stdout: "Rewrite 1234 (1/3)".to_string(),
        };
        let lines = outcome_lines(&outcome);

        assert!(lines[0].text.contains("terminated by signal"));
        assert_eq!(lines.last().unwrap().tone, Tone::Detail);
        assert_eq!(lines.last().unwrap().text, "Rewrite 1234 (1/3)");
    }

    #[test]
    fn success_has_no_error_lines() {
        assert!(
            outcome_lines(&RewriteOutcome::Succeeded)
                .iter()
                .all(|l| l.tone != Tone::Error)
        );
    }
}
