use crate::executor::BACKUP_REF_NAMESPACE;
use crate::request::RewriteRequest;

use console::{measure_text_width, style};
use std::iter;

/// Prints the boxed, colorized warning shown before any history rewrite.
///
/// The box is sized to the widest **visible** line, using
/// [`console::measure_text_width`] so that ANSI color codes inside the
/// content do not skew the padding. Borders are styled independently from the
/// inner text so embedded colors never bleed into the box edges.
///
/// # Examples
///
/// ```no_run
/// use git_history_rewrite::banner::print_warning_banner;
/// use git_history_rewrite::request::RewriteRequest;
///
/// let request = RewriteRequest::all("John Doe", "john@example.com").unwrap();
/// print_warning_banner(&request);
/// ```
pub fn print_warning_banner(request: &RewriteRequest) {
    let lines = warning_lines(request);

    let max_width = lines
        .iter()
        .map(|l| measure_text_width(l)) // ignore ANSI in content
        .max()
        .unwrap_or(0)
        + 2;

    let border = "═".repeat(max_width);
    let top = style(format!("╔{}╗", border)).yellow().bold();
    let bottom = style(format!("╚{}╝", border)).yellow().bold();
    let left = style("║ ").yellow().bold().to_string();
    let right = style("║").yellow().bold().to_string();

    println!();
    println!("{top}");
    for line in lines {
        let visible = measure_text_width(&line);
        let pad = max_width - visible; // includes the one space after left border
        println!("{}{}{}{}", left, line, " ".repeat(pad - 1), right);
    }
    println!("{bottom}");
    println!();
}

/// Builds the warning lines: the destructive-operation notice, then a summary
/// of what will be rewritten.
///
/// Some lines carry ANSI styling; measure them with
/// `console::measure_text_width` rather than `str::len()`.
fn warning_lines(request: &RewriteRequest) -> Vec<String> {
    let notice = [
        format!(
            "{} This is a destructive operation that rewrites Git history.",
            style("Warning:").yellow().bold()
        ),
        String::from("It can be very slow on large repositories."),
        format!(
            "A backup of your history will be stored in {}.",
            style(BACKUP_REF_NAMESPACE).cyan()
        ),
        String::from("Make sure you have a clean working directory before proceeding."),
    ]
    .into_iter();

    let identity = request.identity();
    let target = match request {
        RewriteRequest::All { .. } => String::from("Commits: all commits on every branch and tag"),
        RewriteRequest::ByEmail { old_email, .. } => {
            format!("Commits: authored or committed by {}", old_email)
        }
        RewriteRequest::ByHash { commit_hashes, .. } => {
            format!("Commits: ids starting with {}", commit_hashes.join(", "))
        }
    };

    let summary = iter::once(String::new())
        .chain(iter::once(target))
        .chain(iter::once(format!(
            "New identity: {}",
            style(format!("{} <{}>", identity.name, identity.email)).cyan()
        )));

    notice.chain(summary).collect()
}

#[cfg(test)]
mod tests {
    use super::warning_lines;
    use crate::request::RewriteRequest;

    #[test]
    fn warning_mentions_risks_and_backup() {
        let req = RewriteRequest::all("John Doe", "john@doe.org").unwrap();
        let s = warning_lines(&req).join("\n");

        assert!(s.contains("This is a destructive operation that rewrites Git history."));
        assert!(s.contains("It can be very slow on large repositories."));
        assert!(s.contains("refs/original/"));
        assert!(s.contains("clean working directory"));
        assert!(s.contains("John Doe <john@doe.org>"));
        assert!(s.contains("all commits on every branch and tag"));
    }

    #[test]
    fn warning_summarizes_by_email_target() {
        let req = RewriteRequest::by_email("old@example.com", "Jane", "jane@example.com").unwrap();
        let s = warning_lines(&req).join("\n");
        assert!(s.contains("Commits: authored or committed by old@example.com"));
    }

    #[test]
    fn warning_summarizes_hash_list() {
        let req = RewriteRequest::by_hash("Jane", "jane@example.com", "abc123 def456").unwrap();
        let s = warning_lines(&req).join("\n");
        assert!(s.contains("Commits: ids starting with abc123, def456"));
    }
}
