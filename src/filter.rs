//! Builds the `--env-filter` fragment that `git filter-branch` evaluates once per commit.
//!
//! Every value taken from the user is single-quoted before it is placed in the
//! fragment, so names, emails and hashes are always literal shell words. The
//! fragment itself is handed to git as one argument, never through a shell
//! command line.

use crate::request::{Identity, RewriteRequest};
use std::fmt;

/// A shell fragment for `git filter-branch --env-filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterScript(String);

impl FilterScript {
    /// Renders the fragment for `request`. The output is deterministic.
    pub fn build(request: &RewriteRequest) -> Self {
        let body = match request {
            RewriteRequest::All { identity } => {
                exports(identity, &[Role::Author, Role::Committer], "")
            }
            RewriteRequest::ByEmail {
                old_email,
                identity,
            } => {
                let old = shell_quote(old_email);
                let mut s = String::new();
                s.push_str(&format!("if [ \"$GIT_COMMITTER_EMAIL\" = {old} ]; then\n"));
                s.push_str(&exports(identity, &[Role::Committer], "    "));
                s.push_str("fi\n");
                s.push_str(&format!("if [ \"$GIT_AUTHOR_EMAIL\" = {old} ]; then\n"));
                s.push_str(&exports(identity, &[Role::Author], "    "));
                s.push_str("fi\n");
                s
            }
            RewriteRequest::ByHash {
                identity,
                commit_hashes,
            } => {
                let mut s = String::new();
                s.push_str("case \"$GIT_COMMIT\" in\n");
                s.push_str(&format!("    {})\n", hash_pattern(commit_hashes)));
                s.push_str(&exports(identity, &[Role::Author, Role::Committer], "        "));
                s.push_str("        ;;\n");
                s.push_str("esac\n");
                s
            }
        };
        FilterScript(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy)]
enum Role {
    Author,
    Committer,
}

impl Role {
    fn prefix(self) -> &'static str {
        match self {
            Role::Author => "GIT_AUTHOR",
            Role::Committer => "GIT_COMMITTER",
        }
    }
}

fn exports(identity: &Identity, roles: &[Role], indent: &str) -> String {
    let name = shell_quote(&identity.name);
    let email = shell_quote(&identity.email);
    roles
        .iter()
        .map(|role| {
            let p = role.prefix();
            format!("{indent}export {p}_NAME={name};\n{indent}export {p}_EMAIL={email};\n")
        })
        .collect()
}

/// Joins `hashes` into one `case` alternation of quoted prefix patterns.
///
/// A commit matches when its full id starts with any listed hash, so both
/// abbreviated and full ids select the commit.
///
/// ```
/// use git_history_rewrite::filter::hash_pattern;
///
/// let hashes = vec!["abc123".to_string(), "def456".to_string()];
/// assert_eq!(hash_pattern(&hashes), "'abc123'*|'def456'*");
/// ```
pub fn hash_pattern(hashes: &[String]) -> String {
    hashes
        .iter()
        .map(|h| format!("{}*", shell_quote(h)))
        .collect::<Vec<String>>()
        .join("|")
}

/// Quotes `value` as a single POSIX shell word.
///
/// The value is wrapped in single quotes and every embedded `'` becomes `'\''`.
///
/// ```
/// use git_history_rewrite::filter::shell_quote;
///
/// assert_eq!(shell_quote("Jane Doe"), "'Jane Doe'");
/// assert_eq!(shell_quote("O'Brien"), "'O'\\''Brien'");
/// ```
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
