use std::fmt;

/// Which commits a rewrite applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RewriteMode {
    /// Every commit in history.
    All,
    /// Commits whose author or committer email matches an old address.
    ByEmail,
    /// Commits whose id starts with one of the listed hashes.
    ByHash,
}

impl RewriteMode {
    /// All modes, in menu order.
    pub const MENU: [RewriteMode; 3] = [RewriteMode::All, RewriteMode::ByEmail, RewriteMode::ByHash];

    /// Human readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            RewriteMode::All => "Rewrite author for ALL commits in history",
            RewriteMode::ByEmail => "Rewrite author for commits from a specific email",
            RewriteMode::ByHash => "Rewrite author for specific commits by hash",
        }
    }
}

/// A user supplied field of a [`RewriteRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    NewName,
    NewEmail,
    OldEmail,
    CommitHashes,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::NewName => "new author name",
            Field::NewEmail => "new author email",
            Field::OldEmail => "old email address",
            Field::CommitHashes => "commit hashes",
        };
        f.write_str(s)
    }
}

/// Why raw input could not become a [`RewriteRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("the {0} is required. Aborting.")]
    MissingField(Field),

    #[error("please provide at least one commit hash. Aborting.")]
    NoCommitHashes,
}

/// The replacement identity written into matching commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// A validated rewrite intent. Only constructible with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteRequest {
    All {
        identity: Identity,
    },
    ByEmail {
        old_email: String,
        identity: Identity,
    },
    ByHash {
        identity: Identity,
        commit_hashes: Vec<String>,
    },
}

impl RewriteRequest {
    /// Builds an [`RewriteRequest::All`] request.
    pub fn all(new_name: &str, new_email: &str) -> Result<Self, ValidationError> {
        let identity = identity(new_name, new_email)?;
        Ok(RewriteRequest::All { identity })
    }

    /// Builds a [`RewriteRequest::ByEmail`] request.
    ///
    /// Fields are checked in prompt order: old email, new name, new email.
    pub fn by_email(
        old_email: &str,
        new_name: &str,
        new_email: &str,
    ) -> Result<Self, ValidationError> {
        let old_email = required(old_email, Field::OldEmail)?;
        let identity = identity(new_name, new_email)?;
        Ok(RewriteRequest::ByEmail {
            old_email,
            identity,
        })
    }

    /// Builds a [`RewriteRequest::ByHash`] request from the raw hash list.
    ///
    /// A blank `raw_hashes` is a missing field. Input made only of separators
    /// is reported separately as [`ValidationError::NoCommitHashes`].
    pub fn by_hash(
        new_name: &str,
        new_email: &str,
        raw_hashes: &str,
    ) -> Result<Self, ValidationError> {
        let identity = identity(new_name, new_email)?;
        if raw_hashes.trim().is_empty() {
            return Err(ValidationError::MissingField(Field::CommitHashes));
        }
        let commit_hashes = split_hashes(raw_hashes);
        if commit_hashes.is_empty() {
            return Err(ValidationError::NoCommitHashes);
        }
        Ok(RewriteRequest::ByHash {
            identity,
            commit_hashes,
        })
    }

    pub fn mode(&self) -> RewriteMode {
        match self {
            RewriteRequest::All { .. } => RewriteMode::All,
            RewriteRequest::ByEmail { .. } => RewriteMode::ByEmail,
            RewriteRequest::ByHash { .. } => RewriteMode::ByHash,
        }
    }

    pub fn identity(&self) -> &Identity {
        match self {
            RewriteRequest::All { identity }
            | RewriteRequest::ByEmail { identity, .. }
            | RewriteRequest::ByHash { identity, .. } => identity,
        }
    }
}

/// Splits raw hash input on any run of whitespace and/or commas.
///
/// Empty tokens are dropped, order is preserved, and tokens are lowercased
/// because git object ids are lowercase hex.
pub fn split_hashes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
        .collect()
}

fn identity(new_name: &str, new_email: &str) -> Result<Identity, ValidationError> {
    Ok(Identity {
        name: required(new_name, Field::NewName)?,
        email: required(new_email, Field::NewEmail)?,
    })
}

fn required(value: &str, field: Field) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_hashes_handles_mixed_separators() {
        let tokens = split_hashes("abc123, def456  ghi789");
        assert_eq!(tokens, vec!["abc123", "def456", "ghi789"]);
    }

    #[test]
    fn split_hashes_only_separators_is_empty() {
        assert!(split_hashes(" , ").is_empty());
        assert!(split_hashes(",,\t\n,").is_empty());
    }

    #[test]
    fn split_hashes_lowercases_tokens() {
        assert_eq!(split_hashes("ABC123,Def456"), vec!["abc123", "def456"]);
    }

    #[test]
    fn by_hash_separators_only_is_distinct_from_missing() {
        let err = RewriteRequest::by_hash("Jane", "jane@example.com", " , ").unwrap_err();
        assert_eq!(err, ValidationError::NoCommitHashes);

        let err = RewriteRequest::by_hash("Jane", "jane@example.com", "").unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::CommitHashes));
    }

    #[test]
    fn by_hash_missing_name_reported_first() {
        let err = RewriteRequest::by_hash("", "jane@example.com", "abc123").unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::NewName));
    }

    #[test]
    fn by_hash_keeps_token_order() {
        let req = RewriteRequest::by_hash("Jane", "jane@example.com", "c3 a1,b2").unwrap();
        match req {
            RewriteRequest::ByHash { commit_hashes, .. } => {
                assert_eq!(commit_hashes, vec!["c3", "a1", "b2"]);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn all_trims_and_rejects_whitespace_only() {
        let req = RewriteRequest::all("  Jane Doe ", " jane@example.com").unwrap();
        assert_eq!(
            req.identity(),
            &Identity {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
            }
        );

        let err = RewriteRequest::all("Jane", "   ").unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::NewEmail));
    }

    #[test]
    fn by_email_requires_old_email() {
        let err = RewriteRequest::by_email("", "Jane", "jane@example.com").unwrap_err();
        assert_eq!(err, ValidationError::MissingField(Field::OldEmail));
        let req = RewriteRequest::by_email("old@example.com", "Jane", "jane@example.com").unwrap();
        assert_eq!(req.mode(), RewriteMode::ByEmail);
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let msg = ValidationError::MissingField(Field::OldEmail).to_string();
        assert_eq!(msg, "the old email address is required. Aborting.");
    }
}
