//! Confirmation gate in front of every history rewrite.
//!
//! The gate always shows the warning and always asks. There is no flag or
//! mode that skips it, and the default answer is "no".

use crate::banner::print_warning_banner;
use crate::error::Error;
use crate::prompt::ConfirmPrompter;
use crate::request::RewriteRequest;

const CONFIRM_PROMPT: &str = "Are you sure you want to continue?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Declined,
}

/// Ask for explicit confirmation that `request` may rewrite history.
///
/// Only an explicit "yes" proceeds. Dismissing the prompt counts as declining.
pub fn confirm<P: ConfirmPrompter>(
    prompter: &mut P,
    request: &RewriteRequest,
) -> Result<GateDecision, Error> {
    print_warning_banner(request);

    let answer = prompter
        .confirm(CONFIRM_PROMPT, false)
        .map_err(Error::Prompt)?;
    let decision = match answer {
        Some(true) => GateDecision::Proceed,
        Some(false) | None => GateDecision::Declined,
    };
    tracing::debug!(?decision, "confirmation gate");
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockConfirmPrompter {
        response: Result<Option<bool>, String>,
    }

    impl ConfirmPrompter for MockConfirmPrompter {
        fn confirm(&mut self, prompt: &str, default: bool) -> Result<Option<bool>, String> {
            assert_eq!(prompt, "Are you sure you want to continue?");
            assert_eq!(default, false);
            self.response.clone()
        }
    }

    fn request() -> RewriteRequest {
        RewriteRequest::all("Jane", "jane@example.com").unwrap()
    }

    #[test]
    fn yes_proceeds() {
        let mut p = MockConfirmPrompter {
            response: Ok(Some(true)),
        };
        assert_eq!(confirm(&mut p, &request()).unwrap(), GateDecision::Proceed);
    }

    #[test]
    fn no_declines() {
        let mut p = MockConfirmPrompter {
            response: Ok(Some(false)),
        };
        assert_eq!(confirm(&mut p, &request()).unwrap(), GateDecision::Declined);
    }

    #[test]
    fn dismissed_declines() {
        let mut p = MockConfirmPrompter { response: Ok(None) };
        assert_eq!(confirm(&mut p, &request()).unwrap(), GateDecision::Declined);
    }

    #[test]
    fn prompt_error_propagates() {
        let mut p = MockConfirmPrompter {
            response: Err("confirm failed".to_string()),
        };
        assert!(matches!(confirm(&mut p, &request()), Err(Error::Prompt(_))));
    }
}
