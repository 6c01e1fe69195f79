use crate::session::Subject;

/// Scope marking a consent request that must not show any UI
pub const PROMPT_NONE_SCOPE: &str = "prompt:none";

pub const NOT_LOGGED_IN_REASON: &str = "user not logged in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Reject { reason: &'static str },
    Accept { subject: Subject },
    Prompt,
}

/// Decides what to do with a consent request on `GET /consent`.
pub fn decide(requested_scopes: &[String], subject: Option<Subject>) -> Decision {
    let prompt_none = requested_scopes.iter().any(|s| s == PROMPT_NONE_SCOPE);
    match subject {
        None if prompt_none => Decision::Reject {
            reason: NOT_LOGGED_IN_REASON,
        },
        Some(subject) => Decision::Accept { subject },
        None => Decision::Prompt,
    }
}
