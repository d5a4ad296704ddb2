/*
 * Responsibility
 * - Scope guard: does the caller's `scope` claim intersect an accepted list?
 * - Pure check over the immutable AuthCtx; no response I/O here
 *
 * Notes
 * - Handlers call this after the bearer middleware has run and propagate the
 *   error; error.rs owns the HTTP rendering (401 empty / 403 plain text).
 */
use thiserror::Error;

use crate::api::v1::extractors::AuthCtx;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    /// Empty acceptance list. A guard that accepts nothing can never pass,
    /// so this is treated as a caller bug rather than a deny verdict.
    #[error("accepted scopes must not be empty")]
    MissingAcceptedScopes,

    /// No authenticated principal (and therefore no claims) on the request.
    #[error("the request carries no authenticated principal")]
    Unauthenticated,

    /// Principal is authenticated but the `scope` claim is missing or does
    /// not contain any accepted scope. The message text is part of the API
    /// contract; it is returned verbatim as the 403 body.
    #[error("Auth error: The 'scope' claim does not contain scopes '{required}' or was not found.")]
    InsufficientScope { required: String },
}

/// Checks that the principal's `scope` claim grants at least one of
/// `accepted_scopes`.
///
/// The `scope` claim value is a single string of space-delimited scope
/// tokens (OAuth2 style); it is split on single spaces, not general
/// whitespace. Success touches nothing; the caller's protected logic runs
/// only when this returns `Ok`.
pub fn check_any_accepted_scope(
    principal: Option<&AuthCtx>,
    accepted_scopes: &[&str],
) -> Result<(), ScopeError> {
    if accepted_scopes.is_empty() {
        return Err(ScopeError::MissingAcceptedScopes);
    }

    let Some(principal) = principal else {
        return Err(ScopeError::Unauthenticated);
    };

    let granted = principal
        .scope
        .as_deref()
        .map(|claim| claim.split(' ').any(|s| accepted_scopes.contains(&s)))
        .unwrap_or(false);

    if granted {
        Ok(())
    } else {
        Err(ScopeError::InsufficientScope {
            required: accepted_scopes.join(","),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn ctx(scope: Option<&str>) -> AuthCtx {
        AuthCtx {
            user_id: Uuid::new_v4(),
            scope: scope.map(str::to_string),
            jti: None,
        }
    }

    #[test]
    fn empty_accepted_list_is_a_caller_error() {
        let principal = ctx(Some("read write"));
        assert_eq!(
            check_any_accepted_scope(Some(&principal), &[]),
            Err(ScopeError::MissingAcceptedScopes)
        );
        // Checked before the principal is even looked at.
        assert_eq!(
            check_any_accepted_scope(None, &[]),
            Err(ScopeError::MissingAcceptedScopes)
        );
    }

    #[test]
    fn missing_principal_is_unauthenticated() {
        assert_eq!(
            check_any_accepted_scope(None, &["write"]),
            Err(ScopeError::Unauthenticated)
        );
    }

    #[test]
    fn missing_scope_claim_is_insufficient() {
        let principal = ctx(None);
        let err = check_any_accepted_scope(Some(&principal), &["read", "admin"]).unwrap_err();
        match err {
            ScopeError::InsufficientScope { ref required } => {
                assert_eq!(required, "read,admin");
            }
            other => panic!("expected InsufficientScope, got {other:?}"),
        }
        // All requested scopes appear in the user-facing message.
        let msg = err.to_string();
        assert!(msg.contains("read"));
        assert!(msg.contains("admin"));
    }

    #[test]
    fn any_single_overlap_is_enough() {
        let principal = ctx(Some("read write"));
        assert_eq!(
            check_any_accepted_scope(Some(&principal), &["write", "admin"]),
            Ok(())
        );
    }

    #[test]
    fn disjoint_scopes_are_rejected_with_contract_message() {
        let principal = ctx(Some("read"));
        let err = check_any_accepted_scope(Some(&principal), &["write"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Auth error: The 'scope' claim does not contain scopes 'write' or was not found."
        );
    }

    #[test]
    fn split_is_on_single_spaces_only() {
        // A tab is not a separator; "read\twrite" is one (unknown) token.
        let principal = ctx(Some("read\twrite"));
        assert!(check_any_accepted_scope(Some(&principal), &["write"]).is_err());

        let principal = ctx(Some("read write"));
        assert_eq!(
            check_any_accepted_scope(Some(&principal), &["write"]),
            Ok(())
        );
    }

    #[test]
    fn check_is_idempotent() {
        let principal = ctx(Some("read"));
        let first = check_any_accepted_scope(Some(&principal), &["write"]);
        let second = check_any_accepted_scope(Some(&principal), &["write"]);
        assert_eq!(first, second);

        let principal = ctx(Some("write"));
        let first = check_any_accepted_scope(Some(&principal), &["write"]);
        let second = check_any_accepted_scope(Some(&principal), &["write"]);
        assert_eq!(first, second);
        assert_eq!(first, Ok(()));
    }
}
