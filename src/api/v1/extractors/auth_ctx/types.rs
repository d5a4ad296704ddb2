/*
 * Responsibility
 * - The "authenticated context" type visible to handlers
 * - The middleware verifies the token and stores this in request extensions;
 *   handlers receive this type only
 *
 * Notes
 * - Token verification itself is the middleware/services side's concern
 * - Immutable after construction for the lifetime of the request: no code
 *   path mutates it, so no synchronization is ever needed around it
 */

use uuid::Uuid;

use crate::services::auth::access_jwt::VerifiedAccessToken;

/// Context attached to an authenticated request.
///
/// - `user_id` is the internal user id (UUID, promoted from `sub`)
/// - `scope` is the raw space-delimited `scope` claim, as issued; the scope
///   guard parses it per check
/// - `jti` is kept for audit/correlation
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub scope: Option<String>,
    pub jti: Option<String>,
}

impl From<VerifiedAccessToken> for AuthCtx {
    fn from(token: VerifiedAccessToken) -> Self {
        Self {
            user_id: token.user_id,
            scope: token.scope,
            jti: token.jti,
        }
    }
}
