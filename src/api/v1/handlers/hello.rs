/*
 * Responsibility
 * - GET /hello: the single scope-protected route
 * - Authentication happens in the bearer middleware; authorization (the
 *   scope check) happens here, before the handler body
 */
use crate::api::v1::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::services::auth::scope;

/// Scope values sufficient to call this route. The value mirrors what the
/// authority issues for interactive users of this API.
const ACCEPTED_SCOPES: &[&str] = &["https://localhost:5001/access_as_user"];

pub async fn hello(auth: Option<AuthCtxExtractor>) -> Result<&'static str, AppError> {
    let principal = auth.as_ref().map(|AuthCtxExtractor(ctx)| ctx);
    scope::check_any_accepted_scope(principal, ACCEPTED_SCOPES)?;

    Ok("Hello World!")
}
