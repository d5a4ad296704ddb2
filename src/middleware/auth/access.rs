//! Bearer access-token verification → puts `AuthCtx` into request extensions.
//!
//! Responsibility:
//! - Extract `Authorization: Bearer <jwt>` and verify it via `AuthService`
//!   (signature + iss/aud/exp + strict claim checks)
//! - On success, attach the immutable `AuthCtx` for handlers/extractors
//! - Authorization (scope checks) is the handler/service side's concern

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Apply the bearer middleware to the routes that require authentication.
///
/// Example:
/// ```ignore
/// let protected = access::apply(Router::new().route("/hello", get(hello)), state);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8's from_fn cannot take a State extractor by itself, so pass the
    // state explicitly via from_fn_with_state
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let claims = match state.auth.verify_verified(token) {
        Ok(claims) => claims,
        Err(err) => {
            // The reason stays server-side; the client only sees 401.
            tracing::warn!(
                error = %err,
                "access token verification failed"
            );
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!(user_id = %claims.user_id, jti = ?claims.jti, "access token verified");

    // middleware → extractor hand-off
    req.extensions_mut().insert(AuthCtx::from(claims));

    Ok(next.run(req).await)
}
