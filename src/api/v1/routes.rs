/*
 * Responsibility
 * - Define the v1 URL structure
 * - Decide here which routes sit behind the bearer middleware
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{health::health, hello::hello};

pub fn routes(state: AppState) -> Router<AppState> {
    // /hello requires a verified bearer token; /health stays public.
    let protected = access::apply(Router::new().route("/hello", get(hello)), state);

    Router::new().route("/health", get(health)).merge(protected)
}
