/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Provide the authenticated request context (AuthCtx) to handlers
 * - HTTP / axum details stay in core; the type definition lives in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
