/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone is expected to be cheap (internals are Arc)
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}
