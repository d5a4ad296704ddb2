/*
 * Responsibility
 * - Public surface of the services layer (re-exports)
 */
pub mod auth;
