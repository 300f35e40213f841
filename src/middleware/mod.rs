/*
 * Responsibility
 * - Middleware entry points (identity check, HTTP-level layers)
 */
pub mod auth;
pub mod http;
