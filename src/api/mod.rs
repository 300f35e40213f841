/*
 * Responsibility
 * - API versions (only v1 for now)
 */
pub mod v1;
