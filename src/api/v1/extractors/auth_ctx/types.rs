/*
 * Responsibility
 * - The "authenticated caller" type handlers see
 * - The identity middleware verifies the token and stores it in request extensions;
 *   handlers only ever receive this type
 */
use uuid::Uuid;

/// Context attached to an authenticated request.
///
/// - `user_id` is the id embedded in the verified bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: Uuid,
}

impl AuthCtx {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
