/*
 * Responsibility
 * - Registration format rules for username/password
 * - Whole-string checks: every character must be in the allowed class
 */
use crate::error::AppError;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 6;

pub fn validate_user(username: &str, password: &str) -> Result<(), AppError> {
    let username_len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username_len) {
        return Err(AppError::validation(
            "username must be between 3 and 30 characters",
        ));
    }
    if !is_valid_username(username) {
        return Err(AppError::validation(
            "username can contain only English letters and digits",
        ));
    }

    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AppError::validation(
            "password must be at least 6 characters",
        ));
    }
    if !is_valid_password(password) {
        return Err(AppError::validation(
            "password can contain only English letters, digits and symbols (_ , !)",
        ));
    }

    Ok(())
}

pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty() && username.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_valid_password(password: &str) -> bool {
    !password.is_empty()
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '!')
}
