//! Signup input validation: name, email format, password length.

use std::sync::OnceLock;

use regex::Regex;
use skilltrack_core::error::CoreError;

/// Minimum password length accepted at signup.
const MIN_PASSWORD_LEN: usize = 6;

/// Name length bounds accepted at signup.
const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 100;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email regex must compile")
    })
}

/// Validate a display name (trimmed length between 2 and 100 characters).
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.len() < MIN_NAME_LEN {
        return Err(CoreError::Validation(
            "Name must be at least 2 characters long".into(),
        ));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(
            "Name must be less than 100 characters".into(),
        ));
    }
    Ok(())
}

/// Validate an email address format.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".into()));
    }
    if !email_regex().is_match(email) {
        return Err(CoreError::Validation("Invalid email format".into()));
    }
    Ok(())
}

/// Validate that a password meets the minimum length requirement.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.is_empty() {
        return Err(CoreError::Validation("Password is required".into()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(
            "Password must be at least 6 characters long".into(),
        ));
    }
    Ok(())
}
