//! Pure credential validation rules.
//!
//! These run before any store mutation (validate-then-commit) and short-circuit
//! with the exact human-readable message shown to the user. The same password
//! rules apply to self-registration, admin add, and password change.

use regex::Regex;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 6;

/// A failed validation, carrying the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError(&'static str);

impl ValidationError {
    #[must_use]
    pub const fn message(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Username and password must both be present (username trimmed by callers).
///
/// # Errors
/// Returns the "fill all fields" message when either field is empty.
pub fn required_fields(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.is_empty() || password.is_empty() {
        return Err(ValidationError("Please fill all fields"));
    }
    Ok(())
}

/// Password strength: length plus one uppercase, one lowercase, one digit.
///
/// # Errors
/// Returns the specific message for the first failed rule.
pub fn password_strength(password: &str) -> Result<(), ValidationError> {
    if password.len() < PASSWORD_MIN_LEN {
        return Err(ValidationError("Password must be at least 6 characters"));
    }

    let has_class = |pattern| Regex::new(pattern).is_ok_and(|re: Regex| re.is_match(password));

    if !has_class("[A-Z]") || !has_class("[a-z]") || !has_class("[0-9]") {
        return Err(ValidationError(
            "Password must contain uppercase, lowercase and number",
        ));
    }

    Ok(())
}

/// Registration confirmation equality.
///
/// # Errors
/// Returns the mismatch message when the two passwords differ.
pub fn passwords_match(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError("Passwords do not match"));
    }
    Ok(())
}
