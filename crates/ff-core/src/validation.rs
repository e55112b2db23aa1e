//! Local form validation, run before any auth request leaves the client.

use serde::Serialize;

use crate::errors::CoreError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_USERNAME_LEN: usize = 3;
pub const VERIFICATION_CODE_LEN: usize = 6;

/// One failed field and its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: &'static str,
}

#[must_use]
pub fn check_email(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Email is required");
    }
    if !looks_like_email(value) {
        return Some("Enter a valid email address");
    }
    None
}

/// Login only enforces presence and length.
#[must_use]
pub fn check_password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Password is required");
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Some("Password must be at least 8 characters");
    }
    None
}

/// Signup additionally requires mixed case and a digit.
#[must_use]
pub fn check_new_password(value: &str) -> Option<&'static str> {
    if let Some(message) = check_password(value) {
        return Some(message);
    }
    let lower = value.chars().any(char::is_lowercase);
    let upper = value.chars().any(char::is_uppercase);
    let digit = value.chars().any(|c| c.is_ascii_digit());
    if !(lower && upper && digit) {
        return Some("Password must contain uppercase, lowercase, and number");
    }
    None
}

#[must_use]
pub fn check_username(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some("Name is required");
    }
    if value.chars().count() < MIN_USERNAME_LEN {
        return Some("Name must be at least 3 characters");
    }
    None
}

/// Verification codes are exactly six characters.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the length is wrong.
pub fn check_code(code: &str) -> Result<(), CoreError> {
    if code.trim().chars().count() == VERIFICATION_CODE_LEN {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Please enter a valid 6-digit verification code.".into(),
        ))
    }
}

// `local@domain.tld`, no whitespace anywhere.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Debug, Clone)]
pub struct LoginForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl LoginForm<'_> {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidForm` listing every failing field.
    pub fn validate(&self) -> Result<(), CoreError> {
        collect([
            ("email", check_email(self.email)),
            ("password", check_password(self.password)),
        ])
    }
}

#[derive(Debug, Clone)]
pub struct SignupForm<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

impl SignupForm<'_> {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidForm` listing every failing field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let confirm = if self.confirm_password.is_empty() {
            Some("Please confirm your password")
        } else if self.confirm_password != self.password {
            Some("Passwords do not match")
        } else {
            None
        };
        collect([
            ("name", check_username(self.username)),
            ("email", check_email(self.email)),
            ("password", check_new_password(self.password)),
            ("confirmPassword", confirm),
        ])
    }
}

fn collect<const N: usize>(checks: [(&'static str, Option<&'static str>); N]) -> Result<(), CoreError> {
    let issues: Vec<FieldIssue> = checks
        .into_iter()
        .filter_map(|(field, message)| message.map(|message| FieldIssue { field, message }))
        .collect();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(CoreError::InvalidForm(issues))
    }
}
