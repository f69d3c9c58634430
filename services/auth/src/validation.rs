//! Input validation utilities

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Minimum password length, in characters
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Password policy rules a candidate failed; `true` marks a failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PasswordViolations {
    pub length: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_number: bool,
    pub has_special: bool,
}

impl PasswordViolations {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for PasswordViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules = [
            (self.length, "at least 8 characters"),
            (self.has_upper, "an uppercase letter"),
            (self.has_lower, "a lowercase letter"),
            (self.has_number, "a digit"),
            (self.has_special, "a special character"),
        ];
        let failed: Vec<&str> = rules
            .iter()
            .filter(|(failed, _)| *failed)
            .map(|(_, rule)| *rule)
            .collect();

        write!(f, "Password must contain {}", failed.join(", "))
    }
}

/// Check every password rule and report all failures at once
pub fn validate_password(password: &str) -> Result<(), PasswordViolations> {
    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_number = false;
    let mut has_special = false;

    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        } else if c.is_lowercase() {
            has_lower = true;
        } else if c.is_numeric() {
            has_number = true;
        } else if !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control() {
            has_special = true;
        }
    }

    let violations = PasswordViolations {
        length: password.chars().count() < MIN_PASSWORD_CHARS,
        has_upper: !has_upper,
        has_lower: !has_lower,
        has_number: !has_number,
        has_special: !has_special,
    };

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Trim and lowercase an email, then check its shape
pub fn normalize_email(email: &str) -> Result<String, String> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(&email) {
        return Err("Invalid email format".to_string());
    }

    Ok(email)
}
