//! Display name rules shared by registration and profile updates

use thiserror::Error;

/// Longest display name accepted, in characters
pub const MAX_USER_NAME_CHARS: usize = 64;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserNameError {
    #[error("'user_name' must not be empty")]
    Empty,

    #[error("'user_name' must be at most {} characters", MAX_USER_NAME_CHARS)]
    TooLong,
}

/// Trim a display name and bound its length in characters
pub fn normalize_user_name(user_name: &str) -> Result<String, UserNameError> {
    let trimmed = user_name.trim();
    let chars = trimmed.chars().count();

    if chars == 0 {
        return Err(UserNameError::Empty);
    }
    if chars > MAX_USER_NAME_CHARS {
        return Err(UserNameError::TooLong);
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(normalize_user_name("  ada ").unwrap(), "ada");
    }

    #[test]
    fn blank_name_is_empty() {
        assert_eq!(normalize_user_name(""), Err(UserNameError::Empty));
        assert_eq!(normalize_user_name(" \t\n"), Err(UserNameError::Empty));
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        assert!(normalize_user_name(&"é".repeat(MAX_USER_NAME_CHARS)).is_ok());
        assert_eq!(
            normalize_user_name(&"é".repeat(MAX_USER_NAME_CHARS + 1)),
            Err(UserNameError::TooLong)
        );
    }

    #[test]
    fn surrounding_whitespace_does_not_count_towards_the_limit() {
        let padded = format!("  {}  ", "x".repeat(MAX_USER_NAME_CHARS));
        assert!(normalize_user_name(&padded).is_ok());
    }

    #[test]
    fn messages_name_the_field() {
        assert_eq!(
            UserNameError::TooLong.to_string(),
            "'user_name' must be at most 64 characters"
        );
    }
}
