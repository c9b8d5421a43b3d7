//! Per-session CSRF tokens for the public registration form.
//!
//! The token is generated on first render and kept for the life of the
//! session. Failed submissions do not rotate it.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsrfError {
    #[error("CSRF token missing")]
    Missing,

    #[error("CSRF token mismatch")]
    Mismatch,
}

/// Generate a random CSRF token (64 character hex string)
#[must_use]
pub fn generate_token() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Compares the submitted token with the one stored in the session.
///
/// Both must be present and non-empty.
pub fn validate_token(session_token: Option<&str>, submitted: Option<&str>) -> Result<(), CsrfError> {
    let expected = session_token.filter(|t| !t.is_empty()).ok_or(CsrfError::Missing)?;
    let submitted = submitted.filter(|t| !t.is_empty()).ok_or(CsrfError::Missing)?;

    if constant_time_compare(expected, submitted) {
        Ok(())
    } else {
        Err(CsrfError::Mismatch)
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_hex_and_unique() {
        let a = generate_token();
        let b = generate_token();

        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn matching_tokens_pass() {
        let token = generate_token();
        assert_eq!(validate_token(Some(&token), Some(&token)), Ok(()));
    }

    #[test]
    fn missing_tokens_fail() {
        assert_eq!(validate_token(None, Some("abc")), Err(CsrfError::Missing));
        assert_eq!(validate_token(Some("abc"), None), Err(CsrfError::Missing));
        assert_eq!(validate_token(Some(""), Some("")), Err(CsrfError::Missing));
    }

    #[test]
    fn mismatched_tokens_fail() {
        assert_eq!(validate_token(Some("abc"), Some("abd")), Err(CsrfError::Mismatch));
        assert_eq!(validate_token(Some("abc"), Some("abcd")), Err(CsrfError::Mismatch));
    }
}
