//! Newsletter Subscription
//!
//! Validates the address typed into the subscribe form. Nothing is sent
//! anywhere; a successful subscription is only logged.

use thiserror::Error;

/// Longest address accepted (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

pub const SUCCESS_MESSAGE: &str = "Thanks for subscribing! Check your email to confirm.";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    Empty,

    #[error("Please enter a valid email address")]
    Invalid,

    #[error("Email address exceeds maximum length of {max} characters")]
    TooLong { max: usize },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

// ============================================================================
// Validation
// ============================================================================

/// Trimmed address if it is plausible, otherwise why not.
pub fn validate_email(input: &str) -> Result<String> {
    let email = input.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty);
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong { max: MAX_EMAIL_LEN });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_string())
        }
        _ => Err(ValidationError::Invalid),
    }
}

/// Validate and record a subscription, returning the confirmation text.
pub fn subscribe(input: &str) -> Result<&'static str> {
    let email = validate_email(input)?;
    log::info!("Newsletter subscription accepted for {}", email);
    Ok(SUCCESS_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address_is_trimmed() {
        assert_eq!(validate_email("  ops@bank.example ").unwrap(), "ops@bank.example");
    }

    #[test]
    fn test_empty_and_missing_at() {
        assert_eq!(validate_email("   "), Err(ValidationError::Empty));
        assert_eq!(validate_email("ops.bank.example"), Err(ValidationError::Invalid));
        assert_eq!(validate_email("@bank.example"), Err(ValidationError::Invalid));
        assert_eq!(validate_email("ops@"), Err(ValidationError::Invalid));
    }

    #[test]
    fn test_too_long() {
        let long = format!("{}@bank.example", "a".repeat(MAX_EMAIL_LEN));
        assert_eq!(
            validate_email(&long),
            Err(ValidationError::TooLong { max: MAX_EMAIL_LEN })
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::Invalid.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(subscribe("dev@fintech.example"), Ok(SUCCESS_MESSAGE));
    }
}
