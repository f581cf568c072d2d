//! Validation rules for function payloads.

use validator::ValidationError;

pub const VERIFICATION_CODE_LENGTH: usize = 6;

/// Validates a mailed verification code.
///
/// Requirements:
/// - Exactly six characters
/// - ASCII digits only
pub fn validate_verification_code(code: &str) -> Result<(), ValidationError> {
    if code.len() != VERIFICATION_CODE_LENGTH {
        return Err(ValidationError::new("verification_code_invalid_length"));
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("verification_code_invalid_characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_rejects_wrong_length() {
        assert!(validate_verification_code("12345").is_err());
        assert!(validate_verification_code("1234567").is_err());
    }

    #[test]
    fn code_rejects_non_digits() {
        let err = validate_verification_code("12a456").unwrap_err();
        assert_eq!(err.code, "verification_code_invalid_characters");
    }

    #[test]
    fn code_accepts_six_digits() {
        assert!(validate_verification_code("012345").is_ok());
    }
}
