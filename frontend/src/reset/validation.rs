use super::error::ResetError;

pub fn validate_email(raw: &str) -> Result<String, ResetError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(ResetError::validation("Email is required"));
    }
    let looks_valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !looks_valid {
        return Err(ResetError::validation("Enter a valid email address"));
    }
    Ok(email.to_string())
}

/// Keeps ASCII digits only, capped at `max_len`.
pub fn sanitize_code_input(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(max_len)
        .collect()
}

/// A pasted code is taken as a whole or not at all.
pub fn parse_pasted_code(raw: &str, len: usize) -> Option<String> {
    let trimmed = raw.trim();
    (trimmed.len() == len && trimmed.chars().all(|c| c.is_ascii_digit()))
        .then(|| trimmed.to_string())
}

pub fn validate_code(code: &str, len: usize) -> Result<(), ResetError> {
    if code.len() != len || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ResetError::validation(format!(
            "Enter the {}-digit verification code",
            len
        )));
    }
    Ok(())
}

pub fn validate_new_password(
    new_password: &str,
    confirm_password: &str,
    min_length: usize,
) -> Result<(), ResetError> {
    if new_password != confirm_password {
        return Err(ResetError::validation("Passwords do not match"));
    }
    if new_password.chars().count() < min_length {
        return Err(ResetError::validation(format!(
            "Password must be at least {} characters long",
            min_length
        )));
    }
    Ok(())
}
