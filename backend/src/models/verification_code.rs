//! Payloads for the verification code mailer function.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::validation::rules;

pub const MISSING_FIELDS_MESSAGE: &str = "Email and code are required";

/// Raw request body. Both fields are optional so that an absent field is
/// reported as a bad request instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SendVerificationCodePayload {
    pub email: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerificationCodeRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom(
        function = "rules::validate_verification_code",
        message = "Code must be 6 digits"
    ))]
    pub code: String,
}

impl TryFrom<SendVerificationCodePayload> for VerificationCodeRequest {
    type Error = AppError;

    fn try_from(payload: SendVerificationCodePayload) -> Result<Self, Self::Error> {
        let non_blank = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        match (non_blank(payload.email), non_blank(payload.code)) {
            (Some(email), Some(code)) => {
                let request = Self { email, code };
                request.validate()?;
                Ok(request)
            }
            _ => Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}
